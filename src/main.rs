#[cfg(all(feature = "terminal", feature = "window"))]
compile_error!("features `terminal` and `window` pick different backends; enable only one");
#[cfg(not(any(feature = "terminal", feature = "window")))]
compile_error!("enable a render backend: `window` (default) or `terminal`");

mod assets;
mod config;
mod ecs;
mod error;
mod map;
mod render;
mod scripted_input;
mod snapshot;

use assets::FontAsset;
use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::*;
use config::{COLUMNS, MONSTER_START, PLAYER_START, PLAYER_START_HEALTH, ROWS};
use ecs::{EcsWorld, StepReport};
use log::{debug, error, info, warn};
use map::{CaveGrid, RoomKind};
use render::{
    CONSOLE_HEIGHT, CONSOLE_WIDTH, TILE_PIXELS, draw_actors, draw_game_over, draw_grid,
    draw_message, draw_status,
};
use scripted_input::ScriptedInput;
use snapshot::GameSnapshot;

/// Optional key script replayed one key per frame before live input.
const SCRIPT_ENV: &str = "CAVE_ESCAPE_SCRIPT";
const LOG_MAX_ENTRIES: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Exploring,
    GameOver,
}

struct CaveEscapeState {
    grid: CaveGrid,
    ecs: EcsWorld,
    rng: RandomNumberGenerator,
    phase: Phase,
    message_log: Vec<String>,
    health_alerted: bool,
    script: Option<ScriptedInput>,
}

impl GameState for CaveEscapeState {
    fn tick(&mut self, ctx: &mut BTerm) {
        let key = self
            .script
            .as_mut()
            .and_then(ScriptedInput::next_key)
            .or(ctx.key);
        if let Some(key) = key {
            if !self.apply_key(key) {
                ctx.quit();
                return;
            }
        }
        ctx.cls();
        self.draw_scene(ctx);
    }
}

impl CaveEscapeState {
    fn new(mut rng: RandomNumberGenerator) -> Self {
        let grid = CaveGrid::generate(ROWS, COLUMNS, &mut rng);
        describe_cave(&grid);
        let mut state = Self {
            grid,
            ecs: EcsWorld::new(PLAYER_START, MONSTER_START),
            rng,
            phase: Phase::Exploring,
            message_log: Vec::new(),
            health_alerted: false,
            script: None,
        };
        state.push_log_entry("Find your way. Something stirs in the far corner.");
        state
    }

    /// Returns false when the player asked to quit.
    fn apply_key(&mut self, key: VirtualKeyCode) -> bool {
        match key {
            VirtualKeyCode::Escape | VirtualKeyCode::Q => return false,
            VirtualKeyCode::P => self.dump_snapshot(),
            VirtualKeyCode::R if self.phase == Phase::GameOver => self.restart(),
            _ if self.phase == Phase::GameOver => {}
            VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => self.try_step(-1, 0),
            VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => self.try_step(1, 0),
            VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => self.try_step(0, -1),
            VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => self.try_step(0, 1),
            VirtualKeyCode::Period | VirtualKeyCode::Space => {
                self.push_log_entry("You wait.");
                self.ecs.end_turn();
                self.after_action();
            }
            _ => {}
        }
        true
    }

    fn try_step(&mut self, dx: i32, dy: i32) {
        if let StepReport::Moved {
            room,
            ambushed,
            turn_ended,
        } = self.ecs.step_player(Point::new(dx, dy), &self.grid)
        {
            debug!("Entered room ({room:?}), ambushed: {ambushed}");
            if turn_ended {
                info!("Turn {} begins", self.ecs.turn);
            }
        }
        self.after_action();
    }

    fn after_action(&mut self) {
        self.flush_turn_log();
        self.check_health_warning();
        if self.phase == Phase::Exploring && self.ecs.player_state().is_some_and(|p| p.is_dead()) {
            self.phase = Phase::GameOver;
            info!("Player died on turn {}", self.ecs.turn);
            self.push_log_entry("You have fallen.");
        }
    }

    fn restart(&mut self) {
        self.grid = CaveGrid::generate(ROWS, COLUMNS, &mut self.rng);
        describe_cave(&self.grid);
        self.ecs = EcsWorld::new(PLAYER_START, MONSTER_START);
        self.phase = Phase::Exploring;
        self.health_alerted = false;
        self.message_log.clear();
        self.push_log_entry("A new cave opens up.");
    }

    fn dump_snapshot(&mut self) {
        match GameSnapshot::capture(&self.ecs, &self.grid).to_json() {
            Ok(json) => {
                info!("{json}");
                self.push_log_entry("State written to log.");
            }
            Err(err) => error!("Snapshot failed: {err}"),
        }
    }

    fn flush_turn_log(&mut self) {
        for entry in self.ecs.drain_log() {
            self.push_log_entry(entry);
        }
    }

    fn check_health_warning(&mut self) {
        if let Some(player) = self.ecs.player_state() {
            let ratio = player.health() as f32 / PLAYER_START_HEALTH as f32;
            let critical = ratio <= 0.3;
            if critical && !self.health_alerted {
                self.push_log_entry("!! Health critical !!");
                self.health_alerted = true;
            } else if !critical && self.health_alerted && ratio > 0.5 {
                self.push_log_entry("Health stabilizes.");
                self.health_alerted = false;
            }
        }
    }

    fn push_log_entry<S: Into<String>>(&mut self, entry: S) {
        let entry = entry.into();
        info!("{entry}");
        self.message_log.insert(0, entry);
        self.message_log.truncate(LOG_MAX_ENTRIES);
    }

    fn draw_scene(&mut self, ctx: &mut BTerm) {
        draw_grid(ctx, &self.grid);
        draw_actors(ctx, &self.ecs, &self.grid);
        if let Some(latest) = self.message_log.first() {
            draw_message(ctx, latest);
        }
        if let Some(player) = self.ecs.player_state() {
            let distance = self
                .ecs
                .monster_state()
                .map(|monster| monster.steps_to(player.row(), player.col()));
            draw_status(ctx, &player, distance, self.ecs.turn);
        }
        if self.phase == Phase::GameOver {
            draw_game_over(ctx, self.ecs.turn);
        }
    }
}

fn describe_cave(grid: &CaveGrid) {
    info!(
        "Cave carved: {} traps, {} cures, {} poison, {} plain",
        grid.count(RoomKind::Trap),
        grid.count(RoomKind::Cure),
        grid.count(RoomKind::Poison),
        grid.count(RoomKind::Normal)
    );
}

fn load_script() -> Option<ScriptedInput> {
    let path = std::env::var_os(SCRIPT_ENV)?;
    match ScriptedInput::from_file(&path) {
        Ok(script) => {
            info!("Replaying {} scripted keys", script.remaining());
            Some(script)
        }
        Err(err) => {
            warn!("Ignoring key script {}: {err}", path.to_string_lossy());
            None
        }
    }
}

fn main() -> BError {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config::DEFAULT_LOG_FILTER),
    )
    .init();

    let font = match FontAsset::load(config::FONT_PATH) {
        Ok(font) => font,
        Err(err) => {
            error!("{err}");
            eprintln!("Error loading font: {err}");
            std::process::exit(1);
        }
    };
    info!(
        "Using {} ({:?}, {} bytes)",
        font.path.display(),
        font.format,
        font.byte_len
    );

    let context = BTermBuilder::new()
        .with_title(config::WINDOW_TITLE)
        .with_dimensions(CONSOLE_WIDTH, CONSOLE_HEIGHT)
        .with_tile_dimensions(TILE_PIXELS, TILE_PIXELS)
        .with_font("terminal8x8.png", 8, 8)
        .with_simple_console(CONSOLE_WIDTH, CONSOLE_HEIGHT, "terminal8x8.png")
        .build()?;

    let mut game_state = CaveEscapeState::new(RandomNumberGenerator::new());
    game_state.script = load_script();
    main_loop(context, game_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use map::Room;

    fn quiet_state() -> CaveEscapeState {
        let mut state = CaveEscapeState::new(RandomNumberGenerator::seeded(11));
        state.grid = CaveGrid::filled(ROWS, COLUMNS, RoomKind::Normal);
        state
    }

    fn play(state: &mut CaveEscapeState, script: &str) -> bool {
        let mut input = ScriptedInput::from_reader(script.as_bytes()).unwrap();
        while let Some(key) = input.next_key() {
            if !state.apply_key(key) {
                return false;
            }
        }
        true
    }

    #[test]
    fn scripted_walk_moves_player_and_monster() {
        let mut state = quiet_state();
        assert!(play(&mut state, "dd"));
        let player = state.ecs.player_state().unwrap();
        assert_eq!((player.row(), player.col()), (0, 2));
        assert_eq!(state.ecs.turn, 1);
        let monster = state.ecs.monster_state().unwrap();
        assert_eq!((monster.row(), monster.col()), (3, 5));
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let mut state = quiet_state();
        assert!(!play(&mut state, "dq"));
        assert!(!state.apply_key(VirtualKeyCode::Escape));
    }

    #[test]
    fn poisoned_to_zero_ends_the_game_and_freezes_movement() {
        let mut state = quiet_state();
        state.grid.set_room(Room::new(0, 1, -200, false));
        play(&mut state, "d");
        assert_eq!(state.phase, Phase::GameOver);
        assert!(state.message_log.iter().any(|line| line.contains("fallen")));

        play(&mut state, "sj.");
        let player = state.ecs.player_state().unwrap();
        assert_eq!((player.row(), player.col()), (0, 1));
    }

    #[test]
    fn restart_rebuilds_a_fresh_cave() {
        let mut state = quiet_state();
        state.grid.set_room(Room::new(0, 1, -200, false));
        play(&mut state, "d");
        play(&mut state, "r");
        assert_eq!(state.phase, Phase::Exploring);
        let player = state.ecs.player_state().unwrap();
        assert_eq!(player.health(), PLAYER_START_HEALTH);
        assert_eq!((player.row(), player.col()), PLAYER_START);
        assert_eq!(state.ecs.turn, 0);
    }

    #[test]
    fn restart_is_ignored_while_alive() {
        let mut state = quiet_state();
        play(&mut state, "d");
        play(&mut state, "r");
        let player = state.ecs.player_state().unwrap();
        assert_eq!(player.col(), 1);
    }

    #[test]
    fn critical_health_warns_once() {
        let mut state = quiet_state();
        state.grid.set_room(Room::new(0, 1, -75, false));
        state.grid.set_room(Room::new(0, 2, -1, false));
        play(&mut state, "dd");
        let warnings = state
            .message_log
            .iter()
            .filter(|line| line.contains("critical"))
            .count();
        assert_eq!(warnings, 1);
        assert!(state.health_alerted);
    }

    #[test]
    fn healing_past_half_rearms_the_warning() {
        let mut state = quiet_state();
        state.grid.set_room(Room::new(0, 1, -75, false));
        state.grid.set_room(Room::new(0, 2, 40, false));
        state.grid.set_room(Room::new(1, 2, -40, false));

        play(&mut state, "dd");
        assert_eq!(state.ecs.player_state().unwrap().health(), 65);
        assert!(!state.health_alerted);

        play(&mut state, "j");
        assert_eq!(state.ecs.player_state().unwrap().health(), 25);
        assert!(state.health_alerted);

        let count = |needle: &str| {
            state
                .message_log
                .iter()
                .filter(|line| line.contains(needle))
                .count()
        };
        assert_eq!(count("critical"), 2);
        assert_eq!(count("Health stabilizes."), 1);
        assert_eq!(state.message_log[0], "!! Health critical !!");
    }

    #[test]
    fn exactly_one_backend_is_built() {
        assert!(cfg!(feature = "window") != cfg!(feature = "terminal"));
    }

    #[test]
    fn waiting_ends_the_turn() {
        let mut state = quiet_state();
        play(&mut state, "...");
        assert_eq!(state.ecs.turn, 3);
        assert_eq!(state.ecs.player_state().unwrap().moves_left(), 2);
    }

    #[test]
    fn snapshot_key_logs_state() {
        let mut state = quiet_state();
        play(&mut state, "p");
        assert_eq!(state.message_log[0], "State written to log.");
    }
}
