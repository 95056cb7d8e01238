pub mod components;
pub mod resources;
pub mod systems;

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::{RED, RGB, YELLOW, to_cp437};
use log::info;
use specs::prelude::{
    Builder, Dispatcher, DispatcherBuilder, Entity, Join, World as SpecsWorld, WorldExt,
};

use crate::map::{CaveGrid, RoomOutcome};

use self::{
    components::{Monster, Player, Renderable},
    resources::TurnLog,
    systems::{AmbushSystem, PursuitSystem, strike_on_contact},
};

pub struct EcsWorld {
    specs_world: SpecsWorld,
    dispatcher: Dispatcher<'static, 'static>,
    player: Entity,
    monster: Entity,
    pub turn: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepReport {
    /// Off the grid; nothing spent.
    Blocked,
    Moved {
        room: RoomOutcome,
        ambushed: bool,
        turn_ended: bool,
    },
}

impl EcsWorld {
    pub fn new(player_start: (i32, i32), monster_start: (i32, i32)) -> Self {
        let mut specs_world = SpecsWorld::new();
        specs_world.register::<Player>();
        specs_world.register::<Monster>();
        specs_world.register::<Renderable>();
        specs_world.insert(TurnLog::default());

        let player = specs_world
            .create_entity()
            .with(Player::new(player_start.0, player_start.1))
            .with(Renderable {
                glyph: to_cp437('P'),
                color: RGB::named(YELLOW),
                order: 2,
            })
            .build();
        let monster = specs_world
            .create_entity()
            .with(Monster::new(monster_start.0, monster_start.1))
            .with(Renderable {
                glyph: to_cp437('M'),
                color: RGB::named(RED),
                order: 1,
            })
            .build();

        let dispatcher = DispatcherBuilder::new()
            .with(PursuitSystem, "pursuit", &[])
            .with(AmbushSystem, "ambush", &["pursuit"])
            .build();

        Self {
            specs_world,
            dispatcher,
            player,
            monster,
            turn: 0,
        }
    }

    pub fn player_state(&self) -> Option<Player> {
        self.specs_world
            .read_storage::<Player>()
            .get(self.player)
            .copied()
    }

    pub fn monster_state(&self) -> Option<Monster> {
        self.specs_world
            .read_storage::<Monster>()
            .get(self.monster)
            .copied()
    }

    /// Moves the player by `delta` (x = columns, y = rows), applies the room and
    /// closes the turn once the move budget is spent.
    pub fn step_player(&mut self, delta: Point, grid: &CaveGrid) -> StepReport {
        let (room, ambushed, out_of_moves) = {
            let mut players = self.specs_world.write_storage::<Player>();
            let monsters = self.specs_world.read_storage::<Monster>();
            let mut log = self.specs_world.write_resource::<TurnLog>();
            let Some(player) = players.get_mut(self.player) else {
                return StepReport::Blocked;
            };

            let target = player.position() + delta;
            let Some(destination) = grid.room_at(target) else {
                log.push(format!("Blocked at {},{}", target.y, target.x));
                return StepReport::Blocked;
            };

            player.set_position(target.y, target.x);
            // A trap's extra move is lost when this step already emptied the budget.
            player.decrement_move();
            let room = destination.enter(player);
            if let Some(line) = room.describe() {
                log.push(line);
            }

            // Contact on the last move is struck here and again on the monster's turn.
            let mut ambushed = false;
            for monster in monsters.join() {
                ambushed |= strike_on_contact(monster, player, &mut log);
            }
            (room, ambushed, player.moves_left() == 0)
        };

        if out_of_moves {
            self.end_turn();
        }
        StepReport::Moved {
            room,
            ambushed,
            turn_ended: out_of_moves,
        }
    }

    /// The monster acts, then the player's budget is restored.
    pub fn end_turn(&mut self) {
        self.dispatcher.dispatch(&self.specs_world);
        self.specs_world.maintain();
        self.turn = self.turn.wrapping_add(1);

        let mut players = self.specs_world.write_storage::<Player>();
        if let Some(player) = players.get_mut(self.player) {
            player.reset_moves();
            info!("Turn {} | {}", self.turn, player);
        }
    }

    pub fn drain_log(&mut self) -> Vec<String> {
        self.specs_world.write_resource::<TurnLog>().drain()
    }

    /// Visits actors lowest `order` first so the player draws on top.
    pub fn each_renderable<F>(&self, mut f: F)
    where
        F: FnMut(Point, &Renderable),
    {
        let players = self.specs_world.read_storage::<Player>();
        let monsters = self.specs_world.read_storage::<Monster>();
        let renderables = self.specs_world.read_storage::<Renderable>();
        let entities = self.specs_world.entities();

        let mut drawn: Vec<(Point, &Renderable)> = Vec::new();
        for (entity, renderable) in (&*entities, &renderables).join() {
            let point = players
                .get(entity)
                .map(Player::position)
                .or_else(|| monsters.get(entity).map(Monster::position));
            if let Some(point) = point {
                drawn.push((point, renderable));
            }
        }
        drawn.sort_by_key(|(_, renderable)| renderable.order);
        for (point, renderable) in drawn {
            f(point, renderable);
        }
    }
}
