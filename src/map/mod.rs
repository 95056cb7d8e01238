use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::{BLUE, GREEN, RED, RGB, WHITE};
use serde::Serialize;

use crate::config::{
    CURE_CHANCE, CURE_EFFECT, POISON_CHANCE, POISON_EFFECT, TRAP_CHANCE, TRAP_PENALTY_PERCENT,
};
use crate::ecs::components::Player;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum RoomKind {
    Trap,
    Cure,
    Poison,
    Normal,
}

impl RoomKind {
    pub fn color(self) -> RGB {
        match self {
            RoomKind::Trap => RGB::named(RED),
            RoomKind::Cure => RGB::named(GREEN),
            RoomKind::Poison => RGB::named(BLUE),
            RoomKind::Normal => RGB::named(WHITE),
        }
    }

    /// One weighted draw per cell.
    pub fn roll(rng: &mut RandomNumberGenerator) -> Self {
        let roll = rng.range(0, 100);
        if roll < TRAP_CHANCE {
            RoomKind::Trap
        } else if roll < TRAP_CHANCE + POISON_CHANCE {
            RoomKind::Poison
        } else if roll < TRAP_CHANCE + POISON_CHANCE + CURE_CHANCE {
            RoomKind::Cure
        } else {
            RoomKind::Normal
        }
    }
}

/// What happened to the player on the way in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoomOutcome {
    Trap { damage: i32 },
    Cure { amount: i32 },
    Poison { amount: i32 },
    Quiet,
}

impl RoomOutcome {
    pub fn describe(&self) -> Option<String> {
        match self {
            RoomOutcome::Trap { damage } => Some(format!(
                "Trap! Lost {damage} health and a move."
            )),
            RoomOutcome::Cure { amount } => Some(format!("A cure room restores {amount} health.")),
            RoomOutcome::Poison { amount } => Some(format!("Poison seeps in: -{amount} health.")),
            RoomOutcome::Quiet => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    position: Point,
    health_effect: i32,
    is_trap: bool,
}

impl Default for Room {
    fn default() -> Self {
        Room::new(0, 0, 0, false)
    }
}

impl Room {
    pub fn new(row: i32, col: i32, health_effect: i32, is_trap: bool) -> Self {
        Self {
            position: Point::new(col, row),
            health_effect,
            is_trap,
        }
    }

    pub fn of_kind(row: i32, col: i32, kind: RoomKind) -> Self {
        match kind {
            RoomKind::Trap => Room::new(row, col, 0, true),
            RoomKind::Poison => Room::new(row, col, POISON_EFFECT, false),
            RoomKind::Cure => Room::new(row, col, CURE_EFFECT, false),
            RoomKind::Normal => Room::new(row, col, 0, false),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// The trap flag wins over any health effect.
    pub fn kind(&self) -> RoomKind {
        if self.is_trap {
            RoomKind::Trap
        } else if self.health_effect > 0 {
            RoomKind::Cure
        } else if self.health_effect < 0 {
            RoomKind::Poison
        } else {
            RoomKind::Normal
        }
    }

    pub fn color(&self) -> RGB {
        self.kind().color()
    }

    pub fn enter(&self, player: &mut Player) -> RoomOutcome {
        if self.is_trap {
            let damage = trap_damage(player.health());
            player.update_health(-damage);
            player.decrement_move();
            return RoomOutcome::Trap { damage };
        }
        match self.health_effect {
            0 => RoomOutcome::Quiet,
            effect => {
                player.update_health(effect);
                if effect > 0 {
                    RoomOutcome::Cure { amount: effect }
                } else {
                    RoomOutcome::Poison { amount: -effect }
                }
            }
        }
    }
}

/// ceil(health * 20%) without going through floats. Widened so large health
/// values cannot overflow.
fn trap_damage(health: i32) -> i32 {
    let scaled = i64::from(health.max(0)) * i64::from(TRAP_PENALTY_PERCENT);
    ((scaled + 99) / 100) as i32
}

#[derive(Clone, Debug)]
pub struct CaveGrid {
    pub width: i32,
    pub height: i32,
    pub rooms: Vec<Room>,
}

impl CaveGrid {
    pub fn generate(rows: i32, cols: i32, rng: &mut RandomNumberGenerator) -> Self {
        let mut rooms = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                rooms.push(Room::of_kind(row, col, RoomKind::roll(rng)));
            }
        }
        Self {
            width: cols,
            height: rows,
            rooms,
        }
    }

    #[cfg(test)]
    pub fn filled(rows: i32, cols: i32, kind: RoomKind) -> Self {
        let rooms = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Room::of_kind(row, col, kind)))
            .collect();
        Self {
            width: cols,
            height: rows,
            rooms,
        }
    }

    fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn room_at(&self, point: Point) -> Option<&Room> {
        self.idx(point).map(|idx| &self.rooms[idx])
    }

    #[cfg(test)]
    pub fn set_room(&mut self, room: Room) {
        if let Some(idx) = self.idx(room.position()) {
            self.rooms[idx] = room;
        }
    }

    pub fn kinds_by_row(&self) -> Vec<Vec<RoomKind>> {
        self.rooms
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(Room::kind).collect())
            .collect()
    }

    pub fn count(&self, kind: RoomKind) -> usize {
        self.rooms.iter().filter(|room| room.kind() == kind).count()
    }
}
