use std::fmt;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::DistanceAlg;
use bracket_terminal::prelude::RGB;
use specs::prelude::{Component, VecStorage};

use crate::config::{MONSTER_DAMAGE, MOVES_PER_TURN, PLAYER_START_HEALTH};

/// The explorer. Positions are stored as `Point { x: col, y: row }`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    health: i32,
    position: Point,
    moves_left: i32,
}

impl Component for Player {
    type Storage = VecStorage<Self>;
}

impl Player {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            health: PLAYER_START_HEALTH,
            position: Point::new(col, row),
            moves_left: MOVES_PER_TURN,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn row(&self) -> i32 {
        self.position.y
    }

    pub fn col(&self) -> i32 {
        self.position.x
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn moves_left(&self) -> i32 {
        self.moves_left
    }

    /// Bounds are the caller's problem.
    pub fn set_position(&mut self, row: i32, col: i32) {
        self.position = Point::new(col, row);
    }

    /// Applies a signed delta, flooring health at 0. There is no upper cap.
    pub fn update_health(&mut self, delta: i32) {
        self.health = self.health.saturating_add(delta).max(0);
    }

    pub fn decrement_move(&mut self) {
        self.moves_left = (self.moves_left - 1).max(0);
    }

    pub fn reset_moves(&mut self) {
        self.moves_left = MOVES_PER_TURN;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player | Health: {} | Position: ({}, {}) | Moves Left: {}",
            self.health,
            self.row(),
            self.col(),
            self.moves_left
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Monster {
    position: Point,
}

impl Component for Monster {
    type Storage = VecStorage<Self>;
}

impl Monster {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            position: Point::new(col, row),
        }
    }

    pub fn row(&self) -> i32 {
        self.position.y
    }

    pub fn col(&self) -> i32 {
        self.position.x
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Closes at most one cell on each axis, so diagonal steps are allowed.
    pub fn move_toward_player(&mut self, target_row: i32, target_col: i32) {
        self.position.y += (target_row - self.position.y).signum();
        self.position.x += (target_col - self.position.x).signum();
    }

    pub fn sense_player(&self, row: i32, col: i32) -> bool {
        self.position.y == row && self.position.x == col
    }

    pub fn attack(&self, player: &mut Player) {
        player.update_health(-MONSTER_DAMAGE);
    }

    /// Monster turns needed to reach the given cell.
    pub fn steps_to(&self, row: i32, col: i32) -> i32 {
        DistanceAlg::Chebyshev.distance2d(self.position, Point::new(col, row)) as i32
    }
}

#[derive(Clone, Debug)]
pub struct Renderable {
    pub glyph: u16,
    pub color: RGB,
    pub order: i32,
}

impl Component for Renderable {
    type Storage = VecStorage<Self>;
}
