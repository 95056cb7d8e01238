use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::config::{CELL_SIZE, COLUMNS, ROWS};
use crate::ecs::{EcsWorld, components::Player};
use crate::map::CaveGrid;

/// Glyph cells per room edge.
pub const ROOM_SPAN: i32 = 4;
pub const CONSOLE_WIDTH: i32 = COLUMNS * ROOM_SPAN;
pub const CONSOLE_HEIGHT: i32 = ROWS * ROOM_SPAN;
/// Pixel size of one glyph cell; keeps the window at COLUMNS*CELL_SIZE x ROWS*CELL_SIZE.
pub const TILE_PIXELS: i32 = CELL_SIZE / ROOM_SPAN;

/// Top-left console cell of the room at `point`.
pub fn room_origin(point: Point) -> Point {
    Point::new(point.x * ROOM_SPAN, point.y * ROOM_SPAN)
}

pub fn draw_grid(ctx: &mut BTerm, grid: &CaveGrid) {
    for room in &grid.rooms {
        let origin = room_origin(room.position());
        let fill = room.color();
        for dy in 0..ROOM_SPAN {
            for dx in 0..ROOM_SPAN {
                ctx.set(
                    origin.x + dx,
                    origin.y + dy,
                    RGB::named(BLACK),
                    fill,
                    to_cp437(' '),
                );
            }
        }
        ctx.draw_hollow_box(
            origin.x,
            origin.y,
            ROOM_SPAN - 1,
            ROOM_SPAN - 1,
            RGB::named(BLACK),
            fill,
        );
    }
}

/// Player sits one cell in from the room's corner, the monster one further,
/// so both stay visible when they share a room.
pub fn draw_actors(ctx: &mut BTerm, ecs: &EcsWorld, grid: &CaveGrid) {
    ecs.each_renderable(|point, renderable| {
        let Some(room) = grid.room_at(point) else {
            return;
        };
        let origin = room_origin(point);
        let inset = if renderable.order >= 2 { 1 } else { 2 };
        ctx.set(
            origin.x + inset,
            origin.y + inset,
            renderable.color,
            room.color(),
            renderable.glyph,
        );
    });
}

pub fn draw_status(ctx: &mut BTerm, player: &Player, monster_distance: Option<i32>, turn: u64) {
    let distance = monster_distance
        .map(|steps| steps.to_string())
        .unwrap_or_else(|| "-".to_string());
    let line = format!(
        "HP {:>3} MV {} M{} T{}",
        player.health(),
        player.moves_left(),
        distance,
        turn
    );
    ctx.print_color(
        0,
        CONSOLE_HEIGHT - 1,
        RGB::named(WHITE),
        RGB::named(BLACK),
        fit_line(&line),
    );
}

pub fn draw_message(ctx: &mut BTerm, message: &str) {
    ctx.print_color(
        0,
        0,
        RGB::named(LIGHT_GRAY),
        RGB::named(BLACK),
        fit_line(message),
    );
}

pub fn draw_game_over(ctx: &mut BTerm, turn: u64) {
    let mid = CONSOLE_HEIGHT / 2;
    ctx.print_color_centered(mid - 1, RGB::named(YELLOW), RGB::named(BLACK), "YOU DIED");
    ctx.print_color_centered(
        mid,
        RGB::named(WHITE),
        RGB::named(BLACK),
        fit_line(&format!("after {turn} turns")),
    );
    ctx.print_color_centered(mid + 1, RGB::named(GRAY), RGB::named(BLACK), "R retry  Q quit");
}

fn fit_line(text: &str) -> String {
    text.chars().take(CONSOLE_WIDTH as usize).collect()
}
