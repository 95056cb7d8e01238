use serde::Serialize;

use crate::ecs::EcsWorld;
use crate::map::{CaveGrid, RoomKind};

#[derive(Clone, Debug, Serialize)]
pub struct PlayerSnapshot {
    pub health: i32,
    pub row: i32,
    pub col: i32,
    pub moves_left: i32,
}

#[derive(Clone, Debug, Serialize)]
pub struct MonsterSnapshot {
    pub row: i32,
    pub col: i32,
}

/// Point-in-time dump of a running game, written to the log as JSON.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    pub turn: u64,
    pub player: Option<PlayerSnapshot>,
    pub monster: Option<MonsterSnapshot>,
    pub rooms: Vec<Vec<RoomKind>>,
}

impl GameSnapshot {
    pub fn capture(ecs: &EcsWorld, grid: &CaveGrid) -> Self {
        Self {
            turn: ecs.turn,
            player: ecs.player_state().map(|player| PlayerSnapshot {
                health: player.health(),
                row: player.row(),
                col: player.col(),
                moves_left: player.moves_left(),
            }),
            monster: ecs.monster_state().map(|monster| MonsterSnapshot {
                row: monster.row(),
                col: monster.col(),
            }),
            rooms: grid.kinds_by_row(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MONSTER_START, PLAYER_START};
    use crate::map::Room;

    #[test]
    fn snapshot_serialises_actors_and_rooms() {
        let mut grid = CaveGrid::filled(2, 3, RoomKind::Normal);
        grid.set_room(Room::of_kind(1, 2, RoomKind::Cure));
        let ecs = EcsWorld::new(PLAYER_START, MONSTER_START);

        let json = GameSnapshot::capture(&ecs, &grid).to_json().expect("serialises");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["turn"], 0);
        assert_eq!(value["player"]["health"], 100);
        assert_eq!(value["player"]["moves_left"], 2);
        assert_eq!(value["monster"]["row"], 4);
        assert_eq!(value["monster"]["col"], 6);
        assert_eq!(value["rooms"][1][2], "Cure");
        assert_eq!(value["rooms"][0][0], "Normal");
    }
}
