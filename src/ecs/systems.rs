use log::debug;
use specs::prelude::*;

use super::{
    components::{Monster, Player},
    resources::TurnLog,
};

/// Every monster takes one greedy step toward the player.
#[derive(Default)]
pub struct PursuitSystem;

impl<'a> System<'a> for PursuitSystem {
    type SystemData = (
        ReadStorage<'a, Player>,
        WriteStorage<'a, Monster>,
        WriteExpect<'a, TurnLog>,
    );

    fn run(&mut self, (players, mut monsters, mut log): Self::SystemData) {
        let Some(target) = players.join().next().map(Player::position) else {
            return;
        };
        for monster in (&mut monsters).join() {
            let before = monster.position();
            monster.move_toward_player(target.y, target.x);
            if monster.position() != before {
                debug!(
                    "monster {},{} -> {},{}",
                    before.y,
                    before.x,
                    monster.row(),
                    monster.col()
                );
                match monster.steps_to(target.y, target.x) {
                    0 => {}
                    1 => log.push("You hear breathing right next to you."),
                    steps => log.push(format!("Footsteps echo, {steps} rooms away.")),
                }
            }
        }
    }
}

/// Monsters sharing the player's room attack.
#[derive(Default)]
pub struct AmbushSystem;

impl<'a> System<'a> for AmbushSystem {
    type SystemData = (
        WriteStorage<'a, Player>,
        ReadStorage<'a, Monster>,
        WriteExpect<'a, TurnLog>,
    );

    fn run(&mut self, (mut players, monsters, mut log): Self::SystemData) {
        for player in (&mut players).join() {
            for monster in monsters.join() {
                strike_on_contact(monster, player, &mut log);
            }
        }
    }
}

pub fn strike_on_contact(monster: &Monster, player: &mut Player, log: &mut TurnLog) -> bool {
    if !monster.sense_player(player.row(), player.col()) {
        return false;
    }
    let before = player.health();
    monster.attack(player);
    log.push(format!(
        "The monster attacks! {} -> {} health.",
        before,
        player.health()
    ));
    true
}
