//! Enemy controller.
//!
//! Enemies chase the player's position inside their own arena. Every tick each
//! enemy may flip its horizontal bias, and once its action gate has been closed
//! for longer than the AI interval it rolls to fire. All randomness goes
//! through `AiRandom` so tests can seed it.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::geometry::ArenaPosition;
use crate::common::tick::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::actions::FireAction;
use crate::plugins::combatants::{Controller, LifeState, Motion, Roster};

pub const BASIC_ACTION: &str = "fire";
pub const HEAVY_ACTION: &str = "missile";

/// Exclusive upper bound of every AI roll.
pub const ROLL_RANGE: u32 = 1000;

#[derive(Resource)]
pub struct AiRandom(pub StdRng);

impl Default for AiRandom {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl AiRandom {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn roll(&mut self) -> u32 {
        self.0.gen_range(0..ROLL_RANGE)
    }
}

/// Map a `0..1000` roll to the action it selects, if any.
pub fn choose_action(roll: u32, tunables: &Tunables) -> Option<&'static str> {
    if tunables.ai_fire_band.contains(roll) {
        Some(BASIC_ACTION)
    } else if tunables.ai_missile_band.contains(roll) {
        Some(HEAVY_ACTION)
    } else {
        None
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<AiRandom>()
        .add_systems(FixedUpdate, drive_enemies.in_set(TickSet::Intent));
}

fn drive_enemies(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    roster: Res<Roster>,
    mut rng: ResMut<AiRandom>,
    mut q: Query<(&mut Controller, &LifeState, &ArenaPosition, &mut Motion)>,
    mut fire: MessageWriter<FireAction>,
) {
    let now = time.elapsed();

    let player_pos = q
        .iter()
        .find(|(controller, ..)| controller.is_player())
        .map(|(_, _, pos, _)| pos.0);

    for e in roster.iter() {
        let Ok((mut controller, life, _, mut motion)) = q.get_mut(e) else {
            continue;
        };
        let Controller::Ai(brain) = &mut *controller else {
            continue;
        };
        if life.is_dying() {
            continue;
        }

        if now.saturating_sub(brain.last_action) > tunables.ai_action_interval {
            if let Some(key) = choose_action(rng.roll(), &tunables) {
                brain.last_action = now;
                fire.write(FireAction { shooter: e, key: key.to_string() });
            }
        }

        if let Some(target) = player_pos {
            motion.destination = Some(target);
        }

        if motion.can_move && rng.roll() < tunables.ai_reverse_odds {
            motion.reverse_x = !motion.reverse_x;
        }
    }
}
