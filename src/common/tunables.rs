//! Tunable gameplay constants.

use std::time::Duration;

use bevy::prelude::*;

/// Half-open roll band `(low, high]` over a `0..1000` roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollBand {
    pub low: u32,
    pub high: u32,
}

impl RollBand {
    #[inline]
    pub fn contains(&self, roll: u32) -> bool {
        roll > self.low && roll <= self.high
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Size of the arena in design pixels.
    pub design_size: Vec2,
    /// Units per tick.
    pub player_speed: f32,
    pub enemy_speed: f32,
    /// How far one held movement key pushes the player's destination each tick.
    pub keyboard_step: f32,
    pub health_bar_width: f32,
    pub health_bar_height: f32,
    /// Minimum time between two AI firing decisions of the same enemy.
    pub ai_action_interval: Duration,
    pub ai_fire_band: RollBand,
    pub ai_missile_band: RollBand,
    /// Per-tick odds (out of 1000) that an enemy flips its horizontal bias.
    pub ai_reverse_odds: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            design_size: Vec2::new(1920.0, 1080.0),
            player_speed: 5.0,
            enemy_speed: 3.0,
            keyboard_step: 5.0,
            health_bar_width: 128.0,
            health_bar_height: 8.0,
            ai_action_interval: Duration::from_millis(750),
            ai_fire_band: RollBand { low: 940, high: 990 },
            ai_missile_band: RollBand { low: 990, high: 999 },
            ai_reverse_odds: 2,
        }
    }
}
