//! Life and shield bookkeeping.
//!
//! Fields are private so every write goes through a setter, and every setter
//! refreshes the displayed bar widths.

use bevy::prelude::*;

use crate::common::geometry::bar_width;

/// Widths of the three status bars, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BarWidths {
    pub background: f32,
    pub life: f32,
    pub shield: f32,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Vitals {
    life: f32,
    life_full: f32,
    shield: f32,
    shield_full: f32,
    shield_recharge_rate: f32,
    bar_width: f32,
    bars_hidden: bool,
    bars: BarWidths,
}

impl Vitals {
    /// New vitals starting at full life and shield.
    pub fn new(life_full: f32, shield_full: f32, shield_recharge_rate: f32, bar_width: f32) -> Self {
        let mut v = Self {
            life: life_full,
            life_full,
            shield: shield_full.max(0.0),
            shield_full: shield_full.max(0.0),
            shield_recharge_rate: shield_recharge_rate.max(0.0),
            bar_width,
            bars_hidden: false,
            bars: BarWidths::default(),
        };
        v.refresh_bars();
        v
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn life_full(&self) -> f32 {
        self.life_full
    }

    pub fn shield(&self) -> f32 {
        self.shield
    }

    pub fn shield_full(&self) -> f32 {
        self.shield_full
    }

    pub fn shield_recharge_rate(&self) -> f32 {
        self.shield_recharge_rate
    }

    pub fn bars(&self) -> BarWidths {
        self.bars
    }

    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    /// Death triggers at `life <= 0`.
    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.life <= 0.0
    }

    pub fn set_life(&mut self, life: f32) {
        self.life = life;
        self.refresh_bars();
    }

    pub fn set_life_full(&mut self, life_full: f32) {
        self.life_full = life_full;
        self.refresh_bars();
    }

    /// Clamped to `[0, shield_full]`.
    pub fn set_shield(&mut self, shield: f32) {
        self.shield = shield.clamp(0.0, self.shield_full);
        self.refresh_bars();
    }

    pub fn set_shield_full(&mut self, shield_full: f32) {
        self.shield_full = shield_full.max(0.0);
        self.shield = self.shield.clamp(0.0, self.shield_full);
        self.refresh_bars();
    }

    pub fn set_shield_recharge_rate(&mut self, rate: f32) {
        self.shield_recharge_rate = rate.max(0.0);
    }

    /// Shield absorbs first; whatever it could not absorb comes off life.
    pub fn absorb(&mut self, damage: f32) {
        let remaining = self.shield - damage;
        if remaining < 0.0 {
            self.set_life(self.life + remaining);
        }
        self.set_shield(remaining);
    }

    /// One tick of shield regeneration.
    pub fn recharge_shield(&mut self) {
        if self.shield != self.shield_full {
            self.set_shield(self.shield + self.shield_recharge_rate);
        }
    }

    /// Collapse the whole status display. Stays hidden from then on.
    pub fn hide_bars(&mut self) {
        self.bars_hidden = true;
        self.refresh_bars();
    }

    fn refresh_bars(&mut self) {
        self.bars = BarWidths {
            background: if self.bars_hidden { 0.0 } else { self.bar_width },
            life: bar_width(self.bar_width, self.life, self.life_full),
            shield: bar_width(self.bar_width, self.shield, self.shield_full),
        };
    }
}
