use std::time::Duration;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use crate::common::layers::Side;

/// An in-flight projectile or effect.
///
/// Owned by the combatant that fired it. Removal is deferred: anything that
/// wants a sprite gone sets `mark_delete` and the sweep despawns it on the
/// following tick.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ActionSprite {
    /// Unique per sprite, never shared with combatant ids.
    pub id: u64,
    pub key: String,
    pub owner: Entity,
    pub side: Side,
    pub damage: f32,
    /// Units per tick.
    pub velocity: Vec2,
    /// Zero means no expiry.
    pub lifetime: Duration,
    pub spawned_at: Duration,
    pub mark_delete: bool,
    /// Cleared on the first hit; a sprite without it deals no damage.
    pub trigger_events: bool,
}

impl ActionSprite {
    /// True while the sprite may still damage something.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.trigger_events && !self.mark_delete
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        !self.lifetime.is_zero() && now.saturating_sub(self.spawned_at) >= self.lifetime
    }
}

/// Last trigger time per action key.
#[derive(Component, Debug, Clone, Default)]
pub struct ActionCooldowns {
    last: HashMap<String, Duration>,
}

impl ActionCooldowns {
    /// Record a trigger of `key` at `now` unless it is still cooling down.
    ///
    /// Returns false (and changes nothing) while `now - last < timeout`.
    pub fn try_begin(&mut self, key: &str, now: Duration, timeout: Duration) -> bool {
        if let Some(last) = self.last.get(key)
            && now.saturating_sub(*last) < timeout
        {
            return false;
        }

        self.last.insert(key.to_string(), now);
        true
    }

    pub fn last_trigger(&self, key: &str) -> Option<Duration> {
        self.last.get(key).copied()
    }
}

/// Source of action sprite ids.
#[derive(Resource, Debug, Default)]
pub struct ActionSequence(u64);

impl ActionSequence {
    pub fn next_id(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}
