//! Actions: cooldown-gated firing and the in-flight sprites it produces.
//!
//! ```text
//!  Intent      FireAction  (player input / AI roll)
//!  Trigger     trigger_actions   lookup -> cooldown -> spawn -> PlaySound
//!  Advance     advance_sprites   velocity, out of field, lifetime -> mark_delete
//!  (hits)      combat marks sprites it resolved
//!  Sweep       sweep_marked      despawn on the next tick
//! ```

use bevy::prelude::*;

use crate::common::tick::TickSet;

pub mod components;
pub mod messages;
pub mod sweep;
pub mod trigger;

pub use components::{ActionCooldowns, ActionSequence, ActionSprite};
pub use messages::{FireAction, PlaySound};
pub use trigger::{ActionError, plan_trigger};

pub fn plugin(app: &mut App) {
    app.init_resource::<ActionSequence>()
        .add_message::<FireAction>()
        .add_message::<PlaySound>()
        .add_systems(
            FixedUpdate,
            (
                sweep::sweep_marked.in_set(TickSet::Sweep),
                trigger::trigger_actions.in_set(TickSet::Trigger),
                sweep::advance_sprites.in_set(TickSet::Advance),
            ),
        );
}

#[cfg(test)]
mod tests;
