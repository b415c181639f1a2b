//! Fixed-step ordering.
//!
//! One simulation tick runs these sets in order. Each plugin places its systems
//! into a set instead of naming systems from other plugins.

use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Completion events from the previous tick (death -> removal).
    Lifecycle,
    /// Drop action sprites marked on an earlier tick.
    Sweep,
    /// Controllers decide destinations and fire intents.
    Intent,
    /// Fire intents become action sprites.
    Trigger,
    /// Action sprites travel and expire.
    Advance,
    Movement,
    Collision,
    Recovery,
    Progress,
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            TickSet::Lifecycle,
            TickSet::Sweep,
            TickSet::Intent,
            TickSet::Trigger,
            TickSet::Advance,
            TickSet::Movement,
            TickSet::Collision,
            TickSet::Recovery,
            TickSet::Progress,
        )
            .chain()
            .run_if(in_state(GameState::Running)),
    );
}
