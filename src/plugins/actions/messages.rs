//! Producer -> consumer messages of the action pipeline.
//!
//! Controllers only write intent (`FireAction`). The trigger consumer is the
//! single place that validates, applies cooldowns and spawns.

use bevy::prelude::*;

#[derive(Message, Clone, Debug, PartialEq)]
pub struct FireAction {
    pub shooter: Entity,
    pub key: String,
}

/// Fire-and-forget sound request for the audio side.
#[derive(Message, Clone, Debug, PartialEq)]
pub struct PlaySound {
    pub sound_id: String,
    pub volume: f32,
}
