//! Game content: visuals, sounds, characters with their action templates, and levels.
//!
//! Everything in here is immutable shared configuration. Entities refer to it by
//! id and copy what they need at spawn time.

use std::time::Duration;

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use crate::plugins::animation::AnimationState;

mod defaults;

/// A sound effect reference declared by a visual template.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundCue {
    pub id: String,
    pub volume: f32,
}

/// Something that can be drawn for an action: its size and the sound it makes.
#[derive(Debug, Clone)]
pub struct VisualTemplate {
    pub id: String,
    pub size: Vec2,
    pub sound: Option<SoundCue>,
}

/// What firing an action produces.
#[derive(Debug, Clone)]
pub struct ActionTemplate {
    pub id: String,
    /// Key into `Catalog::visuals`.
    pub visual: String,
    pub damage: f32,
    /// Units per tick.
    pub velocity: Vec2,
    /// Spawn offset from the firing entity's position.
    pub offset: Vec2,
    pub scale: Option<Vec2>,
    /// Minimum time between two firings of this action by the same entity.
    pub trigger_timeout: Duration,
    /// Zero means the sprite lives until it leaves the field or hits something.
    pub lifetime: Duration,
}

#[derive(Debug, Clone)]
pub struct CharacterTemplate {
    pub id: String,
    pub size: Vec2,
    pub color: Color,
    pub actions: HashMap<String, ActionTemplate>,
    /// Playback length of each animation state this character supports.
    pub clips: HashMap<AnimationState, Duration>,
}

impl CharacterTemplate {
    pub fn action(&self, key: &str) -> Option<&ActionTemplate> {
        self.actions.get(key)
    }

    pub fn clip(&self, state: AnimationState) -> Option<Duration> {
        self.clips.get(&state).copied()
    }
}

/// One character placed in a level.
#[derive(Debug, Clone)]
pub struct LevelCharacter {
    pub id: String,
    /// Key into `Catalog::characters`.
    pub character: String,
    pub is_player: bool,
    pub position: Vec2,
    pub life: f32,
    pub shield: f32,
    pub shield_recharge_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LevelTemplate {
    pub name: String,
    /// Played once when the level loads.
    pub music: Option<SoundCue>,
    pub characters: Vec<LevelCharacter>,
}

#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    pub visuals: HashMap<String, VisualTemplate>,
    /// Sound ids the audio side knows how to play.
    pub sounds: HashSet<String>,
    pub characters: HashMap<String, CharacterTemplate>,
    pub levels: Vec<LevelTemplate>,
}

impl Catalog {
    pub fn character(&self, id: &str) -> Option<&CharacterTemplate> {
        self.characters.get(id)
    }

    pub fn visual(&self, id: &str) -> Option<&VisualTemplate> {
        self.visuals.get(id)
    }

    pub fn has_sound(&self, id: &str) -> bool {
        self.sounds.contains(id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        defaults::catalog()
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Catalog>();
}
