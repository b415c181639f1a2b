//! Built-in content.

use std::time::Duration;

use bevy::platform::collections::{HashMap, HashSet};
use bevy::prelude::*;

use super::*;

fn visual(id: &str, size: Vec2, sound: Option<(&str, f32)>) -> (String, VisualTemplate) {
    (
        id.to_string(),
        VisualTemplate {
            id: id.to_string(),
            size,
            sound: sound.map(|(id, volume)| SoundCue { id: id.to_string(), volume }),
        },
    )
}

#[allow(clippy::too_many_arguments)]
fn action(
    id: &str,
    visual: &str,
    damage: f32,
    velocity: Vec2,
    offset: Vec2,
    scale: Option<Vec2>,
    trigger_timeout_ms: u64,
    lifetime_ms: u64,
) -> (String, ActionTemplate) {
    (
        id.to_string(),
        ActionTemplate {
            id: id.to_string(),
            visual: visual.to_string(),
            damage,
            velocity,
            offset,
            scale,
            trigger_timeout: Duration::from_millis(trigger_timeout_ms),
            lifetime: Duration::from_millis(lifetime_ms),
        },
    )
}

fn clips(hit_ms: u64, death_ms: u64) -> HashMap<AnimationState, Duration> {
    let mut clips = HashMap::default();
    clips.insert(AnimationState::Hit, Duration::from_millis(hit_ms));
    clips.insert(AnimationState::Death, Duration::from_millis(death_ms));
    clips
}

fn character(
    id: &str,
    size: Vec2,
    color: Color,
    actions: impl IntoIterator<Item = (String, ActionTemplate)>,
    clips: HashMap<AnimationState, Duration>,
) -> (String, CharacterTemplate) {
    let mut table = HashMap::default();
    for (key, template) in actions {
        table.insert(key, template);
    }

    (
        id.to_string(),
        CharacterTemplate {
            id: id.to_string(),
            size,
            color,
            actions: table,
            clips,
        },
    )
}

fn placed(
    id: &str,
    character: &str,
    is_player: bool,
    position: Vec2,
    life: f32,
    shield: f32,
    shield_recharge_rate: f32,
) -> LevelCharacter {
    LevelCharacter {
        id: id.to_string(),
        character: character.to_string(),
        is_player,
        position,
        life,
        shield,
        shield_recharge_rate,
    }
}

pub(super) fn catalog() -> Catalog {
    let mut visuals = HashMap::default();
    for (id, template) in [
        visual("laser", Vec2::new(24.0, 6.0), Some(("laser_shot", 0.4))),
        visual("enemy_laser", Vec2::new(24.0, 6.0), Some(("laser_shot", 0.3))),
        visual("missile", Vec2::new(32.0, 12.0), Some(("missile_launch", 0.6))),
    ] {
        visuals.insert(id, template);
    }

    let mut sounds = HashSet::default();
    for id in ["laser_shot", "missile_launch", "level_music"] {
        sounds.insert(id.to_string());
    }

    let mut characters = HashMap::default();
    for (id, template) in [
        character(
            "fighter",
            Vec2::new(96.0, 48.0),
            Color::srgb(0.2, 0.75, 0.9),
            [action("fire", "laser", 10.0, Vec2::new(14.0, 0.0), Vec2::new(96.0, 21.0), None, 250, 0)],
            clips(180, 700),
        ),
        character(
            "drone",
            Vec2::new(80.0, 64.0),
            Color::srgb(0.9, 0.25, 0.25),
            [
                action("fire", "enemy_laser", 8.0, Vec2::new(-10.0, 0.0), Vec2::new(-24.0, 29.0), None, 750, 0),
                action(
                    "missile",
                    "missile",
                    25.0,
                    Vec2::new(-7.0, 0.0),
                    Vec2::new(-32.0, 26.0),
                    Some(Vec2::splat(1.25)),
                    1500,
                    6000,
                ),
            ],
            clips(150, 500),
        ),
        character(
            "gunship",
            Vec2::new(128.0, 80.0),
            Color::srgb(0.85, 0.5, 0.2),
            [
                action("fire", "enemy_laser", 12.0, Vec2::new(-12.0, 0.0), Vec2::new(-24.0, 37.0), None, 500, 0),
                action("missile", "missile", 30.0, Vec2::new(-8.0, 0.0), Vec2::new(-32.0, 34.0), Some(Vec2::splat(1.5)), 1200, 6000),
            ],
            clips(150, 800),
        ),
    ] {
        characters.insert(id, template);
    }

    let levels = vec![
        LevelTemplate {
            name: "Outer Rim".to_string(),
            music: Some(SoundCue { id: "level_music".to_string(), volume: 0.5 }),
            characters: vec![
                placed("player", "fighter", true, Vec2::new(160.0, 500.0), 100.0, 50.0, 0.05),
                placed("drone-1", "drone", false, Vec2::new(1300.0, 200.0), 40.0, 20.0, 0.02),
                placed("drone-2", "drone", false, Vec2::new(1500.0, 700.0), 40.0, 20.0, 0.02),
            ],
        },
        LevelTemplate {
            name: "Relay Station".to_string(),
            music: Some(SoundCue { id: "level_music".to_string(), volume: 0.5 }),
            characters: vec![
                placed("player", "fighter", true, Vec2::new(160.0, 500.0), 100.0, 50.0, 0.05),
                placed("drone-1", "drone", false, Vec2::new(1200.0, 150.0), 40.0, 20.0, 0.02),
                placed("drone-2", "drone", false, Vec2::new(1400.0, 850.0), 40.0, 20.0, 0.02),
                placed("gunship-1", "gunship", false, Vec2::new(1600.0, 480.0), 120.0, 60.0, 0.04),
            ],
        },
    ];

    Catalog {
        visuals,
        sounds,
        characters,
        levels,
    }
}
