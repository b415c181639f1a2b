//! Render glue (render-only).
//!
//! The simulation lives in arena coordinates (origin top-left, `y` down). This
//! plugin mirrors it into Bevy's centred, `y`-up world:
//!
//! ```text
//! Startup:  MainCamera scaled so the whole design area fits the window
//! Update:   Added<Combatant>    -> Sprite + status bar children
//!           Added<ActionSprite> -> Sprite
//!           ArenaPosition       -> Transform
//!           Vitals::bars()      -> bar widths
//!           left click          -> PlayerIntent::pointer_click
//! ```
//!
//! Queries that read one `Transform` while writing another carry
//! `Without<...>` filters so Bevy can prove they are disjoint.

use bevy::prelude::*;

use crate::common::geometry::{ArenaPosition, VisualSize};
use crate::common::layers::Side;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::actions::{ActionSprite, PlaySound};
use crate::plugins::catalog::Catalog;
use crate::plugins::combatants::{CharacterId, Combatant, Vitals};
use crate::plugins::player::PlayerIntent;

const COMBATANT_Z: f32 = 1.0;
const ACTION_Z: f32 = 2.0;
const BAR_GAP: f32 = 6.0;

#[derive(Component)]
pub struct MainCamera;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Background,
    Life,
    Shield,
}

/// One status bar strip, child of the combatant it describes.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatusBar {
    pub owner: Entity,
    pub kind: BarKind,
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        Update,
        (
            attach_combatant_visuals,
            attach_action_visuals,
            sync_transforms,
            sync_status_bars,
            pointer_to_intent.run_if(in_state(GameState::Running)),
            log_sound_cues,
        )
            .chain(),
    );
}

/// Centre of an arena box in world space.
pub fn arena_to_world(pos: Vec2, size: Vec2, design: Vec2) -> Vec2 {
    Vec2::new(
        pos.x + size.x / 2.0 - design.x / 2.0,
        design.y / 2.0 - (pos.y + size.y / 2.0),
    )
}

/// World-space point to arena coordinates.
pub fn world_to_arena(point: Vec2, design: Vec2) -> Vec2 {
    Vec2::new(point.x + design.x / 2.0, design.y / 2.0 - point.y)
}

/// Horizontal offset that left-aligns a strip of `width` inside a bar of `full`.
pub fn bar_offset(width: f32, full: f32) -> f32 {
    (width - full) / 2.0
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>, windows: Query<&Window>) {
    let scale = match windows.single() {
        Ok(window) => (tunables.design_size.x / window.width()).max(tunables.design_size.y / window.height()),
        Err(e) => {
            debug!("No single Window: {e:?}");
            1.0
        }
    };

    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        Projection::from(OrthographicProjection {
            scale,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

fn bar_color(kind: BarKind) -> Color {
    match kind {
        BarKind::Background => Color::srgb(0.15, 0.15, 0.18),
        BarKind::Life => Color::srgb(0.3, 0.85, 0.35),
        BarKind::Shield => Color::srgb(0.3, 0.6, 1.0),
    }
}

fn attach_combatant_visuals(
    mut commands: Commands,
    catalog: Res<Catalog>,
    tunables: Res<Tunables>,
    q: Query<(Entity, &CharacterId, &VisualSize, &Vitals), Added<Combatant>>,
) {
    for (e, character, size, vitals) in &q {
        let color = catalog
            .character(&character.0)
            .map(|template| template.color)
            .unwrap_or(Color::WHITE);

        commands.entity(e).insert((
            Sprite {
                color,
                custom_size: Some(size.0),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, COMBATANT_Z),
        ));

        let height = tunables.health_bar_height;
        let top = size.y / 2.0 + BAR_GAP + height / 2.0;
        let rows = [
            (BarKind::Background, top, 0.1),
            (BarKind::Life, top, 0.2),
            (BarKind::Shield, top + height, 0.2),
        ];

        commands.entity(e).with_children(|parent| {
            for (kind, y, z) in rows {
                parent.spawn((
                    Name::new(format!("{kind:?}Bar")),
                    StatusBar { owner: e, kind },
                    Sprite {
                        color: bar_color(kind),
                        custom_size: Some(Vec2::new(vitals.bar_width(), height)),
                        ..default()
                    },
                    Transform::from_xyz(0.0, y, z),
                ));
            }
        });
    }
}

fn attach_action_visuals(
    mut commands: Commands,
    q: Query<(Entity, &ActionSprite, &VisualSize), Added<ActionSprite>>,
) {
    for (e, sprite, size) in &q {
        let color = match sprite.side {
            Side::Player => Color::srgb(0.5, 0.95, 1.0),
            Side::Enemy => Color::srgb(1.0, 0.45, 0.3),
        };

        commands.entity(e).insert((
            Sprite {
                color,
                custom_size: Some(size.0),
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, ACTION_Z),
        ));
    }
}

fn sync_transforms(
    tunables: Res<Tunables>,
    mut q: Query<(&ArenaPosition, &VisualSize, &mut Transform), Without<StatusBar>>,
) {
    for (pos, size, mut tf) in &mut q {
        let world = arena_to_world(pos.0, size.0, tunables.design_size);
        tf.translation.x = world.x;
        tf.translation.y = world.y;
    }
}

fn sync_status_bars(
    q_vitals: Query<&Vitals, Changed<Vitals>>,
    mut q_bars: Query<(&StatusBar, &mut Sprite, &mut Transform)>,
) {
    for (bar, mut sprite, mut tf) in &mut q_bars {
        let Ok(vitals) = q_vitals.get(bar.owner) else {
            continue;
        };

        let widths = vitals.bars();
        let width = match bar.kind {
            BarKind::Background => widths.background,
            BarKind::Life => widths.life,
            BarKind::Shield => widths.shield,
        };
        // hidden bars collapse together with their background
        let width = if widths.background == 0.0 { 0.0 } else { width };

        if let Some(size) = sprite.custom_size.as_mut() {
            size.x = width;
        }
        tf.translation.x = bar_offset(width, vitals.bar_width());
    }
}

fn pointer_to_intent(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    tunables: Res<Tunables>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut intent: ResMut<PlayerIntent>,
) {
    let Some(buttons) = buttons else {
        return;
    };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let window = match windows.single() {
        Ok(w) => w,
        Err(e) => {
            debug!("No single Window: {e:?}");
            return;
        }
    };
    let Some(cursor) = window.cursor_position() else {
        debug!("Cursor position is None");
        return;
    };
    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => {
            debug!("No single MainCamera: {e:?}");
            return;
        }
    };
    let world_cursor = match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => p,
        Err(e) => {
            debug!("viewport_to_world_2d failed: {e:?}");
            return;
        }
    };

    intent.pointer_click = Some(world_to_arena(world_cursor, tunables.design_size));
}

fn log_sound_cues(mut sounds: MessageReader<PlaySound>) {
    for cue in sounds.read() {
        debug!("Sound {} at volume {}", cue.sound_id, cue.volume);
    }
}
