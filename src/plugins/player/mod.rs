//! Player controller.
//!
//! Pipeline:
//! - Update: sample keyboard input into `PlayerIntent` (the render glue adds
//!   pointer clicks)
//! - FixedUpdate (Intent): turn the intent into a destination and fire requests
//!
//! Fire and click requests are latched until a fixed tick consumes them, so a
//! press between two ticks is never lost. Held movement keys are level-triggered.

use bevy::prelude::*;

use crate::common::geometry::{ArenaPosition, MoveBox};
use crate::common::tick::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::actions::FireAction;
use crate::plugins::combatants::{Controller, LifeState, Motion};

/// Action the player fires with the keyboard or a click on the enemy half.
pub const PLAYER_FIRE_KEY: &str = "fire";

#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct PlayerIntent {
    /// Held direction in arena axes (`y` grows downwards).
    pub move_axis: Vec2,
    pub fire: bool,
    /// Last click, in arena coordinates.
    pub pointer_click: Option<Vec2>,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerIntent>()
        .add_systems(Update, gather_input)
        .add_systems(FixedUpdate, drive_player.in_set(TickSet::Intent));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut intent: ResMut<PlayerIntent>) {
    let Some(keys) = keys else {
        return;
    };

    let mut axis = Vec2::ZERO;

    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    intent.move_axis = axis;
    if keys.pressed(KeyCode::Space) {
        intent.fire = true;
    }
}

fn drive_player(
    tunables: Res<Tunables>,
    mut intent: ResMut<PlayerIntent>,
    mut q: Query<(Entity, &Controller, &LifeState, &ArenaPosition, &mut Motion)>,
    mut fire: MessageWriter<FireAction>,
) {
    let fire_pressed = std::mem::take(&mut intent.fire);
    let click = intent.pointer_click.take();

    let Some((e, _, life, pos, mut motion)) = q
        .iter_mut()
        .find(|(_, controller, ..)| controller.is_player())
    else {
        return;
    };
    if life.is_dying() {
        return;
    }

    if intent.move_axis != Vec2::ZERO {
        motion.destination = Some(pos.0 + intent.move_axis * tunables.keyboard_step);
    }

    if fire_pressed {
        fire.write(FireAction { shooter: e, key: PLAYER_FIRE_KEY.to_string() });
    }

    let Some(click) = click else {
        return;
    };

    let field = MoveBox::field(tunables.design_size);
    if click.x < field.min_x || click.y < field.min_y || click.x > field.max_x || click.y > field.max_y {
        debug!("Click registered outside the field. Ignoring...");
        return;
    }

    if click.x < field.min_x + field.width() / 2.0 {
        motion.destination = Some(click);
    } else if !fire_pressed {
        fire.write(FireAction { shooter: e, key: PLAYER_FIRE_KEY.to_string() });
    }
}
