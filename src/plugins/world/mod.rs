//! World plugin: level loading, progression and the pause menu.
//!
//! `GameState::Loading` always means "(re)build the level at
//! `LevelProgress::index`". Clearing a level bumps the index and re-enters
//! `Loading`.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::geometry::MoveBox;
use crate::common::state::GameState;
use crate::common::tick::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::actions::{ActionSprite, PlaySound};
use crate::plugins::catalog::{Catalog, LevelCharacter};
use crate::plugins::combatants::{
    AiBrain, Combatant, NewCombatant, Controller, Roster, Vitals, spawn_combatant,
};

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub index: usize,
}

pub fn plugin(app: &mut App) {
    app.init_resource::<LevelProgress>()
        .add_systems(OnEnter(GameState::Loading), load_level)
        .add_systems(Update, toggle_menu)
        .add_systems(FixedUpdate, check_level_cleared.in_set(TickSet::Progress));
}

/// Where a character's bounding box may travel: enemies keep to the right half.
pub fn arena_for(is_player: bool, design_size: Vec2) -> MoveBox {
    if is_player {
        MoveBox::field(design_size)
    } else {
        MoveBox::new(design_size.x / 2.0, design_size.x, 0.0, design_size.y)
    }
}

/// AI combatants start with their action gate closed as of `now`.
fn new_combatant<'a>(
    placed: &'a LevelCharacter,
    size: Vec2,
    tunables: &Tunables,
    now: Duration,
) -> NewCombatant<'a> {
    let (controller, speed) = if placed.is_player {
        (Controller::Player, tunables.player_speed)
    } else {
        (Controller::Ai(AiBrain { last_action: now }), tunables.enemy_speed)
    };

    NewCombatant {
        id: &placed.id,
        character: &placed.character,
        controller,
        position: placed.position,
        size,
        speed,
        arena: arena_for(placed.is_player, tunables.design_size),
        vitals: Vitals::new(
            placed.life,
            placed.shield,
            placed.shield_recharge_rate,
            tunables.health_bar_width,
        ),
    }
}

fn load_level(
    mut commands: Commands,
    catalog: Res<Catalog>,
    tunables: Res<Tunables>,
    time: Res<Time<Fixed>>,
    mut progress: ResMut<LevelProgress>,
    mut roster: ResMut<Roster>,
    q_previous: Query<Entity, Or<(With<Combatant>, With<ActionSprite>)>>,
    mut sounds: MessageWriter<PlaySound>,
    mut next: ResMut<NextState<GameState>>,
) {
    for e in &q_previous {
        commands.entity(e).despawn();
    }
    roster.clear();

    if catalog.levels.is_empty() {
        error!("No levels configured.");
        return;
    }
    if progress.index >= catalog.levels.len() {
        warn!("Level index {} out of range; starting over.", progress.index);
        progress.index = 0;
    }

    let level = &catalog.levels[progress.index];
    info!("Loading level {} ({})", progress.index, level.name);

    for placed in &level.characters {
        let Some(template) = catalog.character(&placed.character) else {
            error!("Unable to load character {} for level {}", placed.id, level.name);
            continue;
        };

        let new = new_combatant(placed, template.size, &tunables, time.elapsed());
        let e = spawn_combatant(&mut commands, new);
        roster.push(e);
    }

    if let Some(music) = &level.music {
        if catalog.has_sound(&music.id) {
            sounds.write(PlaySound { sound_id: music.id.clone(), volume: music.volume });
        } else {
            error!("Unable to play music {} for level {}", music.id, level.name);
        }
    }

    next.set(GameState::Running);
}

fn check_level_cleared(
    roster: Res<Roster>,
    q: Query<&Controller>,
    mut progress: ResMut<LevelProgress>,
    mut next: ResMut<NextState<GameState>>,
) {
    let enemies_left = roster
        .iter()
        .filter_map(|e| q.get(e).ok())
        .any(|controller| !controller.is_player());
    if enemies_left {
        return;
    }

    progress.index += 1;
    info!("Level cleared; advancing to {}", progress.index);
    next.set(GameState::Loading);
}

fn toggle_menu(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    let Some(keys) = keys else {
        return;
    };
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    match state.get() {
        GameState::Running => next.set(GameState::Menu),
        GameState::Menu => next.set(GameState::Running),
        GameState::Loading => {}
    }
}
