//! Animation collaborator.
//!
//! The simulation asks for a symbolic animation with `PlayAnimation` and learns
//! that it completed through `AnimationFinished`. Completion is a message read at
//! the start of the next tick, never a callback into the middle of one.
//!
//! This driver plays each clip for the duration the character template declares.
//! Every started playback finishes exactly once: either its timer runs out or a
//! newer request replaces it.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::catalog::Catalog;
use crate::plugins::combatants::CharacterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Hit,
    Death,
}

impl AnimationState {
    pub fn name(self) -> &'static str {
        match self {
            AnimationState::Hit => "hit",
            AnimationState::Death => "death",
        }
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayAnimation {
    pub target: Entity,
    pub state: AnimationState,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationFinished {
    pub target: Entity,
    pub state: AnimationState,
}

#[derive(Debug, Clone)]
struct Clip {
    state: AnimationState,
    timer: Timer,
}

/// Current one-shot playback of an entity.
///
/// Always present on combatants; only its contents change.
#[derive(Component, Debug, Clone, Default)]
pub struct Playback {
    current: Option<Clip>,
}

impl Playback {
    pub fn state(&self) -> Option<AnimationState> {
        self.current.as_ref().map(|clip| clip.state)
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlayAnimation>()
        .add_message::<AnimationFinished>()
        .add_systems(
            FixedPostUpdate,
            (start_playback, advance_playback)
                .chain()
                .run_if(in_state(GameState::Running)),
        );
}

fn start_playback(
    catalog: Res<Catalog>,
    mut requests: MessageReader<PlayAnimation>,
    mut finished: MessageWriter<AnimationFinished>,
    mut q: Query<(&CharacterId, &mut Playback)>,
) {
    for req in requests.read() {
        let Ok((character, mut playback)) = q.get_mut(req.target) else {
            continue;
        };

        if let Some(prev) = playback.current.take() {
            finished.write(AnimationFinished { target: req.target, state: prev.state });
        }

        let clip = catalog
            .character(&character.0)
            .and_then(|template| template.clip(req.state));

        let Some(duration) = clip else {
            error!(
                "Character {} does not support animation state {}.",
                character.0,
                req.state.name()
            );
            finished.write(AnimationFinished { target: req.target, state: req.state });
            continue;
        };

        playback.current = Some(Clip {
            state: req.state,
            timer: Timer::new(duration, TimerMode::Once),
        });
    }
}

fn advance_playback(
    time: Res<Time<Fixed>>,
    mut finished: MessageWriter<AnimationFinished>,
    mut q: Query<(Entity, &mut Playback)>,
) {
    for (e, mut playback) in &mut q {
        let Some(clip) = playback.current.as_mut() else {
            continue;
        };

        clip.timer.tick(time.delta());
        if clip.timer.is_finished() {
            let state = clip.state;
            playback.current = None;
            finished.write(AnimationFinished { target: e, state });
        }
    }
}
