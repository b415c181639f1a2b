//! Consumer: turn `FireAction` intents into action sprites.

use bevy::prelude::*;
use thiserror::Error;

use crate::common::geometry::{ArenaPosition, VisualSize};
use crate::plugins::catalog::{ActionTemplate, Catalog, VisualTemplate};
use crate::plugins::combatants::{CharacterId, Controller, LifeState};

use super::components::{ActionCooldowns, ActionSequence, ActionSprite};
use super::messages::{FireAction, PlaySound};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("unknown character {0}")]
    UnknownCharacter(String),
    #[error("character {character} does not have an action {key}")]
    UnknownAction { character: String, key: String },
    #[error("action {key} uses unknown visual {visual}")]
    MissingVisual { key: String, visual: String },
}

/// Templates needed to fire one action.
#[derive(Debug, Clone, Copy)]
pub struct TriggerPlan<'a> {
    pub action: &'a ActionTemplate,
    pub visual: &'a VisualTemplate,
}

impl TriggerPlan<'_> {
    /// Spawn size: the visual's size with the action's scale applied.
    pub fn size(&self) -> Vec2 {
        self.visual.size * self.action.scale.unwrap_or(Vec2::ONE)
    }
}

pub fn plan_trigger<'a>(
    catalog: &'a Catalog,
    character: &str,
    key: &str,
) -> Result<TriggerPlan<'a>, ActionError> {
    let template = catalog
        .character(character)
        .ok_or_else(|| ActionError::UnknownCharacter(character.to_string()))?;

    let action = template.action(key).ok_or_else(|| ActionError::UnknownAction {
        character: character.to_string(),
        key: key.to_string(),
    })?;

    let visual = catalog.visual(&action.visual).ok_or_else(|| ActionError::MissingVisual {
        key: key.to_string(),
        visual: action.visual.clone(),
    })?;

    Ok(TriggerPlan { action, visual })
}

pub fn trigger_actions(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    catalog: Res<Catalog>,
    mut sequence: ResMut<ActionSequence>,
    mut requests: MessageReader<FireAction>,
    mut sounds: MessageWriter<PlaySound>,
    mut q: Query<(
        &CharacterId,
        &Controller,
        &LifeState,
        &ArenaPosition,
        &mut ActionCooldowns,
    )>,
) {
    let now = time.elapsed();

    for req in requests.read() {
        let Ok((character, controller, life, pos, mut cooldowns)) = q.get_mut(req.shooter) else {
            continue;
        };
        if life.is_dying() {
            continue;
        }

        let plan = match plan_trigger(&catalog, &character.0, &req.key) {
            Ok(plan) => plan,
            Err(err) => {
                error!("Dropping action: {err}");
                continue;
            }
        };

        if !cooldowns.try_begin(&req.key, now, plan.action.trigger_timeout) {
            debug!("{} still cooling down for {}", character.0, req.key);
            continue;
        }

        let side = controller.side();
        let id = sequence.next_id();

        commands.spawn((
            Name::new(format!("ActionSprite({}#{id})", req.key)),
            ActionSprite {
                id,
                key: req.key.clone(),
                owner: req.shooter,
                side,
                damage: plan.action.damage,
                velocity: plan.action.velocity,
                lifetime: plan.action.lifetime,
                spawned_at: now,
                mark_delete: false,
                trigger_events: true,
            },
            ArenaPosition(pos.0 + plan.action.offset),
            VisualSize(plan.size()),
            side.action_layers(),
        ));

        if let Some(cue) = &plan.visual.sound {
            if catalog.has_sound(&cue.id) {
                sounds.write(PlaySound { sound_id: cue.id.clone(), volume: cue.volume });
            } else {
                error!("Unable to play sound {} for action {}", cue.id, req.key);
            }
        }
    }
}
