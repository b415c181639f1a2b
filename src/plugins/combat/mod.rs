//! Combat and lifecycle.
//!
//! Damage flows one way: a live action sprite overlaps an opposing combatant,
//! the sprite is spent, and the target's vitals absorb the damage. Death is a
//! two-step transition. The hit that empties life moves the target into
//! `LifeState::Dying` and asks for the death animation. The animation's
//! completion (next tick) removes it from the roster.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::geometry::{ArenaPosition, Bounds, VisualSize, boxes_overlap};
use crate::common::tick::TickSet;
use crate::plugins::actions::ActionSprite;
use crate::plugins::animation::{AnimationFinished, AnimationState, PlayAnimation};
use crate::plugins::combatants::{Combatant, CombatantId, LifeState, Roster, Vitals};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            apply_finished_animations.in_set(TickSet::Lifecycle),
            resolve_hits.in_set(TickSet::Collision),
            recharge_shields.in_set(TickSet::Recovery),
        ),
    );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The sprite had already resolved a hit; nothing changed.
    Spent,
    /// Damage applied, target still alive.
    Hit,
    /// Damage applied and the target entered its final state.
    Killed,
    /// Target was already dying; only the sprite was consumed.
    AlreadyDying,
}

/// Resolve one collision between `sprite` and a target.
///
/// The sprite's trigger gate closes before any damage math, so one sprite
/// never damages twice.
pub fn apply_hit(sprite: &mut ActionSprite, vitals: &mut Vitals, life: &mut LifeState) -> HitOutcome {
    if !sprite.is_live() {
        return HitOutcome::Spent;
    }

    sprite.trigger_events = false;
    sprite.mark_delete = true;

    if life.is_dying() {
        return HitOutcome::AlreadyDying;
    }

    vitals.absorb(sprite.damage);

    if !vitals.is_depleted() {
        return HitOutcome::Hit;
    }

    if life.begin_dying() {
        vitals.hide_bars();
    }
    HitOutcome::Killed
}

/// Projectiles against opposing combatants.
///
/// Sprites are checked in id order against targets in roster order; the first
/// overlapping target takes the hit.
pub fn resolve_hits(
    roster: Res<Roster>,
    mut sprites: Query<
        (Entity, &mut ActionSprite, &ArenaPosition, &VisualSize, &CollisionLayers),
        Without<Combatant>,
    >,
    mut targets: Query<
        (
            &CombatantId,
            &mut Vitals,
            &mut LifeState,
            &ArenaPosition,
            &VisualSize,
            &CollisionLayers,
        ),
        With<Combatant>,
    >,
    mut animations: MessageWriter<PlayAnimation>,
) {
    let mut order: Vec<(u64, Entity)> = sprites
        .iter()
        .filter(|(_, sprite, ..)| sprite.is_live())
        .map(|(e, sprite, ..)| (sprite.id, e))
        .collect();
    order.sort_unstable_by_key(|(id, _)| *id);

    for (_, sprite_e) in order {
        let Ok((_, mut sprite, sprite_pos, sprite_size, sprite_layers)) = sprites.get_mut(sprite_e) else {
            continue;
        };
        let sprite_bounds = Bounds::new(sprite_pos.0, sprite_size.0);
        let sprite_layers = *sprite_layers;

        for target in roster.iter() {
            let Ok((id, mut vitals, mut life, pos, size, layers)) = targets.get_mut(target) else {
                continue;
            };
            if !sprite_layers.interacts_with(*layers) {
                continue;
            }
            if !boxes_overlap(sprite_bounds, Bounds::new(pos.0, size.0)) {
                continue;
            }

            match apply_hit(&mut sprite, &mut vitals, &mut life) {
                HitOutcome::Hit => {
                    animations.write(PlayAnimation { target, state: AnimationState::Hit });
                }
                HitOutcome::Killed => {
                    info!("{} destroyed", id.0);
                    animations.write(PlayAnimation { target, state: AnimationState::Death });
                }
                HitOutcome::AlreadyDying => {
                    info!("{} is already in its final state", id.0);
                }
                HitOutcome::Spent => {}
            }
            break;
        }
    }
}

/// A finished death animation removes its combatant and retires its sprites.
pub fn apply_finished_animations(
    mut commands: Commands,
    mut finished: MessageReader<AnimationFinished>,
    mut roster: ResMut<Roster>,
    q_life: Query<(&CombatantId, &LifeState)>,
    mut q_sprites: Query<&mut ActionSprite>,
) {
    for ev in finished.read() {
        if ev.state != AnimationState::Death {
            continue;
        }
        let Ok((id, life)) = q_life.get(ev.target) else {
            continue;
        };
        if !life.is_dying() {
            warn!("Death animation finished for {} while it is still alive", id.0);
            continue;
        }

        roster.remove(ev.target);
        commands.entity(ev.target).despawn();
        debug!("{} removed from roster", id.0);

        for mut sprite in &mut q_sprites {
            if sprite.owner == ev.target {
                sprite.trigger_events = false;
                sprite.mark_delete = true;
            }
        }
    }
}

pub fn recharge_shields(mut q: Query<(&mut Vitals, &LifeState), With<Combatant>>) {
    for (mut vitals, life) in &mut q {
        if life.is_dying() {
            continue;
        }
        vitals.recharge_shield();
    }
}
