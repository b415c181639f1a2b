//! Movement: blocking resolver + per-axis solver, applied in roster order.
//!
//! Each combatant sees the positions its peers have at the moment it is
//! processed, so an entity that moved earlier in the tick is already at its new
//! place for everyone after it.

use bevy::prelude::*;

use crate::common::geometry::{ArenaPosition, Bounds, VisualSize};
use crate::common::tick::TickSet;
use crate::plugins::combatants::{Controller, LifeState, Motion, Roster, bounds_of};

pub mod pathing;
pub mod solver;

pub use pathing::{OpenDirections, resolve};
pub use solver::{MovementError, advance};

pub fn plugin(app: &mut App) {
    app.add_systems(FixedUpdate, move_combatants.in_set(TickSet::Movement));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Result of trying to step one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
enum AxisStep {
    Moved(f32),
    Idle,
    Blocked,
}

fn step_axis(
    axis: Axis,
    current: f32,
    target: f32,
    speed: f32,
    open: &OpenDirections,
) -> Result<AxisStep, MovementError> {
    let direction = solver::step_direction(current, target, speed);
    if direction == 0.0 {
        // NaN still has to surface as an error
        return solver::advance(current, target, speed).map(|_| AxisStep::Idle);
    }

    let allowed = match axis {
        Axis::X => open.allows_x(direction),
        Axis::Y => open.allows_y(direction),
    };
    if !allowed {
        return Ok(AxisStep::Blocked);
    }

    solver::advance(current, target, speed).map(AxisStep::Moved)
}

pub fn move_combatants(
    roster: Res<Roster>,
    mut q: Query<(
        &Controller,
        &LifeState,
        &mut Motion,
        &mut ArenaPosition,
        &VisualSize,
    )>,
) {
    let mut peers: Vec<(Entity, Bounds)> = roster
        .iter()
        .filter_map(|e| {
            let (_, _, _, pos, size) = q.get(e).ok()?;
            Some((e, bounds_of(pos, size)))
        })
        .collect();

    for slot in 0..peers.len() {
        let (e, source) = peers[slot];
        let Ok((controller, life, mut motion, mut pos, _size)) = q.get_mut(e) else {
            continue;
        };

        if life.is_dying() || !motion.can_move {
            continue;
        }
        let Some(destination) = motion.destination else {
            continue;
        };

        let open = resolve(&motion.arena, &e, source, &peers, motion.speed);

        let (speed_x, speed_y) = match controller {
            Controller::Player => (motion.speed, motion.speed),
            Controller::Ai(_) => (motion.signed_speed_x(), motion.signed_speed_y()),
        };

        match step_axis(Axis::X, pos.x, destination.x, speed_x, &open) {
            Ok(AxisStep::Moved(x)) => pos.x = x,
            Ok(AxisStep::Idle) => {}
            Ok(AxisStep::Blocked) => {
                debug!("Entity {e:?} blocked on x.");
                if !controller.is_player() {
                    motion.reverse_x = !motion.reverse_x;
                }
            }
            Err(err) => error!("Entity {e:?} x movement failed: {err}"),
        }

        match step_axis(Axis::Y, pos.y, destination.y, speed_y, &open) {
            Ok(AxisStep::Moved(y)) => pos.y = y,
            Ok(AxisStep::Idle) => {}
            Ok(AxisStep::Blocked) => {
                debug!("Entity {e:?} blocked on y.");
                if !controller.is_player() {
                    motion.reverse_y = !motion.reverse_y;
                }
            }
            Err(err) => error!("Entity {e:?} y movement failed: {err}"),
        }

        peers[slot].1 = Bounds::new(pos.0, source.size);
    }
}

#[cfg(test)]
mod tests;
