//! Single-axis "move toward target without overshoot".

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MovementError {
    #[error("cannot order current position {current} against target {target}")]
    NonComparable { current: f32, target: f32 },
}

/// Advance `current` by `speed` toward `target`, clamping at `target`.
///
/// `speed` may be pre-signed: a negative speed moves away from `target` and is
/// never clamped. Equal positions are an explicit no-op so floating drift can
/// not make an entity oscillate around its destination.
pub fn advance(current: f32, target: f32, speed: f32) -> Result<f32, MovementError> {
    if current == target {
        return Ok(current);
    }

    if current < target {
        let next = current + speed;
        return Ok(if next > target { target } else { next });
    }

    if current > target {
        let next = current - speed;
        return Ok(if next < target { target } else { next });
    }

    Err(MovementError::NonComparable { current, target })
}

/// Which way `advance` would move along an axis: `-1`, `0` or `1`.
pub fn step_direction(current: f32, target: f32, speed: f32) -> f32 {
    if current == target || speed == 0.0 || current.is_nan() || target.is_nan() {
        return 0.0;
    }

    let toward = if current < target { 1.0 } else { -1.0 };
    toward * speed.signum()
}
