//! Per-tick travel, expiry marking and the deferred sweep.

use bevy::prelude::*;

use crate::common::geometry::{ArenaPosition, Bounds, MoveBox, VisualSize};
use crate::common::tunables::Tunables;

use super::components::ActionSprite;

/// Despawn sprites marked on an earlier tick.
pub fn sweep_marked(mut commands: Commands, q: Query<(Entity, &ActionSprite)>) {
    for (e, sprite) in &q {
        if !sprite.mark_delete {
            continue;
        }

        debug!("Removing action sprite {} ({})", sprite.id, sprite.key);
        commands.entity(e).despawn();
    }
}

/// Integrate velocity and mark sprites that left the field or outlived their
/// lifetime.
pub fn advance_sprites(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut ActionSprite, &mut ArenaPosition, &VisualSize)>,
) {
    let now = time.elapsed();
    let field = MoveBox::field(tunables.design_size);

    for (mut sprite, mut pos, size) in &mut q {
        if sprite.mark_delete {
            continue;
        }

        pos.0 += sprite.velocity;

        if Bounds::new(pos.0, size.0).leaves(&field) || sprite.is_expired(now) {
            sprite.mark_delete = true;
        }
    }
}
