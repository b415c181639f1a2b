//! Feature plugins.

use bevy::prelude::*;

pub mod actions;
pub mod animation;
pub mod catalog;
pub mod combat;
pub mod combatants;
pub mod core;
pub mod enemies;
pub mod movement;
pub mod player;
pub mod world;

// Render-only
pub mod render;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    catalog::plugin(app);
    combatants::plugin(app);
    animation::plugin(app);
    actions::plugin(app);
    movement::plugin(app);
    combat::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    world::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    render::plugin(app);
}
