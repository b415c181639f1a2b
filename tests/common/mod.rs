//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `sidescroll_shooter::game::configure_headless` to install gameplay plugins.
//!
//! Time is advanced manually by exactly one fixed step per `app.update()`, so
//! one update is one simulation tick.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use sidescroll_shooter::common::state::GameState;
use sidescroll_shooter::plugins::combatants::{CombatantId, Roster};
use sidescroll_shooter::plugins::enemies::AiRandom;

/// Bevy's default fixed timestep (64 Hz).
pub const TICK: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));

    sidescroll_shooter::game::configure_headless(&mut app);
    app.insert_resource(AiRandom::seeded(42));
    app
}

pub fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

/// Boot until the first level is loaded and running.
pub fn running_app() -> App {
    let mut app = app_headless();
    tick(&mut app, 3);
    assert_eq!(state(&app), GameState::Running, "level did not finish loading");
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

pub fn roster_ids(app: &App) -> Vec<String> {
    let world = app.world();
    world
        .resource::<Roster>()
        .iter()
        .filter_map(|e| world.get::<CombatantId>(e).map(|id| id.0.clone()))
        .collect()
}

pub fn find(app: &App, id: &str) -> Option<Entity> {
    let world = app.world();
    world
        .resource::<Roster>()
        .iter()
        .find(|e| world.get::<CombatantId>(*e).is_some_and(|c| c.0 == id))
}

pub fn find_in(world: &World, id: &str) -> Entity {
    world
        .resource::<Roster>()
        .iter()
        .find(|e| world.get::<CombatantId>(*e).is_some_and(|c| c.0 == id))
        .expect("combatant on the roster")
}
