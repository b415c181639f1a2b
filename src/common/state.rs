//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    /// Loading the current level; moves to `Running` once spawned.
    #[default]
    Loading,
    Running,
    Menu,
}
