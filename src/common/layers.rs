//! Collision layers and teams.
//!
//! Hits are resolved by our own box test, but who may hit whom is expressed with
//! Avian's layer masks so both directions of the filter live in one place.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
    PlayerAction,
    EnemyAction,
}

/// Which team an entity (or the action sprite it fired) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Layers for a combatant body: it is hit by the other team's actions.
    pub fn body_layers(self) -> CollisionLayers {
        match self {
            Side::Player => CollisionLayers::new(Layer::Player, [Layer::EnemyAction]),
            Side::Enemy => CollisionLayers::new(Layer::Enemy, [Layer::PlayerAction]),
        }
    }

    /// Layers for an action sprite fired by this side.
    pub fn action_layers(self) -> CollisionLayers {
        match self {
            Side::Player => CollisionLayers::new(Layer::PlayerAction, [Layer::Enemy]),
            Side::Enemy => CollisionLayers::new(Layer::EnemyAction, [Layer::Player]),
        }
    }
}
