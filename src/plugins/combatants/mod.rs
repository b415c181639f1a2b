//! Combatants: the shared representation of player- and AI-controlled entities.
//!
//! Player and enemies are the same bundle of components. Only `Controller`
//! differs, and it is what supplies the per-tick intent (destination and fire
//! decisions). Movement, health and action sprites are shared mechanics that
//! work over this representation.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::geometry::{ArenaPosition, Bounds, MoveBox, VisualSize};
use crate::common::layers::Side;
use crate::plugins::actions::components::ActionCooldowns;
use crate::plugins::animation::Playback;

pub mod vitals;

pub use vitals::{BarWidths, Vitals};

/// Marker for anything in the active roster.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Combatant;

/// Stable, level-unique id of a combatant.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CombatantId(pub String);

/// Key of the character template this combatant was built from.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct CharacterId(pub String);

/// AI-local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiBrain {
    /// When this enemy last fired anything; gates the next firing decision.
    pub last_action: Duration,
}

/// Who decides what this combatant wants each tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Player,
    Ai(AiBrain),
}

impl Controller {
    pub fn side(&self) -> Side {
        match self {
            Controller::Player => Side::Player,
            Controller::Ai(_) => Side::Enemy,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        matches!(self, Controller::Player)
    }
}

/// Movement intent and constraints.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Motion {
    pub destination: Option<Vec2>,
    pub can_move: bool,
    /// Units per tick.
    pub speed: f32,
    /// Prefer moving away from the destination on x.
    pub reverse_x: bool,
    /// Prefer moving away from the destination on y.
    pub reverse_y: bool,
    /// Where this combatant's bounding box may travel.
    pub arena: MoveBox,
}

impl Motion {
    pub fn new(speed: f32, arena: MoveBox) -> Self {
        Self {
            destination: None,
            can_move: true,
            speed,
            reverse_x: false,
            reverse_y: false,
            arena,
        }
    }

    /// Horizontal speed with the reverse bias applied.
    #[inline]
    pub fn signed_speed_x(&self) -> f32 {
        if self.reverse_x { -self.speed } else { self.speed }
    }

    /// Vertical speed with the reverse bias applied.
    #[inline]
    pub fn signed_speed_y(&self) -> f32 {
        if self.reverse_y { -self.speed } else { self.speed }
    }
}

/// Lifecycle of a combatant.
///
/// `Dying` is terminal; the entity leaves the roster when its death animation
/// completes.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifeState {
    #[default]
    Alive,
    Dying,
}

impl LifeState {
    #[inline]
    pub fn is_dying(self) -> bool {
        matches!(self, LifeState::Dying)
    }

    /// One-way transition into the final state. Returns false if already there.
    pub fn begin_dying(&mut self) -> bool {
        if self.is_dying() {
            return false;
        }
        *self = LifeState::Dying;
        true
    }
}

/// Active combatants in insertion order.
///
/// Per-tick processing walks this list so ordering does not depend on archetype
/// layout. Removal is a compaction (`retain`), never a splice mid-walk.
#[derive(Resource, Debug, Clone, Default)]
pub struct Roster {
    entities: Vec<Entity>,
}

impl Roster {
    pub fn push(&mut self, e: Entity) {
        if !self.entities.contains(&e) {
            self.entities.push(e);
        }
    }

    pub fn remove(&mut self, e: Entity) -> bool {
        let before = self.entities.len();
        self.entities.retain(|x| *x != e);
        self.entities.len() != before
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Everything a freshly loaded combatant needs.
pub struct NewCombatant<'a> {
    pub id: &'a str,
    pub character: &'a str,
    pub controller: Controller,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub arena: MoveBox,
    pub vitals: Vitals,
}

pub fn spawn_combatant(commands: &mut Commands, new: NewCombatant<'_>) -> Entity {
    let side = new.controller.side();

    commands
        .spawn((
            Name::new(format!("Combatant({})", new.id)),
            Combatant,
            CombatantId(new.id.to_string()),
            CharacterId(new.character.to_string()),
            new.controller,
            ArenaPosition(new.position),
            VisualSize(new.size),
            Motion::new(new.speed, new.arena),
            new.vitals,
            LifeState::Alive,
            ActionCooldowns::default(),
            Playback::default(),
            side.body_layers(),
        ))
        .id()
}

#[inline]
pub fn bounds_of(pos: &ArenaPosition, size: &VisualSize) -> Bounds {
    Bounds::new(pos.0, size.0)
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Roster>();
}
