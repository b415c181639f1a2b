//! Common, shared types.

pub mod geometry;
pub mod layers;
pub mod state;
pub mod tick;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
