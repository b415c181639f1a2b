//! Core plugin: shared resources, global settings and the tick order.

use bevy::prelude::*;

use crate::common::tick;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.06)));
    tick::configure(app);
}
