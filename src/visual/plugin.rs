use crate::visual::interactions::{keyboard_controls, route_pointer_to_field};
use crate::visual::loading::{poll_image_load, start_loading};
use crate::visual::sync::{apply_field_events, refit_on_resize, sync_field_material, tick_field};
use bevy::prelude::*;

pub struct ParticleFieldPlugin;

impl Plugin for ParticleFieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_loading).add_systems(
            Update,
            (
                // Async boundary: image decode
                poll_image_load,
                // Interaction
                keyboard_controls,
                route_pointer_to_field,
                // Frame tick
                tick_field,
                apply_field_events,
                refit_on_resize,
                // GPU sync
                sync_field_material,
            )
                .chain(),
        );
    }
}
