use bevy::prelude::*;

use crate::camera::MainCamera;
use crate::config::FieldConfig;
use crate::input::{PointerEvent, PointerEventType};
use crate::visual::runtime::FieldRuntime;

/// System: Turn pointer moves over the image into touches on the field
pub fn route_pointer_to_field(
    mut pointer_events: MessageReader<PointerEvent>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut runtime: ResMut<FieldRuntime>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for event in pointer_events.read() {
        if !runtime.field.is_listening() {
            // Drain the rest; nothing is listening this frame
            continue;
        }
        if event.event_type == PointerEventType::Up {
            continue;
        }

        let Some(world_pos) = event.to_world_position(camera, camera_transform) else {
            continue;
        };
        runtime.field.touch_at(world_pos.x, world_pos.y);
    }
}

/// System: Keyboard controls for the field lifecycle
///
/// S show, H hide, D hide then destroy, X destroy immediately
pub fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<FieldConfig>,
    mut runtime: ResMut<FieldRuntime>,
) {
    let animation = config.animation;
    let field = &mut runtime.field;

    if keys.just_pressed(KeyCode::KeyS) && field.show(animation.show_duration) {
        info!("Showing particle field");
    }
    if keys.just_pressed(KeyCode::KeyH) && field.hide(false, animation.hide_duration).is_some() {
        info!("Hiding particle field");
    }
    if keys.just_pressed(KeyCode::KeyD) && field.hide(true, animation.hide_duration).is_some() {
        info!("Hiding and destroying particle field");
    }
    if keys.just_pressed(KeyCode::KeyX) && field.destroy() {
        info!("Destroying particle field");
    }
}
