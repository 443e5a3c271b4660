use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;

use crate::config::FieldConfig;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_camera);
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Perspective camera on the +Z axis looking back at the field plane
///
/// ```text
///        Y (up on screen)
///        ↑
///        |
///        +---→ X (right on screen)
///       /
///      ↙ Z (towards the viewer)
/// ```
///
/// The field lies in the XY plane (z=0), centred on the origin.
fn setup_camera(mut commands: Commands, config: Res<FieldConfig>) {
    let projection = Projection::Perspective(PerspectiveProjection {
        fov: config.camera.fov_degrees.to_radians(),
        near: 1.0,
        far: config.camera.distance * 10.0,
        ..default()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        // Shaded greys should reach the screen untouched
        Tonemapping::None,
        Transform::from_xyz(0.0, 0.0, config.camera.distance).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}
