use bevy::prelude::*;

mod camera;
mod config;
mod error;
mod input;
mod particles;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use config::FieldConfig;
use error::FieldError;
use input::InputPlugin;
use visual::{ParticleFieldPlugin, ParticleMaterialPlugin};

fn main() -> Result<(), FieldError> {
    // First argument, when given, replaces the configured image
    let config = FieldConfig::load()?.with_image_override(std::env::args().nth(1));

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Touch Particles".into(),
            resolution: WindowResolution::new(1280, 800),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(config)
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(ParticleMaterialPlugin)
    .add_plugins(ParticleFieldPlugin);

    app.run();
    Ok(())
}
