use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::particles::FieldState;
use crate::visual::mesh::pixel_image_from;
use crate::visual::runtime::FieldRuntime;

/// System: Request the source image and put the field in Loading
pub fn start_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<FieldConfig>,
) {
    let image = asset_server.load(config.image_path.clone());
    let mut runtime = FieldRuntime::new(config.clone(), image);
    runtime.field.begin_load();

    info!("Loading particle image {}", config.image_path);
    commands.insert_resource(runtime);
}

/// System: Hand the decoded image (or the failure) to the field once the asset settles
pub fn poll_image_load(
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut runtime: ResMut<FieldRuntime>,
) {
    if runtime.field.state() != FieldState::Loading {
        return;
    }

    let decoded = match asset_server.get_load_state(&runtime.image) {
        Some(LoadState::Loaded) => images
            .get(&runtime.image)
            .ok_or_else(|| FieldError::LoadFailure("image asset vanished after loading".into()))
            .and_then(pixel_image_from),
        Some(LoadState::Failed(err)) => Err(FieldError::LoadFailure(err.to_string())),
        _ => return,
    };

    if let Err(err) = runtime.field.finish_load(decoded) {
        error!("Particle field unavailable: {}", err);
    }
}
