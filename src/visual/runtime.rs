use bevy::prelude::*;

use crate::config::FieldConfig;
use crate::particles::ParticleField;
use crate::visual::material::ParticleMaterial;

/// Marker for the entity drawing the point field
#[derive(Component)]
pub struct ParticleFieldMesh;

/// GPU-side objects that live while the field is built
#[derive(Debug, Clone)]
pub struct FieldRender {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<ParticleMaterial>,
    pub touch: Handle<Image>,
}

/// The one particle field in the app and what it has spawned
#[derive(Resource)]
pub struct FieldRuntime {
    pub field: ParticleField,
    /// Source image as requested from the asset server
    pub image: Handle<Image>,
    pub render: Option<FieldRender>,
}

impl FieldRuntime {
    pub fn new(config: FieldConfig, image: Handle<Image>) -> Self {
        Self {
            field: ParticleField::new(config),
            image,
            render: None,
        }
    }
}
