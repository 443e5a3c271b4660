use bevy::pbr::{Material, MaterialPlugin};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use crate::particles::RenderState;

const SHADER_PATH: &str = "shaders/particles.wgsl";

pub struct ParticleMaterialPlugin;

impl Plugin for ParticleMaterialPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<ParticleMaterial>::default());
    }
}

/// Scalar inputs of the particle shader (16-byte aligned)
#[derive(ShaderType, Debug, Clone, Copy, Default, PartialEq)]
pub struct ParticleUniform {
    pub time: f32,
    pub randomness: f32,
    pub depth: f32,
    pub size: f32,
    /// Source image size in pixels
    pub texture_size: Vec2,
    pub _padding: Vec2,
}

impl ParticleUniform {
    pub fn from_render_state(state: &RenderState<'_>) -> Self {
        Self {
            time: state.time,
            randomness: state.params.randomness,
            depth: state.params.depth,
            size: state.params.size,
            texture_size: Vec2::new(state.points.width() as f32, state.points.height() as f32),
            _padding: Vec2::ZERO,
        }
    }
}

/// Material for the whole point field: one quad per particle
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct ParticleMaterial {
    #[uniform(0)]
    pub params: ParticleUniform,

    /// Source image, sampled for particle brightness
    #[texture(1)]
    #[sampler(2)]
    pub image: Handle<Image>,

    /// Displacement bitmap painted from the touch trail
    #[texture(3)]
    #[sampler(4)]
    pub touch: Handle<Image>,
}

impl Material for ParticleMaterial {
    fn vertex_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Blend
    }
}
