pub mod interactions;
pub mod loading;
pub mod material;
pub mod mesh;
pub mod plugin;
pub mod runtime;
pub mod sync;

pub use material::{ParticleMaterial, ParticleMaterialPlugin};
pub use plugin::ParticleFieldPlugin;
