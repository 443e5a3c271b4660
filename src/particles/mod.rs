//! Engine-independent core: image sampling, touch trail, displacement bitmap
//! and the field lifecycle. Nothing in here knows about the ECS.

mod easing;
mod field;
mod image;
mod lifecycle;
mod raster;
mod surface;
mod trail;
mod tween;

pub use field::{PointField, QUAD_INDICES, QUAD_POSITIONS, QUAD_UVS};
pub use image::PixelImage;
pub use lifecycle::{FieldEvent, FieldState, ParticleField, RenderState};
pub use raster::DisplacementBitmap;
