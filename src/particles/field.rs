//! Point-field synthesis: one particle per retained source pixel.

use std::f32::consts::PI;

use rand::Rng;

use super::image::PixelImage;
use crate::config::SamplingConfig;

/// Corner positions of the unit quad drawn for every particle
pub const QUAD_POSITIONS: [[f32; 3]; 4] = [
    [-0.5, 0.5, 0.0],
    [0.5, 0.5, 0.0],
    [-0.5, -0.5, 0.0],
    [0.5, -0.5, 0.0],
];

/// Texture coordinates of the quad corners
pub const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

/// Two triangles covering the quad
pub const QUAD_INDICES: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Components per entry in the offsets buffer (z is always zero)
pub const OFFSET_COMPONENTS: usize = 3;

/// One retained pixel, as read back from the attribute buffers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pixel_index: u32,
    pub offset: (u32, u32),
    pub angle: f32,
}

/// Immutable per-particle attribute buffers, ready for instanced rendering
#[derive(Debug, Clone)]
pub struct PointField {
    width: u32,
    height: u32,
    indices: Vec<u32>,
    offsets: Vec<f32>,
    angles: Vec<f32>,
}

impl PointField {
    /// Sample `image` with the thread-local generator for particle angles
    pub fn build(image: &PixelImage, sampling: SamplingConfig) -> Self {
        Self::build_with_rng(image, sampling, &mut rand::rng())
    }

    /// Sample `image`, keeping pixels whose red channel is above the threshold
    ///
    /// Runs two passes: count survivors, then fill buffers sized exactly for them.
    pub fn build_with_rng<R: Rng>(
        image: &PixelImage,
        sampling: SamplingConfig,
        rng: &mut R,
    ) -> Self {
        let width = image.width();
        let num_points = image.pixel_count();
        let keep = |i: usize| !sampling.discard_dark || image.red(i) > sampling.threshold;

        let num_visible = (0..num_points).filter(|&i| keep(i)).count();

        let mut indices = vec![0u32; num_visible];
        let mut offsets = vec![0.0f32; num_visible * OFFSET_COMPONENTS];
        let mut angles = vec![0.0f32; num_visible];

        let mut j = 0;
        for i in (0..num_points).filter(|&i| keep(i)) {
            let pixel = i as u32;
            offsets[j * OFFSET_COMPONENTS] = (pixel % width) as f32;
            offsets[j * OFFSET_COMPONENTS + 1] = (pixel / width) as f32;
            indices[j] = pixel;
            angles[j] = rng.random_range(0.0..PI);
            j += 1;
        }
        debug_assert_eq!(j, num_visible);

        log::info!("numVisible {} of {} points", num_visible, num_points);

        Self {
            width,
            height: image.height(),
            indices,
            offsets,
            angles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Every pixel of the source image
    pub fn num_points(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixels that became particles
    pub fn num_visible(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Flattened `(x, y, 0)` triples
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn particle(&self, slot: usize) -> Option<Particle> {
        let pixel_index = *self.indices.get(slot)?;
        let base = slot * OFFSET_COMPONENTS;
        Some(Particle {
            pixel_index,
            offset: (self.offsets[base] as u32, self.offsets[base + 1] as u32),
            angle: self.angles[slot],
        })
    }

    pub fn particles(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.num_visible()).filter_map(|slot| self.particle(slot))
    }
}
