//! Invisible hit-test plane matching the image, and the fit-to-viewport scale.

use crate::config::CameraConfig;

/// World units per image pixel so the image fills the viewport height
pub fn fit_scale(camera: CameraConfig, image_height: u32) -> f32 {
    let fov = camera.fov_degrees.to_radians();
    let visible_height = 2.0 * (fov * 0.5).tan() * camera.distance;
    visible_height / image_height as f32
}

/// Plane of `width x height` image pixels centred on the field origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSurface {
    width: f32,
    height: f32,
    scale: f32,
}

impl HitSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            scale: 1.0,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    /// World-space extent after scaling
    pub fn world_size(&self) -> (f32, f32) {
        (self.width * self.scale, self.height * self.scale)
    }

    /// Normalized `(u, v)` of a point on the plane, bottom-left origin;
    /// `None` when it falls outside
    pub fn uv_at(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (w, h) = self.world_size();
        if w <= 0.0 || h <= 0.0 {
            return None;
        }

        let u = x / w + 0.5;
        let v = y / h + 0.5;
        ((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)).then_some((u, v))
    }
}
