//! Paints the touch trail into a small square intensity bitmap every tick.

use super::easing::ease_out_sine;
use super::trail::{TouchPoint, TouchTrail};
use crate::config::TouchConfig;

/// Share of a point's lifetime spent growing
const ATTACK_FRACTION: f32 = 0.3;

/// Brush opacity at the solid core
const CORE_ALPHA: f32 = 0.2;

/// Radius, relative to the brush, where the falloff starts
const CORE_RADIUS: f32 = 0.25;

/// Square grayscale bitmap, row 0 at the top, values in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementBitmap {
    size: usize,
    pixels: Vec<f32>,
    dirty: bool,
}

impl DisplacementBitmap {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pixels: vec![0.0; size * size],
            dirty: true,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0.0);
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.pixels[y * self.size + x]
    }

    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    pub fn max_intensity(&self) -> f32 {
        self.pixels.iter().copied().fold(0.0, f32::max)
    }

    /// Repainted since the consumer last uploaded it
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Report and reset the dirty flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Opaque grayscale RGBA8 bytes for texture upload
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&value| {
                let grey = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
                [grey, grey, grey, 255]
            })
            .collect()
    }

    /// Source-over blend of a grey `value` at `alpha`
    fn blend(&mut self, x: usize, y: usize, value: f32, alpha: f32) {
        let pixel = &mut self.pixels[y * self.size + x];
        *pixel = value * alpha + *pixel * (1.0 - alpha);
    }
}

/// Intensity of a point at `age`: eased rise over the first 30% of its life,
/// eased fall over the rest
pub fn age_envelope(age: u32, max_age: u32) -> f32 {
    let age = age as f32;
    let attack = max_age as f32 * ATTACK_FRACTION;
    let release = max_age as f32 * (1.0 - ATTACK_FRACTION);

    let progress = if age < attack {
        age / attack
    } else {
        1.0 - (age - attack) / release
    };
    ease_out_sine(progress.clamp(0.0, 1.0))
}

/// Single writer of the displacement bitmap
#[derive(Debug, Clone)]
pub struct TrailRasterizer {
    bitmap: DisplacementBitmap,
    /// Brush radius as a fraction of the bitmap size
    radius: f32,
    max_age: u32,
}

impl TrailRasterizer {
    pub fn new(config: TouchConfig) -> Self {
        Self {
            bitmap: DisplacementBitmap::new(config.size),
            radius: config.radius,
            max_age: config.max_age,
        }
    }

    pub fn bitmap(&self) -> &DisplacementBitmap {
        &self.bitmap
    }

    pub fn bitmap_mut(&mut self) -> &mut DisplacementBitmap {
        &mut self.bitmap
    }

    /// Age the trail and repaint it
    pub fn update(&mut self, trail: &mut TouchTrail) {
        trail.tick();
        self.render(trail);
    }

    /// Clear and repaint from the trail alone; earlier frames leave no trace
    pub fn render(&mut self, trail: &TouchTrail) {
        self.bitmap.clear();
        for point in trail.points() {
            self.draw_touch(point);
        }
        self.bitmap.dirty = true;
    }

    fn draw_touch(&mut self, point: &TouchPoint) {
        let size = self.bitmap.size as f32;
        // Bitmap rows run top-down, touch v runs bottom-up
        let cx = point.u * size;
        let cy = (1.0 - point.v) * size;

        let intensity = age_envelope(point.age, self.max_age) * point.force;
        let radius = size * self.radius * intensity;
        if radius <= 0.0 {
            return;
        }
        let core = radius * CORE_RADIUS;

        let x0 = (cx - radius).floor().clamp(0.0, size) as usize;
        let x1 = (cx + radius).ceil().clamp(0.0, size) as usize;
        let y0 = (cy - radius).floor().clamp(0.0, size) as usize;
        let y1 = (cy + radius).ceil().clamp(0.0, size) as usize;

        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= radius {
                    continue;
                }

                // 0 inside the core, 1 at the rim
                let t = ((dist - core) / (radius - core)).clamp(0.0, 1.0);
                self.bitmap.blend(x, y, 1.0 - t, CORE_ALPHA * (1.0 - t));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TouchConfig {
        TouchConfig {
            size: 64,
            max_age: 120,
            radius: 0.15,
        }
    }

    /// Trail whose last point has full force
    fn trail_with_forceful_touch(u: f32, v: f32) -> TouchTrail {
        let mut trail = TouchTrail::new(120);
        trail.add_touch((u + 0.5) % 1.0, v);
        trail.add_touch(u, v);
        trail
    }

    #[test]
    fn test_envelope_endpoints() {
        assert_eq!(age_envelope(0, 120), 0.0);
        assert!(age_envelope(120, 120).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_continuous_at_phase_boundary() {
        for max_age in [7, 50, 100, 120, 333] {
            let boundary = (max_age as f32 * ATTACK_FRACTION).floor() as u32;
            let at = age_envelope(boundary, max_age);
            let after = age_envelope(boundary + 1, max_age);

            assert!(at > 0.95, "max_age {}: {} at boundary", max_age, at);
            assert!((at - after).abs() < 0.1);
        }
    }

    #[test]
    fn test_envelope_rises_then_falls() {
        let peak = (120.0 * ATTACK_FRACTION) as u32;
        for age in 1..peak {
            assert!(age_envelope(age, 120) > age_envelope(age - 1, 120));
        }
        for age in peak + 1..=120 {
            assert!(age_envelope(age, 120) < age_envelope(age - 1, 120));
        }
    }

    #[test]
    fn test_fresh_bitmap_is_black() {
        let rasterizer = TrailRasterizer::new(config());
        assert_eq!(rasterizer.bitmap().max_intensity(), 0.0);
        assert_eq!(rasterizer.bitmap().pixels().len(), 64 * 64);
    }

    #[test]
    fn test_zero_force_paints_nothing() {
        let mut trail = TouchTrail::new(120);
        trail.add_touch(0.5, 0.5);
        let mut rasterizer = TrailRasterizer::new(config());
        for _ in 0..10 {
            rasterizer.update(&mut trail);
        }

        assert_eq!(rasterizer.bitmap().max_intensity(), 0.0);
    }

    #[test]
    fn test_brush_is_centered_with_flipped_v() {
        let mut trail = trail_with_forceful_touch(0.25, 0.75);
        let mut rasterizer = TrailRasterizer::new(config());
        for _ in 0..36 {
            rasterizer.update(&mut trail);
        }
        let bitmap = rasterizer.bitmap();

        // u=0.25 -> x=16, v=0.75 -> y=16 from the top
        assert!(bitmap.get(16, 16) > 0.1);
        assert_eq!(bitmap.get(16, 48), 0.0);
        assert_eq!(bitmap.get(48, 16), 0.0);
    }

    #[test]
    fn test_core_reaches_core_alpha() {
        let mut trail = trail_with_forceful_touch(0.5, 0.5);
        let mut rasterizer = TrailRasterizer::new(config());
        for _ in 0..36 {
            rasterizer.update(&mut trail);
        }
        let peak = rasterizer.bitmap().max_intensity();

        assert!((peak - CORE_ALPHA).abs() < 1e-4, "peak {}", peak);
    }

    #[test]
    fn test_overlapping_points_accumulate() {
        let mut single = TouchTrail::new(120);
        single.add_touch(0.0, 0.0);
        single.add_touch(0.5, 0.5);

        let mut double = single.clone();
        double.add_touch(0.0, 0.0);
        double.add_touch(0.5, 0.5);

        let mut a = TrailRasterizer::new(config());
        let mut b = TrailRasterizer::new(config());
        for _ in 0..20 {
            a.update(&mut single);
            b.update(&mut double);
        }

        assert!(b.bitmap().get(32, 32) > a.bitmap().get(32, 32));
    }

    #[test]
    fn test_output_depends_only_on_trail_state() {
        let mut trail = trail_with_forceful_touch(0.4, 0.6);
        let mut warm = TrailRasterizer::new(config());
        for _ in 0..10 {
            warm.update(&mut trail);
        }

        let mut cold = TrailRasterizer::new(config());
        cold.render(&trail);
        assert_eq!(warm.bitmap().pixels(), cold.bitmap().pixels());

        // Same trail, one more tick: age advances and the picture changes
        let before = warm.bitmap().clone();
        warm.update(&mut trail);
        assert_ne!(before.pixels(), warm.bitmap().pixels());
    }

    #[test]
    fn test_expired_trail_clears_bitmap() {
        let mut trail = trail_with_forceful_touch(0.5, 0.5);
        let mut rasterizer = TrailRasterizer::new(config());
        for _ in 0..30 {
            rasterizer.update(&mut trail);
        }
        assert!(rasterizer.bitmap().max_intensity() > 0.0);

        for _ in 0..100 {
            rasterizer.update(&mut trail);
        }
        assert!(trail.is_empty());
        assert_eq!(rasterizer.bitmap().max_intensity(), 0.0);
    }

    #[test]
    fn test_dirty_flag() {
        let mut trail = TouchTrail::new(120);
        let mut rasterizer = TrailRasterizer::new(config());
        assert!(rasterizer.bitmap_mut().take_dirty());
        assert!(!rasterizer.bitmap().is_dirty());

        rasterizer.update(&mut trail);
        assert!(rasterizer.bitmap().is_dirty());
    }

    #[test]
    fn test_edge_touch_stays_in_bounds() {
        let mut trail = TouchTrail::new(120);
        trail.add_touch(0.5, 0.5);
        trail.add_touch(0.0, 1.0);
        trail.add_touch(1.0, 0.0);
        let mut rasterizer = TrailRasterizer::new(config());
        for _ in 0..36 {
            rasterizer.update(&mut trail);
        }

        assert!(rasterizer.bitmap().get(0, 0) > 0.0);
        assert!(rasterizer.bitmap().get(63, 63) > 0.0);
    }

    #[test]
    fn test_rgba_export() {
        let mut bitmap = DisplacementBitmap::new(2);
        bitmap.blend(1, 0, 1.0, 1.0);
        let bytes = bitmap.to_rgba8();

        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
        assert_eq!(&bytes[4..8], &[255, 255, 255, 255]);
    }
}
