//! Age-bounded trail of touch points.

/// Squared distance that saturates force; ~0.01 normalized units between touches
const FORCE_SCALE: f32 = 10_000.0;

/// One interaction event in normalized `(u, v)` space, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub u: f32,
    pub v: f32,
    /// Ticks since the point was added
    pub age: u32,
    /// Strength in [0, 1], from the distance to the previous point
    pub force: f32,
}

/// Chronological touch points, each dropped once older than `max_age`
#[derive(Debug, Clone)]
pub struct TouchTrail {
    points: Vec<TouchPoint>,
    max_age: u32,
}

impl TouchTrail {
    pub fn new(max_age: u32) -> Self {
        Self {
            points: Vec::new(),
            max_age,
        }
    }

    /// Append a touch at `(u, v)`; fast moves hit harder than slow ones
    pub fn add_touch(&mut self, u: f32, v: f32) -> &TouchPoint {
        let force = match self.points.last() {
            Some(last) => {
                let du = last.u - u;
                let dv = last.v - v;
                ((du * du + dv * dv) * FORCE_SCALE).min(1.0)
            }
            None => 0.0,
        };

        self.points.push(TouchPoint {
            u,
            v,
            age: 0,
            force,
        });
        &self.points[self.points.len() - 1]
    }

    /// Age every point, then drop the ones past `max_age`
    ///
    /// Ageing finishes for the whole trail before anything is removed.
    pub fn tick(&mut self) {
        for point in &mut self.points {
            point.age += 1;
        }

        let max_age = self.max_age;
        let before = self.points.len();
        self.points.retain(|point| point.age <= max_age);

        let expired = before - self.points.len();
        if expired > 0 {
            log::trace!("{} touch points expired, {} live", expired, self.points.len());
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }
}
