//! Load -> build -> show -> hide -> destroy state machine for one particle field.

use super::easing::Ease;
use super::field::PointField;
use super::image::PixelImage;
use super::raster::{DisplacementBitmap, TrailRasterizer};
use super::surface::{HitSurface, fit_scale};
use super::trail::TouchTrail;
use super::tween::{Animator, ShaderParam, ShaderParams};
use crate::config::{CameraConfig, FieldConfig};
use crate::error::FieldError;

// Shader parameter targets
const SHOW_SIZE_FROM: f32 = 0.5;
const SHOW_SIZE_TO: f32 = 1.5;
const SHOW_RANDOMNESS: f32 = 2.0;
const SHOW_DEPTH_FROM: f32 = 40.0;
const SHOW_DEPTH_TO: f32 = 4.0;
const SHOW_DEPTH_STRETCH: f32 = 1.5;

const HIDE_RANDOMNESS: f32 = 5.0;
const HIDE_DEPTH: f32 = -20.0;
const HIDE_SIZE: f32 = 0.0;
const HIDE_SIZE_SHRINK: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Uninitialized,
    Loading,
    Ready,
    Visible,
    Hiding,
    /// Terminal
    Destroyed,
}

/// Identifies one hide animation; completing an outdated ticket does nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HideTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    /// Back to Ready, buffers kept
    Ready,
    Destroyed,
    /// The ticket no longer matches a running hide (destroyed or superseded)
    Stale,
}

/// Transitions the rendering side has to react to, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    Built {
        num_visible: usize,
        num_points: usize,
    },
    Shown,
    HideStarted(HideTicket),
    HideFinished {
        destroyed: bool,
    },
    /// Buffers, bitmap and hit surface are gone
    Released,
}

#[derive(Debug, Clone, Copy)]
struct PendingHide {
    ticket: HideTicket,
    destroy_after: bool,
    remaining: f32,
}

/// Everything allocated once the image is built, dropped on destroy
#[derive(Debug)]
struct FieldResources {
    points: PointField,
    rasterizer: TrailRasterizer,
    surface: HitSurface,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub points: &'a PointField,
    pub bitmap: &'a DisplacementBitmap,
    pub params: ShaderParams,
    pub time: f32,
    pub scale: f32,
}

#[derive(Debug)]
pub struct ParticleField {
    config: FieldConfig,
    state: FieldState,
    resources: Option<FieldResources>,
    trail: TouchTrail,
    params: ShaderParams,
    animator: Animator,
    /// Seconds accumulated while resources exist
    time: f32,
    listening: bool,
    pending_hide: Option<PendingHide>,
    next_ticket: u64,
    events: Vec<FieldEvent>,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        let trail = TouchTrail::new(config.touch.max_age);
        Self {
            config,
            state: FieldState::Uninitialized,
            resources: None,
            trail,
            params: ShaderParams::default(),
            animator: Animator::default(),
            time: 0.0,
            listening: false,
            pending_hide: None,
            next_ticket: 0,
            events: Vec::new(),
        }
    }

    // === Queries ===

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Interaction events are accepted only while this is set
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn points(&self) -> Option<&PointField> {
        self.resources.as_ref().map(|res| &res.points)
    }

    pub fn bitmap(&self) -> Option<&DisplacementBitmap> {
        self.resources.as_ref().map(|res| res.rasterizer.bitmap())
    }

    pub fn surface(&self) -> Option<&HitSurface> {
        self.resources.as_ref().map(|res| &res.surface)
    }

    pub fn trail(&self) -> &TouchTrail {
        &self.trail
    }

    pub fn params(&self) -> ShaderParams {
        self.params
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn render_state(&self) -> Option<RenderState<'_>> {
        let res = self.resources.as_ref()?;
        Some(RenderState {
            points: &res.points,
            bitmap: res.rasterizer.bitmap(),
            params: self.params,
            time: self.time,
            scale: res.surface.scale(),
        })
    }

    /// Clear the bitmap's dirty flag, reporting whether it needs uploading
    pub fn take_bitmap_dirty(&mut self) -> bool {
        self.resources
            .as_mut()
            .is_some_and(|res| res.rasterizer.bitmap_mut().take_dirty())
    }

    pub fn drain_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }

    // === Transitions ===

    /// Uninitialized -> Loading, once the image request is out
    pub fn begin_load(&mut self) -> bool {
        if self.state != FieldState::Uninitialized {
            log::debug!("begin_load ignored in {:?}", self.state);
            return false;
        }
        self.state = FieldState::Loading;
        true
    }

    /// Complete a load started with [`begin_load`](Self::begin_load)
    ///
    /// A failed decode is handed back and the field returns to Uninitialized;
    /// retrying is up to the caller. Results arriving after a destroy are dropped.
    pub fn finish_load(
        &mut self,
        decoded: Result<PixelImage, FieldError>,
    ) -> Result<(), FieldError> {
        if self.state != FieldState::Loading {
            log::debug!("discarding image load result in {:?}", self.state);
            return Ok(());
        }

        match decoded {
            Ok(image) => {
                self.build(&image);
                Ok(())
            }
            Err(err) => {
                log::warn!("particle field load failed: {}", err);
                self.state = FieldState::Uninitialized;
                Err(err)
            }
        }
    }

    fn build(&mut self, image: &PixelImage) {
        let points = PointField::build(image, self.config.sampling);
        let built = FieldEvent::Built {
            num_visible: points.num_visible(),
            num_points: points.num_points(),
        };

        self.resources = Some(FieldResources {
            surface: HitSurface::new(points.width(), points.height()),
            rasterizer: TrailRasterizer::new(self.config.touch),
            points,
        });
        self.trail.clear();
        self.params = ShaderParams::default();
        self.animator.clear();
        self.time = 0.0;
        self.state = FieldState::Ready;
        self.events.push(built);
    }

    /// Ready -> Visible: animate in and start listening for touches
    pub fn show(&mut self, duration: f32) -> bool {
        if self.state != FieldState::Ready || self.resources.is_none() {
            log::debug!("show ignored in {:?}", self.state);
            return false;
        }

        let params = &mut self.params;
        let animator = &mut self.animator;
        animator.from_to(
            params,
            ShaderParam::Size,
            SHOW_SIZE_FROM,
            SHOW_SIZE_TO,
            duration,
            Ease::OutQuad,
        );
        animator.to(
            params,
            ShaderParam::Randomness,
            SHOW_RANDOMNESS,
            duration,
            Ease::OutQuad,
        );
        animator.from_to(
            params,
            ShaderParam::Depth,
            SHOW_DEPTH_FROM,
            SHOW_DEPTH_TO,
            duration * SHOW_DEPTH_STRETCH,
            Ease::OutQuad,
        );

        self.listening = true;
        self.state = FieldState::Visible;
        self.events.push(FieldEvent::Shown);
        log::info!("particle field shown");
        true
    }

    /// Visible -> Hiding: animate out and stop listening right away
    ///
    /// When the returned ticket completes, the field is destroyed if
    /// `destroy_after` is set, otherwise it returns to Ready.
    pub fn hide(&mut self, destroy_after: bool, duration: f32) -> Option<HideTicket> {
        if self.state != FieldState::Visible {
            log::debug!("hide ignored in {:?}", self.state);
            return None;
        }

        let params = &mut self.params;
        let animator = &mut self.animator;
        animator.to(
            params,
            ShaderParam::Randomness,
            HIDE_RANDOMNESS,
            duration,
            Ease::OutQuad,
        );
        animator.to(params, ShaderParam::Depth, HIDE_DEPTH, duration, Ease::InQuad);
        animator.to(
            params,
            ShaderParam::Size,
            HIDE_SIZE,
            duration * HIDE_SIZE_SHRINK,
            Ease::OutQuad,
        );

        let ticket = HideTicket(self.next_ticket);
        self.next_ticket += 1;
        self.pending_hide = Some(PendingHide {
            ticket,
            destroy_after,
            remaining: duration,
        });

        self.listening = false;
        self.state = FieldState::Hiding;
        self.events.push(FieldEvent::HideStarted(ticket));
        log::info!("particle field hiding (destroy after: {})", destroy_after);
        Some(ticket)
    }

    /// Resolve a hide once its animation has played out
    pub fn complete_hide(&mut self, ticket: HideTicket) -> HideOutcome {
        let Some(pending) = self.pending_hide.filter(|p| p.ticket == ticket) else {
            return HideOutcome::Stale;
        };
        if self.state != FieldState::Hiding {
            return HideOutcome::Stale;
        }
        self.pending_hide = None;

        if pending.destroy_after {
            self.destroy();
            self.events.push(FieldEvent::HideFinished { destroyed: true });
            HideOutcome::Destroyed
        } else {
            self.state = FieldState::Ready;
            self.events.push(FieldEvent::HideFinished { destroyed: false });
            log::info!("particle field hidden");
            HideOutcome::Ready
        }
    }

    /// Release everything and end in Destroyed; a second call is a no-op
    ///
    /// Cancels an in-flight hide, whose ticket then completes as stale.
    pub fn destroy(&mut self) -> bool {
        if self.state == FieldState::Destroyed {
            return false;
        }

        self.pending_hide = None;
        self.animator.clear();
        self.listening = false;
        self.trail.clear();

        if self.resources.take().is_some() {
            self.events.push(FieldEvent::Released);
        }
        self.state = FieldState::Destroyed;
        log::info!("particle field destroyed");
        true
    }

    /// Refit the field to the viewport; returns the new scale
    pub fn resize(&mut self, camera: CameraConfig) -> Option<f32> {
        if !matches!(
            self.state,
            FieldState::Ready | FieldState::Visible | FieldState::Hiding
        ) {
            return None;
        }
        let res = self.resources.as_mut()?;
        let scale = fit_scale(camera, res.points.height());
        res.surface.set_scale(scale);
        Some(scale)
    }

    /// Record a touch at normalized `(u, v)`; dropped unless listening
    pub fn add_touch(&mut self, u: f32, v: f32) -> bool {
        if !self.listening {
            return false;
        }
        self.trail.add_touch(u, v);
        true
    }

    /// Hit-test a point on the field plane and record it as a touch
    pub fn touch_at(&mut self, x: f32, y: f32) -> bool {
        if !self.listening {
            return false;
        }
        let Some((u, v)) = self.surface().and_then(|surface| surface.uv_at(x, y)) else {
            return false;
        };
        self.add_touch(u, v)
    }

    /// Per-frame tick: age and repaint the trail, advance time and animations
    pub fn update(&mut self, delta: f32) {
        let Some(res) = self.resources.as_mut() else {
            return;
        };
        res.rasterizer.update(&mut self.trail);

        self.time += delta;
        self.animator.advance(delta, &mut self.params);

        if let Some(pending) = self.pending_hide.as_mut() {
            pending.remaining -= delta;
            if pending.remaining <= 0.0 {
                let ticket = pending.ticket;
                self.complete_hide(ticket);
            }
        }
    }
}
