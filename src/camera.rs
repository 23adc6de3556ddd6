//! Camera controller: pan position, zoom factor, and the view transform.
//!
//! [`CameraState::update`] is pure: it takes the elapsed time and the input
//! gathered since the last tick and returns the next state.  The frame tick
//! owns the clock and calls [`CameraState::elapsed_since_last`] first.
//!
//! ## Conventions
//!
//! - Pan is time-scaled: holding a direction for `t` seconds moves the focus
//!   by `pan_speed * t` world units, however `t` is split across ticks.
//! - Zoom is multiplicative: `zoom' = zoom * zoom_speed ^ scroll`.  It is never
//!   allowed to reach zero or infinity; optional limits clamp it further.

use bevy::math::Affine2;
use bevy::prelude::*;
use std::time::Duration;

/// Directional pan keys held during the current tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanInput {
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
}

impl PanInput {
    /// Unit-per-axis direction; opposite keys cancel, diagonals combine.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraState {
    /// Focus point in world coordinates; drawn at the viewport centre.
    pub position: Vec2,
    pub zoom: f32,
    /// World units per second.
    pub pan_speed: f32,
    /// Zoom multiplier per scroll line.
    pub zoom_speed: f32,
    /// Optional `(min, max)` clamp applied after every zoom change.
    pub zoom_limits: Option<(f32, f32)>,
    /// Monotonic timestamp of the previous tick; `None` before the first one.
    last_update: Option<Duration>,
}

impl CameraState {
    pub fn new(position: Vec2, pan_speed: f32, zoom_speed: f32) -> Self {
        Self {
            position,
            zoom: 1.0,
            pan_speed,
            zoom_speed,
            zoom_limits: None,
            last_update: None,
        }
    }

    pub fn with_zoom_limits(mut self, limits: Option<(f32, f32)>) -> Self {
        self.zoom_limits = limits;
        self
    }

    /// Seconds since the previous call, recording `now` for the next one.
    ///
    /// The first call reports zero.  A clock that appears to go backwards
    /// also reports zero.
    pub fn elapsed_since_last(&mut self, now: Duration) -> f32 {
        let elapsed = self
            .last_update
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_update = Some(now);
        elapsed.as_secs_f32()
    }

    /// Apply `elapsed` seconds of panning and `scroll` lines of zoom.
    pub fn update(&self, elapsed: f32, pan: PanInput, scroll: f32) -> CameraState {
        let mut next = self.clone();
        next.position += pan.direction() * self.pan_speed * elapsed;
        next.zoom = self.zoomed(scroll);
        debug_assert!(next.zoom > 0.0, "zoom must stay positive");
        next
    }

    fn zoomed(&self, scroll: f32) -> f32 {
        if scroll == 0.0 {
            return self.zoom;
        }
        let mut zoom = self.zoom * self.zoom_speed.powf(scroll);
        if let Some((min, max)) = self.zoom_limits {
            zoom = zoom.clamp(min, max);
        }
        if zoom.is_nan() {
            return self.zoom;
        }
        // Keep the scale usable even after extreme scrolling.
        zoom.clamp(f32::MIN_POSITIVE, f32::MAX)
    }

    /// Transform that draws world point `position` at `viewport_center`, scaled by `zoom`.
    pub fn view_transform(&self, viewport_center: Vec2) -> ViewTransform {
        ViewTransform {
            focus: self.position,
            zoom: self.zoom,
            viewport_center,
        }
    }
}

/// World → screen mapping: scale by `zoom` about `focus`, then move `focus`
/// to the viewport centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub focus: Vec2,
    pub zoom: f32,
    pub viewport_center: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            focus: Vec2::ZERO,
            zoom: 1.0,
            viewport_center: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn matrix(&self) -> Affine2 {
        Affine2::from_translation(self.viewport_center - self.focus)
            * Affine2::from_translation(self.focus)
            * Affine2::from_scale(Vec2::splat(self.zoom))
            * Affine2::from_translation(-self.focus)
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        self.matrix().transform_point2(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RIGHT: PanInput = PanInput {
        left: false,
        right: true,
        down: false,
        up: false,
    };

    fn camera() -> CameraState {
        CameraState::new(Vec2::new(512.0, 384.0), 500.0, 1.2)
    }

    #[test]
    fn first_tick_reports_zero_elapsed() {
        let mut cam = camera();
        assert_eq!(cam.elapsed_since_last(Duration::from_secs(30)), 0.0);
        let dt = cam.elapsed_since_last(Duration::from_millis(30_250));
        assert!((dt - 0.25).abs() < 1e-6);
        assert_eq!(cam.elapsed_since_last(Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn pan_right_moves_by_speed_times_time() {
        let cam = camera().update(0.5, RIGHT, 0.0);
        assert!((cam.position.x - (512.0 + 250.0)).abs() < 1e-4);
        assert_eq!(cam.position.y, 384.0);
    }

    #[test]
    fn diagonal_pan_composes_axes() {
        let pan = PanInput {
            left: true,
            up: true,
            ..Default::default()
        };
        let cam = camera().update(0.1, pan, 0.0);
        assert!((cam.position - Vec2::new(462.0, 434.0)).length() < 1e-3);
    }

    #[test]
    fn opposite_keys_cancel() {
        let pan = PanInput {
            left: true,
            right: true,
            down: true,
            up: true,
        };
        assert_eq!(camera().update(1.0, pan, 0.0).position, camera().position);
    }

    #[test]
    fn scroll_zooms_multiplicatively() {
        let cam = camera().update(0.0, PanInput::default(), 2.0);
        assert!((cam.zoom - 1.44).abs() < 1e-5);
        let back = cam.update(0.0, PanInput::default(), -2.0);
        assert!((back.zoom - 1.0).abs() < 1e-5);
        let half = camera().update(0.0, PanInput::default(), 0.5);
        assert!((half.zoom - 1.2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn zoom_limits_clamp_when_configured() {
        let cam = camera().with_zoom_limits(Some((0.5, 2.0)));
        assert_eq!(cam.update(0.0, PanInput::default(), 50.0).zoom, 2.0);
        assert_eq!(cam.update(0.0, PanInput::default(), -50.0).zoom, 0.5);
    }

    #[test]
    fn extreme_scroll_never_reaches_zero() {
        let cam = camera().update(0.0, PanInput::default(), -1.0e6);
        assert!(cam.zoom > 0.0);
        let cam = camera().update(0.0, PanInput::default(), 1.0e6);
        assert!(cam.zoom.is_finite());
    }

    #[test]
    fn view_transform_centres_focus_and_scales_offsets() {
        let mut cam = camera();
        cam.position = Vec2::new(100.0, 50.0);
        cam.zoom = 2.0;
        let view = cam.view_transform(Vec2::new(512.0, 384.0));
        assert!((view.world_to_screen(Vec2::new(100.0, 50.0)) - Vec2::new(512.0, 384.0)).length() < 1e-4);
        assert!((view.world_to_screen(Vec2::new(110.0, 50.0)) - Vec2::new(532.0, 384.0)).length() < 1e-4);
    }

    proptest! {
        #[test]
        fn zoom_stays_positive(scrolls in prop::collection::vec(-40.0f32..40.0, 0..64)) {
            let mut cam = camera();
            for scroll in scrolls {
                cam = cam.update(0.0, PanInput::default(), scroll);
                prop_assert!(cam.zoom > 0.0);
            }
        }

        /// Pan distance depends only on the total time held, not how it was sliced.
        #[test]
        fn pan_is_time_additive(slices in prop::collection::vec(0.0f32..0.5, 1..32)) {
            let total: f32 = slices.iter().sum();
            let mut cam = camera();
            for dt in &slices {
                cam = cam.update(*dt, RIGHT, 0.0);
            }
            let expected = 512.0 + 500.0 * total;
            prop_assert!((cam.position.x - expected).abs() <= 1e-4 * expected);
        }
    }
}
