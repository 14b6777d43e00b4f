use egui::Pos2;

use crate::tools::rotation::wrap_radians;

/// Cumulative rotation and zoom of a two-finger gesture.
///
/// Fed either with raw finger positions or with per-frame deltas as egui's multi-touch
/// info reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoFingerTracker {
    start_angle: f32,
    start_distance: f32,
    rotation_radians: f32,
    zoom: f32,
}

impl Default for TwoFingerTracker {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            start_distance: 0.0,
            rotation_radians: 0.0,
            zoom: 1.0,
        }
    }
}

impl TwoFingerTracker {
    /// Starts tracking from the two initial finger positions
    pub fn from_points(a: Pos2, b: Pos2) -> Self {
        let span = b - a;
        Self {
            start_angle: span.y.atan2(span.x),
            start_distance: span.length(),
            ..Self::default()
        }
    }

    /// Returns `(rotation_radians, zoom)` since the fingers went down. Both are NaN when
    /// the fingers coincide, either now or at the start.
    pub fn update_points(&mut self, a: Pos2, b: Pos2) -> (f32, f32) {
        let span = b - a;
        let distance = span.length();
        if distance <= f32::EPSILON || self.start_distance <= f32::EPSILON {
            return (f32::NAN, f32::NAN);
        }
        self.rotation_radians = wrap_radians(span.y.atan2(span.x) - self.start_angle);
        self.zoom = distance / self.start_distance;
        (self.rotation_radians, self.zoom)
    }

    /// Folds in one frame of egui's `MultiTouchInfo` deltas
    pub fn accumulate(&mut self, rotation_delta: f32, zoom_delta: f32) -> (f32, f32) {
        if rotation_delta.is_finite() {
            self.rotation_radians += rotation_delta;
        }
        if zoom_delta.is_finite() && zoom_delta > 0.0 {
            self.zoom *= zoom_delta;
        }
        (self.rotation_radians, self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn quarter_turn_and_double_spread() {
        let mut tracker = TwoFingerTracker::from_points(Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0));
        let (rotation, zoom) = tracker.update_points(Pos2::new(0.0, 0.0), Pos2::new(0.0, 20.0));
        assert!((rotation - FRAC_PI_2).abs() < 1e-5);
        assert!((zoom - 2.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_fingers_yield_nan() {
        let mut tracker = TwoFingerTracker::from_points(Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0));
        let (rotation, zoom) = tracker.update_points(Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0));
        assert!(rotation.is_nan());
        assert!(zoom.is_nan());
    }

    #[test]
    fn accumulate_multiplies_zoom() {
        let mut tracker = TwoFingerTracker::default();
        tracker.accumulate(0.1, 1.5);
        let (rotation, zoom) = tracker.accumulate(0.1, 2.0);
        assert!((rotation - 0.2).abs() < 1e-6);
        assert!((zoom - 3.0).abs() < 1e-6);
    }
}
