use std::f32::consts::{PI, TAU};

use egui::Pos2;

/// Rounds `degrees` to the nearest multiple of `increment`
pub fn snap_to_increment(degrees: f32, increment: f32) -> f32 {
    (degrees / increment).round() * increment
}

/// One exponential smoothing step from `current` toward `target`
pub fn smooth_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Angle of `point` around `center`, clockwise-positive on a y-down canvas
pub fn angle_around(center: Pos2, point: Pos2) -> f32 {
    let offset = point - center;
    offset.y.atan2(offset.x)
}

/// Wraps an angle difference into `[-PI, PI]`
pub fn wrap_radians(delta: f32) -> f32 {
    let wrapped = (delta + PI).rem_euclid(TAU) - PI;
    if wrapped < -PI { wrapped + TAU } else { wrapped }
}

/// Snapped, smoothed rotation for a single rotate gesture.
///
/// The candidate angle is the rotation at gesture start plus the raw gesture delta. Each
/// update moves the current angle a fixed fraction of the way to the snapped candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTrack {
    start_degrees: f32,
    current_degrees: f32,
    snap_increment: f32,
    smoothing: f32,
}

impl RotationTrack {
    /// Starts tracking from the element's current rotation
    pub fn new(start_degrees: f32, snap_increment: f32, smoothing: f32) -> Self {
        Self {
            start_degrees,
            current_degrees: start_degrees,
            snap_increment,
            smoothing,
        }
    }

    /// Feeds the cumulative gesture rotation. Non-finite input is dropped and the last
    /// valid angle is kept.
    pub fn update(&mut self, delta_radians: f32) -> f32 {
        if !delta_radians.is_finite() {
            log::trace!("Dropping non-finite rotation delta");
            return self.current_degrees;
        }
        let candidate = self.start_degrees + delta_radians.to_degrees();
        let snapped = snap_to_increment(candidate, self.snap_increment);
        self.current_degrees = smooth_toward(self.current_degrees, snapped, self.smoothing);
        self.current_degrees
    }
}
