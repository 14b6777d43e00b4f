use egui::{Pos2, Rect, Vec2};

// Common constants for all element types
pub const MIN_ELEMENT_SIZE: f32 = 1.0;
pub const MIN_ELEMENT_SCALE: f32 = 0.1;
pub const DEFAULT_ELEMENT_SIZE: f32 = 100.0;

/// Placement and transform shared by every element kind.
///
/// `position` is the top-left corner of the unscaled base box. Scale and rotation are
/// applied about the center of that box, so scaling an element keeps its center fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub position: Pos2,
    pub width: f32,
    pub height: f32,
    /// Clockwise in screen space, normalized to `[0, 360)` once committed.
    pub rotation_degrees: f32,
    pub scale: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            position: Pos2::ZERO,
            width: DEFAULT_ELEMENT_SIZE,
            height: DEFAULT_ELEMENT_SIZE,
            rotation_degrees: 0.0,
            scale: 1.0,
        }
    }
}

impl Geometry {
    /// Creates unrotated, unscaled geometry
    pub fn new(position: Pos2, width: f32, height: f32) -> Self {
        Self {
            position,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn base_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Center of the box, the pivot for rotation and scale
    pub fn center(&self) -> Pos2 {
        self.position + self.base_size() / 2.0
    }

    /// Size after scale
    pub fn scaled_size(&self) -> Vec2 {
        self.base_size() * self.scale
    }

    /// The scaled box before rotation is applied.
    pub fn scaled_rect(&self) -> Rect {
        Rect::from_center_size(self.center(), self.scaled_size())
    }

    /// Corners of the rotated, scaled box in the order
    /// top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Pos2; 4] {
        let rect = self.scaled_rect();
        let center = rect.center();
        let radians = self.rotation_degrees.to_radians();
        [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
        .map(|corner| rotate_about(corner, center, radians))
    }

    /// Axis-aligned bounds of the rotated box.
    pub fn bounding_rect(&self) -> Rect {
        let corners = self.corners();
        let mut rect = Rect::from_min_max(corners[0], corners[0]);
        for corner in &corners[1..] {
            rect.extend_with(*corner);
        }
        rect
    }

    /// Tests a point against the rotated, scaled box
    pub fn contains(&self, point: Pos2) -> bool {
        let center = self.center();
        let local = rotate_about(point, center, -self.rotation_degrees.to_radians());
        self.scaled_rect().contains(local)
    }
}

/// Wraps an angle into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotates `point` around `center` by `radians`, clockwise on a y-down canvas.
pub fn rotate_about(point: Pos2, center: Pos2, radians: f32) -> Pos2 {
    let (sin, cos) = radians.sin_cos();
    let offset = point - center;
    center + Vec2::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
}
