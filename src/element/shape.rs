pub const DEFAULT_FILL_COLOR: &str = "#000000";
pub const DEFAULT_BORDER_COLOR: &str = "transparent";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub dx: f32,
    pub dy: f32,
    pub blur: f32,
    pub color_hex: String,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            dx: 5.0,
            dy: 5.0,
            blur: 10.0,
            color_hex: "rgba(0, 0, 0, 0.5)".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub shape_kind: ShapeKind,
    pub fill_color_hex: String,
    pub border_width: f32,
    pub border_color_hex: String,
    /// Only meaningful for rectangles
    pub corner_radius: f32,
    pub shadow: Option<Shadow>,
}

impl Shape {
    /// Creates a black, borderless shape
    pub fn new(shape_kind: ShapeKind) -> Self {
        Self {
            shape_kind,
            fill_color_hex: DEFAULT_FILL_COLOR.to_owned(),
            border_width: 0.0,
            border_color_hex: DEFAULT_BORDER_COLOR.to_owned(),
            corner_radius: 0.0,
            shadow: None,
        }
    }

    /// Corner radius as drawn: zero for anything but a rectangle.
    pub fn effective_corner_radius(&self) -> f32 {
        match self.shape_kind {
            ShapeKind::Rectangle => self.corner_radius,
            ShapeKind::Circle | ShapeKind::Triangle => 0.0,
        }
    }
}
