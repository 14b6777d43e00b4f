pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_FONT_SIZE_PT: f32 = 20.0;
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_TEXT_WIDTH: f32 = 300.0;
pub const DEFAULT_TEXT_HEIGHT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
    Both,
}

impl TextDecoration {
    /// Whether an underline is drawn
    pub fn has_underline(&self) -> bool {
        matches!(self, TextDecoration::Underline | TextDecoration::Both)
    }

    /// Whether a strike-through line is drawn
    pub fn has_line_through(&self) -> bool {
        matches!(self, TextDecoration::LineThrough | TextDecoration::Both)
    }
}

/// A run of styled text placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub content: String,
    pub font_family: String,
    pub font_size_pt: f32,
    pub color_hex: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_align: TextAlign,
    pub text_decoration: TextDecoration,
}

impl Text {
    /// Creates text with the default font, size and color
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_family: DEFAULT_FONT_FAMILY.to_owned(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
            color_hex: DEFAULT_TEXT_COLOR.to_owned(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            text_align: TextAlign::default(),
            text_decoration: TextDecoration::default(),
        }
    }

    pub fn is_bold(&self) -> bool {
        self.font_weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.font_style == FontStyle::Italic
    }
}
