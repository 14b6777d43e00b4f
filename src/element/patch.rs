use egui::Pos2;
use log::debug;

use super::common::normalize_degrees;
use super::shape::{Shadow, ShapeKind};
use super::text::{FontStyle, FontWeight, TextAlign, TextDecoration};
use super::{Element, ElementType};

/// A partial update merged into an existing element.
///
/// Fields left as `None` are untouched. Variant-specific fields that don't match the
/// target element's variant are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub position: Option<Pos2>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation_degrees: Option<f32>,
    pub scale: Option<f32>,
    pub z_index: Option<i32>,
    pub opacity: Option<f32>,

    // Text
    pub content: Option<String>,
    pub font_family: Option<String>,
    pub font_size_pt: Option<f32>,
    pub color_hex: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_align: Option<TextAlign>,
    pub text_decoration: Option<TextDecoration>,

    // Image
    pub source_uri: Option<String>,

    // Shape
    pub shape_kind: Option<ShapeKind>,
    pub fill_color_hex: Option<String>,
    pub border_width: Option<f32>,
    pub border_color_hex: Option<String>,
    pub corner_radius: Option<f32>,
    /// `Some(None)` removes the shadow
    pub shadow: Option<Option<Shadow>>,
}

impl ElementPatch {
    /// Creates an empty patch that changes nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the top-left position
    pub fn position(mut self, position: Pos2) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the unscaled width and height
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the rotation, normalized on apply
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation_degrees = Some(degrees);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the opacity, clamped to 0..=1 on apply
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Sets text content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the text color
    pub fn color(mut self, color_hex: impl Into<String>) -> Self {
        self.color_hex = Some(color_hex.into());
        self
    }

    /// Sets an image's source
    pub fn source_uri(mut self, uri: impl Into<String>) -> Self {
        self.source_uri = Some(uri.into());
        self
    }

    /// Sets a shape's fill color
    pub fn fill_color(mut self, color_hex: impl Into<String>) -> Self {
        self.fill_color_hex = Some(color_hex.into());
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges this patch into `element`. Returns whether anything actually changed.
    pub fn apply_to(&self, element: &mut Element) -> bool {
        let before = element.clone();
        let geometry = &mut element.geometry;

        if let Some(position) = self.position {
            geometry.position = position;
        }
        if let Some(width) = self.width {
            geometry.width = width;
        }
        if let Some(height) = self.height {
            geometry.height = height;
        }
        if let Some(rotation) = self.rotation_degrees {
            geometry.rotation_degrees = normalize_degrees(rotation);
        }
        if let Some(scale) = self.scale {
            geometry.scale = scale;
        }
        if let Some(z_index) = self.z_index {
            element.z_index = z_index;
        }
        if let Some(opacity) = self.opacity {
            element.opacity = opacity.clamp(0.0, 1.0);
        }

        match &mut element.kind {
            ElementType::Text(text) => {
                merge(&mut text.content, &self.content);
                merge(&mut text.font_family, &self.font_family);
                merge(&mut text.font_size_pt, &self.font_size_pt);
                merge(&mut text.color_hex, &self.color_hex);
                merge(&mut text.font_weight, &self.font_weight);
                merge(&mut text.font_style, &self.font_style);
                merge(&mut text.text_align, &self.text_align);
                merge(&mut text.text_decoration, &self.text_decoration);
            }
            ElementType::Image(image) => {
                merge(&mut image.source_uri, &self.source_uri);
            }
            ElementType::Shape(shape) => {
                merge(&mut shape.shape_kind, &self.shape_kind);
                merge(&mut shape.fill_color_hex, &self.fill_color_hex);
                merge(&mut shape.border_width, &self.border_width);
                merge(&mut shape.border_color_hex, &self.border_color_hex);
                merge(&mut shape.corner_radius, &self.corner_radius);
                merge(&mut shape.shadow, &self.shadow);
            }
        }

        let changed = *element != before;
        if !changed {
            debug!("Patch left element {} unchanged", element.id);
        }
        changed
    }
}

fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}
