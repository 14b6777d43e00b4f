use egui::{Pos2, Rect};

pub mod common;
pub mod image;
pub mod patch;
pub mod shape;
pub mod text;

pub use common::{
    normalize_degrees, rotate_about, Geometry, DEFAULT_ELEMENT_SIZE, MIN_ELEMENT_SCALE,
    MIN_ELEMENT_SIZE,
};
pub use image::Image;
pub use patch::ElementPatch;
pub use shape::{Shadow, Shape, ShapeKind};
pub use text::{FontStyle, FontWeight, Text, TextAlign, TextDecoration};

use crate::id_generator::ElementId;

/// Enumeration of all element payloads in the document
#[derive(Debug, Clone, PartialEq)]
pub enum ElementType {
    Text(Text),
    Image(Image),
    Shape(Shape),
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Text(_) => "text",
            ElementType::Image(_) => "image",
            ElementType::Shape(_) => "shape",
        }
    }
}

/// One visual object on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    /// Paint and hit-test order, ascending = drawn later
    pub z_index: i32,
    pub geometry: Geometry,
    pub opacity: f32,
    pub kind: ElementType,
}

impl Element {
    /// Builds an element from an id-less description
    pub fn from_new(id: ElementId, z_index: i32, new: NewElement) -> Self {
        Self {
            id,
            z_index,
            geometry: new.geometry,
            opacity: new.opacity,
            kind: new.kind,
        }
    }

    /// Returns the element's type name as persisted
    pub fn element_type(&self) -> &'static str {
        self.kind.name()
    }

    /// Top-left position before rotation and scale
    pub fn position(&self) -> Pos2 {
        self.geometry.position
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.geometry.rotation_degrees
    }

    /// Axis-aligned bounds of the element as drawn
    pub fn rect(&self) -> Rect {
        self.geometry.bounding_rect()
    }

    /// Tests a point against the rotated, scaled box
    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.geometry.contains(pos)
    }

    /// Returns the text payload, if this is a text element
    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ElementType::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the image payload, if this is an image element
    pub fn as_image(&self) -> Option<&Image> {
        match &self.kind {
            ElementType::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Returns the shape payload, if this is a shape element
    pub fn as_shape(&self) -> Option<&Shape> {
        match &self.kind {
            ElementType::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}

/// An element that has not been added to a document yet, so it has no id or z-index.
#[derive(Debug, Clone, PartialEq)]
pub struct NewElement {
    pub geometry: Geometry,
    pub opacity: f32,
    pub kind: ElementType,
}

impl NewElement {
    /// Creates a fully opaque element description
    pub fn new(geometry: Geometry, kind: ElementType) -> Self {
        Self {
            geometry,
            opacity: 1.0,
            kind,
        }
    }

    /// Moves the element to `position`
    pub fn at(mut self, position: Pos2) -> Self {
        self.geometry.position = position;
        self
    }

    /// Replaces the unscaled size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.geometry.width = width.max(MIN_ELEMENT_SIZE);
        self.geometry.height = height.max(MIN_ELEMENT_SIZE);
        self
    }

    /// Sets the rotation in degrees
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.geometry.rotation_degrees = normalize_degrees(degrees);
        self
    }

    /// Sets the scale, clamped to the minimum
    pub fn scaled(mut self, scale: f32) -> Self {
        self.geometry.scale = scale.max(MIN_ELEMENT_SCALE);
        self
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use crate::config::CanvasSize;

    pub const STICKER_SIZE: f32 = 150.0;
    pub const DEFAULT_INSERT_POSITION: Pos2 = Pos2::new(50.0, 50.0);

    /// Text with the editor's default styling
    pub fn create_text(content: impl Into<String>, position: Pos2) -> NewElement {
        NewElement::new(
            Geometry::new(position, text::DEFAULT_TEXT_WIDTH, text::DEFAULT_TEXT_HEIGHT),
            ElementType::Text(Text::new(content)),
        )
    }

    /// Creates an image element with an explicit box
    pub fn create_image(
        source_uri: impl Into<String>,
        position: Pos2,
        width: f32,
        height: f32,
    ) -> NewElement {
        NewElement::new(
            Geometry::new(position, width, height),
            ElementType::Image(Image::new(source_uri, width, height)),
        )
    }

    /// Creates a 100x100 shape with default styling
    pub fn create_shape(shape_kind: ShapeKind, position: Pos2) -> NewElement {
        NewElement::new(
            Geometry::new(position, DEFAULT_ELEMENT_SIZE, DEFAULT_ELEMENT_SIZE),
            ElementType::Shape(Shape::new(shape_kind)),
        )
    }

    /// An image picked from the device library: a third of the canvas width at 16:9,
    /// never larger than the source itself, anchored at the canvas origin.
    pub fn image_from_asset(
        source_uri: impl Into<String>,
        original_width: f32,
        original_height: f32,
        canvas: CanvasSize,
    ) -> NewElement {
        let target_width = canvas.width / 3.0;
        let width = target_width.min(original_width);
        let height = (target_width * 9.0 / 16.0).min(original_height);
        NewElement::new(
            Geometry::new(Pos2::ZERO, width.max(MIN_ELEMENT_SIZE), height.max(MIN_ELEMENT_SIZE)),
            ElementType::Image(Image::new(source_uri, original_width, original_height)),
        )
    }

    /// A sticker from the asset browser, centered on the canvas
    pub fn sticker(source_uri: impl Into<String>, canvas: CanvasSize) -> NewElement {
        let half = STICKER_SIZE / 2.0;
        let position = Pos2::new(canvas.width / 2.0 - half, canvas.height / 2.0 - half);
        NewElement::new(
            Geometry::new(position, STICKER_SIZE, STICKER_SIZE),
            ElementType::Image(Image::new(source_uri, STICKER_SIZE, STICKER_SIZE)),
        )
    }
}
