//! Wire shapes of the persisted template.
//!
//! `Raw*` types are the lenient read side: every field is optional so that defaulting and
//! error reporting happen in `decode`. `*Record` types are the strict write side.

use serde::{Deserialize, Serialize};

use crate::config::CanvasSize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePosition {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawTemplateMeta {
    pub name: Option<String>,
    pub category: Option<String>,
    pub background_image: Option<String>,
    pub thumbnail: Option<String>,
    pub canvas_size: Option<CanvasSize>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawShadow {
    pub dx: Option<f32>,
    pub dy: Option<f32>,
    pub blur: Option<f32>,
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RawElement {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub position: Option<WirePosition>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub z_index: Option<f64>,
    pub opacity: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Font size for text, fallback box size for images and shapes
    pub size: Option<f32>,

    pub content: Option<String>,
    pub font: Option<String>,
    pub color: Option<String>,
    pub font_style: Option<String>,
    /// Either a keyword or a CSS numeric weight
    pub font_weight: Option<serde_json::Value>,
    pub alignment: Option<String>,
    pub text_decoration_line: Option<String>,

    pub uri: Option<String>,
    pub original_width: Option<f32>,
    pub original_height: Option<f32>,

    pub shape_type: Option<String>,
    pub border_width: Option<f32>,
    pub border_color: Option<String>,
    pub border_radius: Option<f32>,
    pub shadow: Option<RawShadow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateRecord {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub elements: Vec<ElementRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub canvas_size: CanvasSize,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommonRecord {
    pub id: String,
    pub position: WirePosition,
    pub rotation: f32,
    pub scale: f32,
    pub z_index: i32,
    pub opacity: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum ElementRecord {
    Text(TextRecord),
    Image(ImageRecord),
    Shape(ShapeRecord),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextRecord {
    #[serde(flatten)]
    pub common: CommonRecord,
    pub content: String,
    pub font: String,
    pub size: f32,
    pub color: String,
    pub font_style: &'static str,
    pub alignment: &'static str,
    pub text_decoration_line: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageRecord {
    #[serde(flatten)]
    pub common: CommonRecord,
    pub uri: String,
    pub original_width: f32,
    pub original_height: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShapeRecord {
    #[serde(flatten)]
    pub common: CommonRecord,
    pub shape_type: &'static str,
    pub color: String,
    pub border_width: f32,
    pub border_color: String,
    pub border_radius: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ShadowRecord {
    pub dx: f32,
    pub dy: f32,
    pub blur: f32,
    pub color: String,
}
