use egui::Pos2;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use super::schema::{RawElement, RawShadow, RawTemplateMeta};
use super::{DecodeError, Template, TemplateMeta};
use crate::document::Document;
use crate::element::{
    Element, ElementType, FontStyle, FontWeight, Geometry, Image, Shadow, Shape, ShapeKind, Text,
    TextAlign, TextDecoration, DEFAULT_ELEMENT_SIZE,
};
use crate::id_generator::{generate_id, ElementId};

const TEXT_DEFAULT_WIDTH: f32 = 300.0;
const TEXT_DEFAULT_HEIGHT: f32 = 100.0;
const TEXT_DEFAULT_FONT: &str = "serif";
const TEXT_DEFAULT_SIZE_PT: f32 = 24.0;
const DEFAULT_COLOR: &str = "#000000";
const DEFAULT_BORDER_COLOR: &str = "transparent";

/// Parses JSON text and decodes it
pub fn decode_str(json: &str) -> Result<Template, DecodeError> {
    let value: Value = serde_json::from_str(json).inspect_err(|err| {
        warn!("Template JSON did not parse: {err}");
    })?;
    decode(&value)
}

/// Decodes a stored template, applying defaults for absent fields
pub fn decode(value: &Value) -> Result<Template, DecodeError> {
    let Some(root) = value.as_object() else {
        warn!("Template root is not an object");
        return Err(DecodeError::NotAnObject);
    };

    let raw_meta = RawTemplateMeta::deserialize(value).map_err(DecodeError::InvalidMetadata)?;

    let elements = match root.get("elements") {
        None | Some(Value::Null) => {
            debug!("Template has no elements");
            Vec::new()
        }
        Some(Value::Array(records)) => records
            .iter()
            .enumerate()
            .map(|(index, record)| decode_element(index, record))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|err| warn!("Template element rejected: {err}"))?,
        Some(_) => {
            warn!("Template `elements` is not a list");
            return Err(DecodeError::ElementsNotAList);
        }
    };

    let defaults = TemplateMeta::default();
    let meta = TemplateMeta {
        name: raw_meta.name.unwrap_or(defaults.name),
        category: raw_meta.category.unwrap_or(defaults.category),
        thumbnail: raw_meta.thumbnail,
        canvas_size: raw_meta.canvas_size.unwrap_or(defaults.canvas_size),
        is_public: raw_meta.is_public.unwrap_or(defaults.is_public),
    };

    Ok(Template {
        meta,
        document: Document::with_elements(elements, raw_meta.background_image),
    })
}

fn decode_element(index: usize, record: &Value) -> Result<Element, DecodeError> {
    let raw = RawElement::deserialize(record)
        .map_err(|source| DecodeError::InvalidElement { index, source })?;

    let kind_name = raw
        .kind
        .as_deref()
        .ok_or(DecodeError::MissingField { index, field: "type" })?;
    let position = raw
        .position
        .ok_or(DecodeError::MissingField { index, field: "position" })?;

    let id = match &raw.id {
        Some(id) if !id.is_empty() => ElementId::new(id.as_str()),
        _ => {
            let id = generate_id();
            debug!("Element {index} has no id, assigned {id}");
            id
        }
    };

    let (default_width, default_height) = match kind_name {
        "text" => (TEXT_DEFAULT_WIDTH, TEXT_DEFAULT_HEIGHT),
        _ => {
            let side = raw.size.unwrap_or(DEFAULT_ELEMENT_SIZE);
            (side, side)
        }
    };
    let width = raw.width.unwrap_or_else(|| {
        debug!("Element {index} has no width, using {default_width}");
        default_width
    });
    let height = raw.height.unwrap_or(default_height);

    let kind = match kind_name {
        "text" => ElementType::Text(decode_text(index, &raw)?),
        "image" => ElementType::Image(decode_image(index, &raw, width, height)?),
        "shape" => ElementType::Shape(decode_shape(index, &raw)?),
        other => return Err(invalid(index, "type", other)),
    };

    let geometry = Geometry {
        position: Pos2::new(position.x, position.y),
        width,
        height,
        rotation_degrees: crate::element::normalize_degrees(raw.rotation.unwrap_or(0.0)),
        scale: raw.scale.unwrap_or(1.0),
    };

    Ok(Element {
        id,
        z_index: raw.z_index.map_or(index as i32, |z| z.round() as i32),
        geometry,
        opacity: raw.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
        kind,
    })
}

fn decode_text(index: usize, raw: &RawElement) -> Result<Text, DecodeError> {
    let (mut font_weight, font_style) = match raw.font_style.as_deref() {
        None | Some("normal") => (FontWeight::Normal, FontStyle::Normal),
        Some("italic") => (FontWeight::Normal, FontStyle::Italic),
        Some("bold") => (FontWeight::Bold, FontStyle::Normal),
        Some("bold-italic") => (FontWeight::Bold, FontStyle::Italic),
        Some(other) => return Err(invalid(index, "fontStyle", other)),
    };
    if let Some(weight) = &raw.font_weight {
        font_weight = decode_font_weight(index, weight)?;
    }

    let text_align = match raw.alignment.as_deref() {
        None | Some("left") => TextAlign::Left,
        Some("center") => TextAlign::Center,
        Some("right") => TextAlign::Right,
        Some(other) => return Err(invalid(index, "alignment", other)),
    };

    let text_decoration = match raw.text_decoration_line.as_deref() {
        None | Some("none") => TextDecoration::None,
        Some("underline") => TextDecoration::Underline,
        Some("line-through") => TextDecoration::LineThrough,
        Some("underline line-through") | Some("line-through underline") => TextDecoration::Both,
        Some(other) => return Err(invalid(index, "textDecorationLine", other)),
    };

    Ok(Text {
        content: raw.content.clone().unwrap_or_default(),
        font_family: raw.font.clone().unwrap_or_else(|| TEXT_DEFAULT_FONT.to_owned()),
        font_size_pt: raw.size.unwrap_or(TEXT_DEFAULT_SIZE_PT),
        color_hex: raw.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
        font_weight,
        font_style,
        text_align,
        text_decoration,
    })
}

fn decode_font_weight(index: usize, weight: &Value) -> Result<FontWeight, DecodeError> {
    match weight {
        Value::String(keyword) => match keyword.as_str() {
            "normal" => Ok(FontWeight::Normal),
            "bold" => Ok(FontWeight::Bold),
            numeric => match numeric.parse::<f64>() {
                Ok(n) => Ok(weight_from_number(n)),
                Err(_) => Err(invalid(index, "fontWeight", numeric)),
            },
        },
        Value::Number(number) => number
            .as_f64()
            .map(weight_from_number)
            .ok_or_else(|| invalid(index, "fontWeight", &number.to_string())),
        other => Err(invalid(index, "fontWeight", &other.to_string())),
    }
}

fn weight_from_number(weight: f64) -> FontWeight {
    if weight >= 600.0 {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    }
}

fn decode_image(index: usize, raw: &RawElement, width: f32, height: f32) -> Result<Image, DecodeError> {
    let uri = raw
        .uri
        .as_deref()
        .filter(|uri| !uri.trim().is_empty())
        .ok_or(DecodeError::MissingField { index, field: "uri" })?;
    Ok(Image::new(
        uri,
        raw.original_width.unwrap_or(width),
        raw.original_height.unwrap_or(height),
    ))
}

fn decode_shape(index: usize, raw: &RawElement) -> Result<Shape, DecodeError> {
    let shape_kind = match raw.shape_type.as_deref() {
        None => return Err(DecodeError::MissingField { index, field: "shapeType" }),
        Some("rectangle") => ShapeKind::Rectangle,
        Some("circle") => ShapeKind::Circle,
        Some("triangle") => ShapeKind::Triangle,
        Some(other) => return Err(invalid(index, "shapeType", other)),
    };

    Ok(Shape {
        shape_kind,
        fill_color_hex: raw.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
        border_width: raw.border_width.unwrap_or(0.0),
        border_color_hex: raw
            .border_color
            .clone()
            .unwrap_or_else(|| DEFAULT_BORDER_COLOR.to_owned()),
        corner_radius: raw.border_radius.unwrap_or(0.0),
        shadow: raw.shadow.as_ref().map(decode_shadow),
    })
}

fn decode_shadow(raw: &RawShadow) -> Shadow {
    let defaults = Shadow::default();
    Shadow {
        dx: raw.dx.unwrap_or(defaults.dx),
        dy: raw.dy.unwrap_or(defaults.dy),
        blur: raw.blur.unwrap_or(defaults.blur),
        color_hex: raw.color.clone().unwrap_or(defaults.color_hex),
    }
}

fn invalid(index: usize, field: &'static str, value: &str) -> DecodeError {
    DecodeError::InvalidValue {
        index,
        field,
        value: value.to_owned(),
    }
}
