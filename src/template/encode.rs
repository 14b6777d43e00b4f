use serde_json::Value;

use super::schema::{
    CommonRecord, ElementRecord, ImageRecord, ShadowRecord, ShapeRecord, TemplateRecord,
    TextRecord, WirePosition,
};
use super::{EncodeError, TemplateMeta};
use crate::document::Document;
use crate::element::{Element, ElementType, FontStyle, FontWeight, Text, TextDecoration};

/// Encodes the document and metadata as a template JSON value
pub fn encode(meta: &TemplateMeta, document: &Document) -> Result<Value, EncodeError> {
    let record = build_record(meta, document)?;
    Ok(serde_json::to_value(record)?)
}

/// Encodes straight to JSON text
pub fn encode_string(meta: &TemplateMeta, document: &Document) -> Result<String, EncodeError> {
    let record = build_record(meta, document)?;
    Ok(serde_json::to_string(&record)?)
}

fn build_record(meta: &TemplateMeta, document: &Document) -> Result<TemplateRecord, EncodeError> {
    let elements = document
        .elements()
        .iter()
        .map(encode_element)
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| log::warn!("Template encode failed: {err}"))?;

    Ok(TemplateRecord {
        name: meta.name.clone(),
        category: meta.category.clone(),
        background_image: document.background_image().map(str::to_owned),
        elements,
        thumbnail: meta.thumbnail.clone(),
        canvas_size: meta.canvas_size,
        is_public: meta.is_public,
    })
}

fn encode_element(element: &Element) -> Result<ElementRecord, EncodeError> {
    let geometry = &element.geometry;
    let common = CommonRecord {
        id: element.id.to_string(),
        position: WirePosition {
            x: geometry.position.x,
            y: geometry.position.y,
        },
        rotation: geometry.rotation_degrees,
        scale: geometry.scale,
        z_index: element.z_index,
        opacity: element.opacity,
        width: geometry.width,
        height: geometry.height,
    };

    let record = match &element.kind {
        ElementType::Text(text) => ElementRecord::Text(TextRecord {
            common,
            content: text.content.clone(),
            font: text.font_family.clone(),
            size: text.font_size_pt,
            color: text.color_hex.clone(),
            font_style: font_style_keyword(text),
            alignment: text.text_align.as_str(),
            text_decoration_line: decoration_keyword(text.text_decoration),
        }),
        ElementType::Image(image) => {
            if !image.has_source() {
                return Err(EncodeError::MissingImageSource {
                    id: element.id.clone(),
                });
            }
            ElementRecord::Image(ImageRecord {
                common,
                uri: image.source_uri.clone(),
                original_width: image.original_width,
                original_height: image.original_height,
            })
        }
        ElementType::Shape(shape) => ElementRecord::Shape(ShapeRecord {
            common,
            shape_type: shape.shape_kind.as_str(),
            color: shape.fill_color_hex.clone(),
            border_width: shape.border_width,
            border_color: shape.border_color_hex.clone(),
            border_radius: shape.corner_radius,
            shadow: shape.shadow.as_ref().map(|shadow| ShadowRecord {
                dx: shadow.dx,
                dy: shadow.dy,
                blur: shadow.blur,
                color: shadow.color_hex.clone(),
            }),
        }),
    };
    Ok(record)
}

fn font_style_keyword(text: &Text) -> &'static str {
    match (text.font_weight, text.font_style) {
        (FontWeight::Normal, FontStyle::Normal) => "normal",
        (FontWeight::Normal, FontStyle::Italic) => "italic",
        (FontWeight::Bold, FontStyle::Normal) => "bold",
        (FontWeight::Bold, FontStyle::Italic) => "bold-italic",
    }
}

fn decoration_keyword(decoration: TextDecoration) -> &'static str {
    match decoration {
        TextDecoration::None => "none",
        TextDecoration::Underline => "underline",
        TextDecoration::LineThrough => "line-through",
        TextDecoration::Both => "underline line-through",
    }
}
