//! Conversion between the editor document and the persisted template JSON.

mod decode;
mod encode;
pub(crate) mod schema;

use thiserror::Error;

use crate::config::CanvasSize;
use crate::document::Document;
use crate::id_generator::ElementId;
use crate::state::EditorModel;

pub use decode::{decode, decode_str};
pub use encode::{encode, encode_string};
pub use schema::WirePosition;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Template root is not a JSON object")]
    NotAnObject,

    #[error("Template `elements` is not a list")]
    ElementsNotAList,

    #[error("Element {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Element {index} has invalid `{field}`: {value}")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("Element {index} is malformed: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template metadata is malformed: {0}")]
    InvalidMetadata(#[source] serde_json::Error),

    #[error("Failed to parse template JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Image element {id} has no source")]
    MissingImageSource { id: ElementId },

    #[error("Failed to serialize template: {0}")]
    Json(#[from] serde_json::Error),
}

/// Template fields that live beside the document
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMeta {
    pub name: String,
    pub category: String,
    pub thumbnail: Option<String>,
    pub canvas_size: CanvasSize,
    pub is_public: bool,
}

impl Default for TemplateMeta {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            thumbnail: None,
            canvas_size: CanvasSize::default(),
            is_public: true,
        }
    }
}

impl TemplateMeta {
    /// Creates public metadata with the default canvas size
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            ..Self::default()
        }
    }
}

/// A decoded template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub meta: TemplateMeta,
    pub document: Document,
}

impl Template {
    /// Loads the document into a live session, replacing its content and history
    pub fn open_in(self, model: &mut EditorModel) -> TemplateMeta {
        log::info!(
            "Opening template '{}' with {} element(s)",
            self.meta.name,
            self.document.len()
        );
        model.load_document(self.document);
        self.meta
    }
}
