//! Narrow interfaces to the outside world: image lookup, template storage, and
//! background removal. The editor only awaits these and applies their results.

mod local_image;

use futures::future::BoxFuture;
use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

pub use local_image::{LocalImageProbe, MAX_IMAGE_DIMENSION};

use crate::element::{factory, ElementPatch};
use crate::id_generator::ElementId;
use crate::state::EditorModel;
use crate::template::{self, DecodeError, EncodeError, TemplateMeta};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image is {width}x{height}, larger than the {limit}x{limit} limit")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Stored template is invalid: {0}")]
    InvalidTemplate(#[from] DecodeError),

    #[error("Template could not be encoded: {0}")]
    Encode(#[from] EncodeError),
}

/// An image reference plus its intrinsic pixel size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub uri: String,
    pub width: u32,
    pub height: u32,
}

pub trait ImageResolver: Send + Sync {
    fn resolve<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, Result<ResolvedImage, ServiceError>>;
}

pub trait TemplateStore: Send + Sync {
    fn load_template<'a>(&'a self, template_id: &'a str) -> BoxFuture<'a, Result<Value, ServiceError>>;

    /// Returns the stored template as the server echoes it back
    fn save_template(&self, template: Value) -> BoxFuture<'_, Result<Value, ServiceError>>;
}

pub trait BackgroundRemover: Send + Sync {
    /// Returns the uri of the processed image
    fn remove_background<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, Result<String, ServiceError>>;
}

/// Replaces an image element's source with its background-removed version.
///
/// On failure the element is left untouched and the error is returned.
pub async fn apply_background_removal(
    model: &mut EditorModel,
    id: &ElementId,
    remover: &dyn BackgroundRemover,
) -> Result<bool, ServiceError> {
    let element = model
        .find_element_by_id(id)
        .ok_or_else(|| ServiceError::NotFound(format!("element {id}")))?;
    let source_uri = element
        .as_image()
        .map(|image| image.source_uri.clone())
        .ok_or_else(|| ServiceError::Rejected(format!("element {id} is not an image")))?;

    let new_uri = remover
        .remove_background(&source_uri)
        .await
        .inspect_err(|err| warn!("Background removal for {id} failed: {err}"))?;

    debug!("Background removed for {id}");
    Ok(model.update_element(id, &ElementPatch::new().source_uri(new_uri)))
}

/// Adds an image picked from the device library, sized from its intrinsic dimensions
pub async fn add_picked_image(
    model: &mut EditorModel,
    uri: &str,
    resolver: &dyn ImageResolver,
) -> Result<ElementId, ServiceError> {
    let resolved = resolver.resolve(uri).await?;
    let canvas = model.config().canvas_size;
    let new_element = factory::image_from_asset(
        resolved.uri,
        resolved.width as f32,
        resolved.height as f32,
        canvas,
    );
    Ok(model.add_element(new_element))
}

/// Adds a sticker chosen in an asset browser
pub fn add_sticker(model: &mut EditorModel, uri: &str) -> ElementId {
    let canvas = model.config().canvas_size;
    model.add_element(factory::sticker(uri, canvas))
}

/// Fetches, decodes and opens a stored template, replacing the session content
pub async fn open_template(
    model: &mut EditorModel,
    store: &dyn TemplateStore,
    template_id: &str,
) -> Result<TemplateMeta, ServiceError> {
    let value = store.load_template(template_id).await?;
    let template = template::decode(&value)?;
    Ok(template.open_in(model))
}

/// Encodes the session and hands it to the store. Encoding errors surface before any
/// request is made.
pub async fn save_session(
    model: &EditorModel,
    meta: &TemplateMeta,
    store: &dyn TemplateStore,
) -> Result<Value, ServiceError> {
    let encoded = template::encode(meta, model.document())?;
    let saved = store.save_template(encoded).await?;
    info!("Saved template '{}'", meta.name);
    Ok(saved)
}
