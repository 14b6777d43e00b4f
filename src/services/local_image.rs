use std::path::Path;

use futures::future::BoxFuture;

use super::{ImageResolver, ResolvedImage, ServiceError};

pub const MAX_IMAGE_DIMENSION: u32 = 4096;

/// Resolves local file paths (optionally `file://` prefixed) by reading the image header.
#[derive(Debug, Clone)]
pub struct LocalImageProbe {
    max_dimension: u32,
}

impl Default for LocalImageProbe {
    fn default() -> Self {
        Self {
            max_dimension: MAX_IMAGE_DIMENSION,
        }
    }
}

impl LocalImageProbe {
    /// Creates a probe with the default dimension limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a probe with a custom dimension limit
    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    /// Reads the image header and returns its pixel size
    pub fn probe(&self, uri: &str) -> Result<ResolvedImage, ServiceError> {
        let path = Path::new(uri.strip_prefix("file://").unwrap_or(uri));
        if !path.exists() {
            return Err(ServiceError::NotFound(uri.to_owned()));
        }

        let (width, height) = image::image_dimensions(path)?;
        if width > self.max_dimension || height > self.max_dimension {
            return Err(ServiceError::TooLarge {
                width,
                height,
                limit: self.max_dimension,
            });
        }

        log::debug!("Probed {uri}: {width}x{height}");
        Ok(ResolvedImage {
            uri: uri.to_owned(),
            width,
            height,
        })
    }
}

impl ImageResolver for LocalImageProbe {
    fn resolve<'a>(&'a self, uri: &'a str) -> BoxFuture<'a, Result<ResolvedImage, ServiceError>> {
        Box::pin(async move { self.probe(uri) })
    }
}
