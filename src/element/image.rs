/// Raster image element. Only the source reference is stored; decoding pixels is the
/// host's business.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub source_uri: String,
    /// Intrinsic pixel size of the source
    pub original_width: f32,
    pub original_height: f32,
}

impl Image {
    /// Creates an image element payload
    pub fn new(source_uri: impl Into<String>, original_width: f32, original_height: f32) -> Self {
        Self {
            source_uri: source_uri.into(),
            original_width,
            original_height,
        }
    }

    /// False for a blank source, which cannot be persisted
    pub fn has_source(&self) -> bool {
        !self.source_uri.trim().is_empty()
    }
}
