mod model;

pub use model::{
    CommandOutcome, EditorModel, DEFAULT_TITLE, DEFAULT_TITLE_SIZE_PT, PLACEHOLDER_BACKGROUND,
};
