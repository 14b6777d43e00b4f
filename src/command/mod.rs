mod history;

pub use history::History;

use crate::element::{ElementPatch, NewElement};
use crate::id_generator::ElementId;

/// A committed mutation of the document.
///
/// Tools and toolbar actions produce these; `EditorModel::execute` applies them and
/// records history.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddElement(NewElement),
    UpdateElement {
        element_id: ElementId,
        patch: ElementPatch,
    },
    RemoveElement(ElementId),
    /// Listed ids take z-index `0..n` in order
    Reorder(Vec<ElementId>),
}

impl Command {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddElement(_) => "add_element",
            Command::UpdateElement { .. } => "update_element",
            Command::RemoveElement(_) => "remove_element",
            Command::Reorder(_) => "reorder",
        }
    }

    /// The element this command acts on, if it targets one
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Command::UpdateElement { element_id, .. } => Some(element_id),
            Command::RemoveElement(element_id) => Some(element_id),
            Command::AddElement(_) | Command::Reorder(_) => None,
        }
    }
}
