use crate::id_generator::ElementId;

/// Tracks the single active element.
///
/// Presence checks against the document happen in `EditorModel`, which owns both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    selected: Option<ElementId>,
}

impl SelectionManager {
    /// Creates a manager with nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the selection changed
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.selected.as_ref() == Some(&id) {
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Returns the id that was selected, if any
    pub fn deselect(&mut self) -> Option<ElementId> {
        self.selected.take()
    }

    /// The selected id, if any
    pub fn current(&self) -> Option<&ElementId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// A tap that hit nothing. Clears the selection unless a drag is still in progress.
    pub fn handle_background_tap(&mut self, drag_in_progress: bool) -> Option<ElementId> {
        if drag_in_progress {
            return None;
        }
        self.deselect()
    }

    /// Drops the selection if it no longer refers to a live element
    pub fn retain_if(&mut self, mut is_present: impl FnMut(&ElementId) -> bool) -> Option<ElementId> {
        match &self.selected {
            Some(id) if !is_present(id) => self.selected.take(),
            _ => None,
        }
    }
}
