use crate::id_generator::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformPhase {
    Idle,
    Dragging,
    Resizing,
    Rotating,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransformEvent {
    Started {
        element_id: ElementId,
        phase: TransformPhase,
    },
    Completed {
        element_id: ElementId,
        /// False when the gesture ended where it began and nothing was committed
        changed: bool,
    },
    Cancelled {
        element_id: ElementId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentEvent {
    ElementAdded(ElementId),
    ElementUpdated(ElementId),
    ElementRemoved(ElementId),
    /// Bulk replace, undo or redo
    ElementsReplaced,
    Reordered,
    BackgroundChanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Selected(ElementId),
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Document(DocumentEvent),
    Selection(SelectionEvent),
    Transform(TransformEvent),
    History { can_undo: bool, can_redo: bool },
}
