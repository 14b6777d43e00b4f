use std::collections::HashSet;

use egui::Pos2;
use log::{debug, info};

use crate::command::{Command, History};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::element::{factory, Element, ElementPatch, ElementType, FontWeight, NewElement, TextAlign};
use crate::event::{DocumentEvent, EditorEvent, EventBus, EventHandler, SelectionEvent};
use crate::id_generator::{generate_id, ElementId};
use crate::selection::SelectionManager;

/// White 1x1 PNG used as the starter background
pub const PLACEHOLDER_BACKGROUND: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAACklEQVR4nGMAAQAABQABDQottAAAAABJRU5ErkJggg==";
pub const DEFAULT_TITLE: &str = "Your Title Here";
pub const DEFAULT_TITLE_SIZE_PT: f32 = 32.0;

/// What a command did to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(ElementId),
    Updated(ElementId),
    Removed(ElementId),
    Reordered,
    Unchanged,
}

impl CommandOutcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, CommandOutcome::Unchanged)
    }
}

/// One editing session: the document, its history, the selection, and the event bus
/// that tells the UI about changes.
#[derive(Debug)]
pub struct EditorModel {
    document: Document,
    history: History,
    selection: SelectionManager,
    event_bus: EventBus,
    config: EditorConfig,
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorModel {
    /// Creates an empty session with the default config
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Creates an empty session using `config`
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            history: History::with_limit(config.history_limit),
            selection: SelectionManager::new(),
            event_bus: EventBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The committed document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Committed elements in insertion order
    pub fn elements(&self) -> &[Element] {
        self.document.elements()
    }

    pub fn background_image(&self) -> Option<&str> {
        self.document.background_image()
    }

    /// Undo and redo stacks
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Registers a handler for editor events
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.event_bus.subscribe(Box::new(handler));
    }

    /// Finds a committed element by id
    pub fn find_element_by_id(&self, id: &ElementId) -> Option<&Element> {
        self.document.find_element_by_id(id)
    }

    /// Topmost element under `pos`
    pub fn element_at(&self, pos: Pos2) -> Option<&Element> {
        self.document.element_at_position(pos)
    }

    /// Adds an element on top of the others and returns its new id
    pub fn add_element(&mut self, new_element: NewElement) -> ElementId {
        self.record_history();
        let id = generate_id();
        let z_index = self.document.len() as i32;
        self.document
            .elements_mut()
            .push(Element::from_new(id.clone(), z_index, new_element));
        debug!("Added element {id} at z {z_index}");
        self.emit_document(DocumentEvent::ElementAdded(id.clone()));
        id
    }

    /// Merges `patch` into the element. An unknown id is a no-op, since gesture callbacks
    /// can arrive after the element was deleted.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(element) = self.document.find_element_by_id(id) else {
            debug!("Ignoring update for missing element {id}");
            return false;
        };

        let mut updated = element.clone();
        if !patch.apply_to(&mut updated) {
            return false;
        }

        self.record_history();
        if let Some(slot) = self.document.find_element_by_id_mut(id) {
            *slot = updated;
        }
        self.emit_document(DocumentEvent::ElementUpdated(id.clone()));
        true
    }

    /// Removes an element and clears the selection if it pointed there
    pub fn remove_element(&mut self, id: &ElementId) -> bool {
        let Some(index) = self.document.index_of(id) else {
            debug!("Ignoring removal of missing element {id}");
            return false;
        };

        self.record_history();
        self.document.elements_mut().remove(index);
        if self.selection.is_selected(id) {
            self.selection.deselect();
            self.event_bus
                .emit(EditorEvent::Selection(SelectionEvent::Cleared));
        }
        self.emit_document(DocumentEvent::ElementRemoved(id.clone()));
        true
    }

    /// Bulk replace without touching history
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.document.replace_elements(elements);
        self.drop_dangling_selection();
        self.event_bus
            .emit(EditorEvent::Document(DocumentEvent::ElementsReplaced));
    }

    /// Listed ids take z-index `0..n` in the given order. Unknown ids are skipped and
    /// unlisted elements follow in their existing paint order.
    pub fn reorder(&mut self, order: &[ElementId]) -> bool {
        let mut seen = HashSet::new();
        let mut ranked: Vec<ElementId> = order
            .iter()
            .filter(|id| self.document.contains(id) && seen.insert((*id).clone()))
            .cloned()
            .collect();
        let unlisted: Vec<ElementId> = self
            .document
            .paint_order()
            .into_iter()
            .filter(|element| !seen.contains(&element.id))
            .map(|element| element.id.clone())
            .collect();
        ranked.extend(unlisted);

        let mut reordered = self.document.elements().to_vec();
        for element in &mut reordered {
            if let Some(rank) = ranked.iter().position(|id| id == &element.id) {
                element.z_index = rank as i32;
            }
        }

        if reordered == self.document.elements() {
            debug!("Reorder left z-indices unchanged");
            return false;
        }

        self.record_history();
        self.document.replace_elements(reordered);
        self.emit_document(DocumentEvent::Reordered);
        true
    }

    /// Paints the element above all others
    pub fn bring_to_front(&mut self, id: &ElementId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        let mut order = self.paint_order_ids();
        order.retain(|other| other != id);
        order.push(id.clone());
        self.reorder(&order)
    }

    /// Paints the element below all others
    pub fn send_to_back(&mut self, id: &ElementId) -> bool {
        if !self.document.contains(id) {
            return false;
        }
        let mut order = self.paint_order_ids();
        order.retain(|other| other != id);
        order.insert(0, id.clone());
        self.reorder(&order)
    }

    /// Background changes are not part of element history
    pub fn set_background(&mut self, background_image: Option<String>) {
        if self.document.background_image() == background_image.as_deref() {
            return;
        }
        self.document.set_background_image(background_image);
        self.event_bus
            .emit(EditorEvent::Document(DocumentEvent::BackgroundChanged));
    }

    /// Replaces the canvas with the starter composition
    pub fn reset_to_default(&mut self) {
        let mut title = factory::create_text(DEFAULT_TITLE, factory::DEFAULT_INSERT_POSITION);
        if let ElementType::Text(text) = &mut title.kind {
            text.font_size_pt = DEFAULT_TITLE_SIZE_PT;
            text.font_weight = FontWeight::Bold;
            text.text_align = TextAlign::Center;
        }
        let elements = vec![Element::from_new(generate_id(), 0, title)];
        self.set_elements(elements);
        self.set_background(Some(PLACEHOLDER_BACKGROUND.to_owned()));
        info!("Canvas reset to default composition");
    }

    /// Replaces the whole session content, as when opening a saved template
    pub fn load_document(&mut self, document: Document) {
        let background = document.background_image().map(str::to_owned);
        self.set_elements(document.elements().to_vec());
        self.set_background(background);
        self.history.clear();
        self.emit_history();
    }

    /// Applies a committed command and reports what it did
    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        debug!("Executing {}", command.name());
        match command {
            Command::AddElement(new_element) => CommandOutcome::Added(self.add_element(new_element)),
            Command::UpdateElement { element_id, patch } => {
                if self.update_element(&element_id, &patch) {
                    CommandOutcome::Updated(element_id)
                } else {
                    CommandOutcome::Unchanged
                }
            }
            Command::RemoveElement(element_id) => {
                if self.remove_element(&element_id) {
                    CommandOutcome::Removed(element_id)
                } else {
                    CommandOutcome::Unchanged
                }
            }
            Command::Reorder(order) => {
                if self.reorder(&order) {
                    CommandOutcome::Reordered
                } else {
                    CommandOutcome::Unchanged
                }
            }
        }
    }

    /// Returns true if there is anything to undo
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there is anything to redo
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restores the previous elements. Returns false when history is empty
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo(self.document.elements()) else {
            debug!("Nothing to undo");
            return false;
        };
        self.restore_snapshot(snapshot);
        true
    }

    /// Reapplies the last undone change. Returns false when there is none
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo(self.document.elements()) else {
            debug!("Nothing to redo");
            return false;
        };
        self.restore_snapshot(snapshot);
        true
    }

    /// The selected element's id
    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selection.current()
    }

    /// The selected element, if it still exists
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection
            .current()
            .and_then(|id| self.document.find_element_by_id(id))
    }

    /// Refuses ids that are not in the document
    pub fn select(&mut self, id: &ElementId) -> bool {
        if !self.document.contains(id) {
            debug!("Refusing to select missing element {id}");
            return false;
        }
        if self.selection.select(id.clone()) {
            self.event_bus
                .emit(EditorEvent::Selection(SelectionEvent::Selected(id.clone())));
        }
        true
    }

    /// Clears the selection
    pub fn deselect(&mut self) {
        if self.selection.deselect().is_some() {
            self.event_bus
                .emit(EditorEvent::Selection(SelectionEvent::Cleared));
        }
    }

    /// A tap on empty canvas
    pub fn tap_background(&mut self, drag_in_progress: bool) -> bool {
        let cleared = self.selection.handle_background_tap(drag_in_progress).is_some();
        if cleared {
            self.event_bus
                .emit(EditorEvent::Selection(SelectionEvent::Cleared));
        }
        cleared
    }

    fn paint_order_ids(&self) -> Vec<ElementId> {
        self.document
            .paint_order()
            .into_iter()
            .map(|element| element.id.clone())
            .collect()
    }

    fn record_history(&mut self) {
        self.history
            .record_before_mutation(self.document.elements().to_vec());
    }

    fn restore_snapshot(&mut self, snapshot: Vec<Element>) {
        self.document.replace_elements(snapshot);
        self.drop_dangling_selection();
        self.event_bus
            .emit(EditorEvent::Document(DocumentEvent::ElementsReplaced));
        self.emit_history();
    }

    fn drop_dangling_selection(&mut self) {
        let document = &self.document;
        if let Some(id) = self.selection.retain_if(|id| document.contains(id)) {
            debug!("Selection cleared, element {id} is gone");
            self.event_bus
                .emit(EditorEvent::Selection(SelectionEvent::Cleared));
        }
    }

    fn emit_document(&self, event: DocumentEvent) {
        self.event_bus.emit(EditorEvent::Document(event));
        self.emit_history();
    }

    fn emit_history(&self) {
        self.event_bus.emit(EditorEvent::History {
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        });
    }
}
