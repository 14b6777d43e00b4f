mod bus;
mod events;

use std::sync::Arc;

use parking_lot::Mutex;

pub use bus::EventBus;
pub use events::{DocumentEvent, EditorEvent, SelectionEvent, TransformEvent, TransformPhase};

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&EditorEvent) + Send,
{
    fn handle_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// Records every event it receives. Clones share the same buffer, so one clone can be
/// subscribed while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<EditorEvent>>>,
}

impl EventLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event recorded so far
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().clone()
    }

    /// The most recent event
    pub fn last(&self) -> Option<EditorEvent> {
        self.events.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Forgets all recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }

    /// Counts recorded events matching `predicate`
    pub fn count_matching(&self, predicate: impl Fn(&EditorEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|event| predicate(event)).count()
    }
}

impl EventHandler for EventLog {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.lock().push(event.clone());
    }
}
