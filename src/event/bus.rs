use std::cell::RefCell;
use std::fmt;

use crate::event::{EditorEvent, EventHandler};

/// Broadcasts editor events to subscribed handlers in subscription order.
///
/// Handlers must not emit on the same bus from inside `handle_event`.
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handler_count()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a bus with no handlers
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Registers a handler for all future events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Delivers an event to every handler in subscription order
    pub fn emit(&self, event: EditorEvent) {
        log::trace!("emit {event:?}");
        for handler in self.handlers.borrow_mut().iter_mut() {
            handler.handle_event(&event);
        }
    }

    /// Emits several events in order
    pub fn emit_all(&self, events: impl IntoIterator<Item = EditorEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventLog, SelectionEvent};

    #[test]
    fn handlers_receive_events_in_order() {
        let bus = EventBus::new();
        let log = EventLog::new();
        bus.subscribe(Box::new(log.clone()));

        bus.emit_all([
            EditorEvent::Selection(SelectionEvent::Cleared),
            EditorEvent::History {
                can_undo: true,
                can_redo: false,
            },
        ]);

        assert_eq!(log.len(), 2);
        assert_eq!(
            log.last(),
            Some(EditorEvent::History {
                can_undo: true,
                can_redo: false
            })
        );
    }
}
