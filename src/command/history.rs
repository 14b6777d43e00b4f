use std::collections::VecDeque;

use log::debug;

use crate::element::Element;

/// Snapshot-based undo/redo over the document's element list.
///
/// `past` runs older to newer. `future` holds the most recently undone snapshot at the
/// front.
#[derive(Debug, Clone, Default)]
pub struct History {
    past: Vec<Vec<Element>>,
    future: VecDeque<Vec<Element>>,
    limit: Option<usize>,
}

impl History {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` undo steps, dropping the oldest first
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Records the elements as they were before a mutation and clears redo
    pub fn record_before_mutation(&mut self, previous: Vec<Element>) {
        self.past.push(previous);
        self.future.clear();

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let overflow = self.past.len() - limit;
                self.past.drain(..overflow);
                debug!("History limit {limit} reached, dropped {overflow} oldest snapshot(s)");
            }
        }
    }

    /// Returns the snapshot to restore, or `None` when there is nothing to undo
    pub fn undo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let snapshot = self.past.pop()?;
        self.future.push_front(current.to_vec());
        Some(snapshot)
    }

    /// Returns the next snapshot to restore, or None when there is nothing to redo
    pub fn redo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let snapshot = self.future.pop_front()?;
        self.past.push(current.to_vec());
        Some(snapshot)
    }

    /// Returns true if there are snapshots to undo
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Returns true if there are snapshots to redo
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Drops both stacks
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{factory, ShapeKind};
    use crate::id_generator::ElementId;
    use egui::Pos2;

    fn snapshot(count: usize) -> Vec<Element> {
        (0..count)
            .map(|i| {
                Element::from_new(
                    ElementId::new(format!("e{i}")),
                    i as i32,
                    factory::create_shape(ShapeKind::Circle, Pos2::ZERO),
                )
            })
            .collect()
    }

    #[test]
    fn empty_history_is_noop() {
        let mut history = History::new();
        assert!(history.undo(&[]).is_none());
        assert!(history.redo(&[]).is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        history.record_before_mutation(snapshot(0));
        history.record_before_mutation(snapshot(1));
        history.record_before_mutation(snapshot(2));
        assert_eq!(history.past_len(), 2);

        let restored = history.undo(&snapshot(3)).unwrap();
        assert_eq!(restored.len(), 2);
        let restored = history.undo(&restored).unwrap();
        assert_eq!(restored.len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn future_front_is_most_recent_undo() {
        let mut history = History::new();
        history.record_before_mutation(snapshot(0));
        history.record_before_mutation(snapshot(1));

        let current = snapshot(2);
        let one = history.undo(&current).unwrap();
        let zero = history.undo(&one).unwrap();
        assert!(zero.is_empty());
        assert_eq!(history.future_len(), 2);

        assert_eq!(history.redo(&zero).unwrap().len(), 1);
        assert_eq!(history.redo(&one).unwrap().len(), 2);
    }
}
