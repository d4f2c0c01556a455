//! Modal popup stack.
//!
//! While the stack is non-empty only the topmost modal and its descendants
//! receive pointer events. A modal can only be popped by itself, which keeps
//! one popup from dismissing another that was opened on top of it.

use crate::widget::WidgetId;

/// Stack of active modals; the last entry is the active one.
#[derive(Debug, Default)]
pub(crate) struct ModalStack {
    stack: Vec<WidgetId>,
}

impl ModalStack {
    /// Push a modal, returning the new depth.
    pub(crate) fn push(&mut self, id: WidgetId) -> usize {
        self.stack.push(id);
        self.stack.len()
    }

    /// Pop `id` if and only if it is the active modal.
    pub(crate) fn pop(&mut self, id: WidgetId) -> bool {
        if self.stack.last() == Some(&id) {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// The active modal.
    pub(crate) fn top(&self) -> Option<WidgetId> {
        self.stack.last().copied()
    }

    /// Modals from bottom to top.
    pub(crate) fn bottom_to_top(&self) -> Vec<WidgetId> {
        self.stack.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn test_only_top_can_pop() {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let a = map.insert(());
        let b = map.insert(());

        let mut stack = ModalStack::default();
        assert_eq!(stack.push(a), 1);
        assert_eq!(stack.push(b), 2);
        assert_eq!(stack.top(), Some(b));

        assert!(!stack.pop(a));
        assert_eq!(stack.len(), 2);
        assert!(stack.pop(b));
        assert!(stack.pop(a));
        assert_eq!(stack.top(), None);
        assert!(!stack.pop(a));
    }
}
