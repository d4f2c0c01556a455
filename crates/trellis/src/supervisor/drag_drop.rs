//! Drag and drop state machine.
//!
//! The supervisor tracks at most one drag at a time. While a drag is active,
//! normal pointer routing is suppressed: the subject (if any) receives
//! `DragMove` every tick, and releasing the primary button fires `Drop` on
//! every widget under the cursor and returns to `Idle`.

use crate::widget::WidgetId;

/// Current drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A drag is in progress, optionally carrying a subject widget.
    Dragging { subject: Option<WidgetId> },
}

impl DragState {
    /// Begin a drag with no subject.
    pub fn start(&mut self) {
        *self = Self::Dragging { subject: None };
    }

    /// Begin a drag carrying `subject`.
    pub fn start_widget(&mut self, subject: WidgetId) {
        *self = Self::Dragging {
            subject: Some(subject),
        };
    }

    /// End the drag and forget the subject.
    pub fn stop(&mut self) {
        *self = Self::Idle;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The widget being dragged, if any.
    pub fn subject(&self) -> Option<WidgetId> {
        match self {
            Self::Dragging { subject } => *subject,
            Self::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn test_drag_lifecycle() {
        let mut map: SlotMap<WidgetId, ()> = SlotMap::with_key();
        let id = map.insert(());

        let mut drag = DragState::default();
        assert!(!drag.is_dragging());

        drag.start();
        assert!(drag.is_dragging());
        assert_eq!(drag.subject(), None);

        drag.start_widget(id);
        assert_eq!(drag.subject(), Some(id));

        drag.stop();
        assert_eq!(drag, DragState::Idle);
        assert_eq!(drag.subject(), None);
    }
}
