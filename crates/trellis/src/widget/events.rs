//! Event kinds, handler results, and the context handed to handlers.
//!
//! Widgets never receive raw input. The [`Supervisor`](crate::Supervisor)
//! turns each input sample into synthetic [`Event`]s and fires them through
//! [`WidgetTree::event`], which runs the handlers registered with
//! [`WidgetTree::handle`] in registration order.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use trellis_render::Point;

use super::{WidgetId, WidgetTree};
use crate::supervisor::Supervisor;

/// A synthetic event kind.
///
/// The window kinds (`CloseWindow`, `MaximizeWindow`, `MinimizeWindow`) are
/// only ever fired by widgets at other widgets; the supervisor does not
/// interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    /// The cursor entered the widget.
    MouseOver,
    /// The cursor left the widget.
    MouseOut,
    /// The primary button went down over the widget.
    MouseDown,
    /// The primary button was released.
    MouseUp,
    /// A press and release both happened over the widget.
    Click,
    /// A key went down while the widget had focus.
    KeyDown,
    /// A key was released while the widget had focus.
    KeyUp,
    /// A key produced a character while the widget had focus.
    KeyPress,
    /// The cursor moved while this widget was the drag subject.
    DragMove,
    /// A drag ended with the cursor over this widget.
    Drop,
    /// The primary button was pressed outside the active modal.
    CloseModal,
    /// The window should close.
    CloseWindow,
    /// The window should toggle its maximized state.
    MaximizeWindow,
    /// The window should minimize.
    MinimizeWindow,
}

impl Event {
    /// Stable lowercase name, used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MouseOver => "mouse_over",
            Self::MouseOut => "mouse_out",
            Self::MouseDown => "mouse_down",
            Self::MouseUp => "mouse_up",
            Self::Click => "click",
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::KeyPress => "key_press",
            Self::DragMove => "drag_move",
            Self::Drop => "drop",
            Self::CloseModal => "close_modal",
            Self::CloseWindow => "close_window",
            Self::MaximizeWindow => "maximize_window",
            Self::MinimizeWindow => "minimize_window",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether event delivery should continue past a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Propagation {
    /// Keep delivering.
    #[default]
    Continue,
    /// Stop delivering to later handlers and later widgets in this pass.
    Stop,
}

impl Propagation {
    /// Whether this is [`Propagation::Stop`].
    #[inline]
    pub fn is_stop(self) -> bool {
        self == Self::Stop
    }
}

/// Outcome of firing an event at one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventResult {
    /// The widget has no handlers for this event. This is routine.
    NoHandler,
    /// At least one handler ran and none asked to stop.
    Handled,
    /// A handler returned [`Propagation::Stop`].
    StopPropagation,
}

impl EventResult {
    /// Whether any handler ran.
    #[inline]
    pub fn was_handled(self) -> bool {
        !matches!(self, Self::NoHandler)
    }

    /// Whether a handler asked to stop propagation.
    #[inline]
    pub fn is_stop(self) -> bool {
        matches!(self, Self::StopPropagation)
    }
}

/// Everything a handler can see and touch while it runs.
///
/// The handler's own list is detached from the widget for the duration of the
/// call, so handlers may freely register more handlers or fire events at
/// other widgets through `tree`.
pub struct EventContext<'a> {
    /// The whole widget tree.
    pub tree: &'a mut WidgetTree,
    /// The supervisor delivering the event, if any.
    pub supervisor: Option<&'a Supervisor>,
    /// The widget the event was fired at.
    pub widget: WidgetId,
    /// The event being delivered.
    pub event: Event,
    /// The cursor position at delivery time, in absolute coordinates.
    pub point: Point,
}

impl EventContext<'_> {
    /// Fire another event at some widget with the same cursor and supervisor.
    pub fn fire(&mut self, target: WidgetId, event: Event) -> EventResult {
        let point = self.point;
        let supervisor = self.supervisor;
        self.tree.event(target, event, point, supervisor)
    }
}

impl fmt::Debug for EventContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventContext")
            .field("widget", &self.widget)
            .field("event", &self.event)
            .field("point", &self.point)
            .field("supervised", &self.supervisor.is_some())
            .finish_non_exhaustive()
    }
}

/// A registered event handler.
pub type Handler = Box<dyn FnMut(&mut EventContext<'_>) -> Propagation>;
