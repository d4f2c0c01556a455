//! Widget system for Trellis.
//!
//! Widgets live in a [`WidgetTree`] arena and are addressed by [`WidgetId`].
//! Each node pairs a [`WidgetBase`] (geometry, visibility, tree links, box
//! style) with a boxed [`Widget`] implementation and a table of event
//! handlers.
//!
//! # Sizing
//!
//! A widget's size is its full outer size, including margin, border and
//! outline. Children are positioned relative to the parent's content box,
//! which sits inside that box.
//!
//! # Example
//!
//! ```
//! use trellis::widget::{Event, Propagation, WidgetTree};
//! use trellis::widgets::Frame;
//! use trellis_render::Point;
//!
//! let mut tree = WidgetTree::new();
//! let frame = tree.insert(Frame::new());
//! tree.handle(frame, Event::Click, |_ctx| Propagation::Continue);
//!
//! let result = tree.event(frame, Event::Click, Point::ZERO, None);
//! assert!(result.was_handled());
//! ```

mod base;
mod config;
mod events;
mod traits;
mod tree;


pub use base::{BORDER_COLOR_OFFSET, BoxStyle, WidgetBase, WindowRole};
pub use config::{BorderStyle, WidgetConfig};
pub use events::{Event, EventContext, EventResult, Handler, Propagation};
pub use traits::Widget;
pub use tree::WidgetTree;

slotmap::new_key_type! {
    /// Stable handle to a widget in a [`WidgetTree`].
    pub struct WidgetId;
}

static_assertions::assert_impl_all!(WidgetId: Send, Sync, Copy);
