//! Trellis: the core of a retained-mode widget toolkit.
//!
//! This crate provides:
//!
//! - **Widget tree**: an arena of widgets addressed by [`WidgetId`], with
//!   per-widget event handlers ([`widget`])
//! - **Layout**: pack and place rules computed in one deterministic pass
//!   ([`layout`])
//! - **Supervisor**: turns per-frame input samples into widget events, and
//!   manages modals, top-level window focus and drag/drop ([`supervisor`])
//! - **Widgets**: a small set of ready-made widgets ([`widgets`])
//!
//! Drawing and text measurement go through the
//! [`RenderEngine`](render::RenderEngine) trait from `trellis-render`.
//!
//! # Example
//!
//! ```
//! use trellis::layout::{Pack, Side};
//! use trellis::render::{Point, RecordingEngine};
//! use trellis::supervisor::{InputState, Supervisor};
//! use trellis::widget::{Event, Propagation, WidgetTree};
//! use trellis::widgets::{Button, Frame};
//!
//! let mut tree = WidgetTree::new();
//! let supervisor = Supervisor::new();
//!
//! let root = tree.insert(Frame::new());
//! let button = Button::with_label(&mut tree, "Press me").unwrap();
//! Frame::pack(&mut tree, root, button, Pack::new(Side::N)).unwrap();
//! tree.handle(button, Event::Click, |_ctx| {
//!     println!("clicked");
//!     Propagation::Continue
//! });
//! supervisor.add(button);
//!
//! let mut engine = RecordingEngine::default();
//! tree.compute(root, &mut engine);
//!
//! // One frame with the button held down, one with it released.
//! let inside = Point::new(5, 5);
//! supervisor.tick(&mut tree, &InputState::at(inside).pressed());
//! supervisor.tick(&mut tree, &InputState::at(inside));
//! ```

pub mod error;
pub mod layout;
pub mod logging;
pub mod supervisor;
pub mod widget;
pub mod widgets;

pub use error::{Error, Result, SupervisorError, SupervisorResult, TreeError, TreeResult};
pub use layout::{LayoutRule, Pack, Place, Side};
pub use supervisor::{InputState, Supervisor};
pub use widget::{Event, EventContext, EventResult, Propagation, Widget, WidgetId, WidgetTree};

/// Geometry, colors, text and the render engine interface.
pub mod render {
    pub use trellis_render::*;
}
