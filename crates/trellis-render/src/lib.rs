//! Geometry primitives and the drawing-surface contract for Trellis.
//!
//! This crate holds everything the widget layer needs from a renderer and
//! nothing more:
//!
//! - [`Point`], [`Size`], [`Rect`]: integer pixel geometry
//! - [`Color`] and [`Text`]: what gets drawn
//! - [`RenderEngine`]: the opaque surface widgets draw on
//! - [`RecordingEngine`]: a headless engine with fixed-width text metrics
//!
//! # Example
//!
//! ```
//! use trellis_render::{Color, Rect, RecordingEngine, RenderEngine, Size};
//!
//! let mut engine = RecordingEngine::new(Size::new(320, 240));
//! engine.draw_box(Color::BLUE, Rect::new(0, 0, 10, 10));
//! assert_eq!(engine.commands().len(), 1);
//! ```

mod engine;
mod error;
mod recording;
mod text;
mod types;

pub use engine::RenderEngine;
pub use error::{RenderError, RenderResult};
pub use recording::{DrawCommand, RecordingEngine};
pub use text::Text;
pub use types::{Color, Point, Rect, Size};
