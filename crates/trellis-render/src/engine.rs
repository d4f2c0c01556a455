//! The drawing-surface contract.
//!
//! [`RenderEngine`] is the only thing widgets know about the backend: filled
//! boxes, lines, text with metrics, and texture blits. Anything richer belongs
//! to a concrete backend.

use crate::error::RenderResult;
use crate::text::Text;
use crate::types::{Color, Point, Rect, Size};

/// An opaque 2D drawing surface.
///
/// Implementations are free to draw immediately or to record a command list;
/// callers only rely on draw calls being applied in the order they are made,
/// so later calls paint over earlier ones.
pub trait RenderEngine {
    /// Fill a rectangle with a solid color.
    fn draw_box(&mut self, color: Color, rect: Rect);

    /// Draw a one pixel line between two points.
    fn draw_line(&mut self, color: Color, from: Point, to: Point);

    /// Draw a text run with its top-left corner at `at`.
    fn draw_text(&mut self, text: &Text, at: Point) -> RenderResult<()>;

    /// Measure a single-line text run without drawing it.
    fn compute_text_rect(&self, text: &Text) -> RenderResult<Rect>;

    /// Copy a region of a named texture onto the surface.
    fn copy_texture(&mut self, texture: &str, src: Rect, dst: Rect) -> RenderResult<()>;

    /// Size of the surface being drawn on.
    fn window_size(&self) -> Size;
}
