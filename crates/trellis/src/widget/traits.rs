//! The widget behavior trait.

use std::any::Any;

use trellis_render::{Point, RenderEngine};

use super::{WidgetId, WidgetTree};
use crate::layout;

/// Behavior of a widget stored in a [`WidgetTree`].
///
/// Shared state (geometry, visibility, children, style) lives in the node's
/// [`WidgetBase`](super::WidgetBase); the trait object only carries what is
/// specific to the widget type. While `compute` runs, the widget is detached
/// from its node, so it may borrow the tree mutably.
pub trait Widget: Any {
    /// Short type name used in debug output, e.g. `"Frame"`.
    fn kind(&self) -> &'static str;

    /// Extra detail for debug output, such as a label's text.
    fn describe(&self) -> Option<String> {
        None
    }

    /// Recompute this widget's size and lay out its children.
    ///
    /// The default lays out children by their pack/place rules and settles
    /// the widget's own size around them.
    fn compute(&mut self, id: WidgetId, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        layout::arrange(tree, id, engine);
    }

    /// Draw the widget with its outer box at `at` (absolute coordinates).
    ///
    /// The default draws the box and then every child.
    fn present(&self, id: WidgetId, tree: &WidgetTree, engine: &mut dyn RenderEngine, at: Point) {
        if let Some(base) = tree.base(id) {
            base.draw_box(engine, at);
        }
        tree.present_children(id, engine, at);
    }
}
