//! Logging and debugging facilities for Trellis.
//!
//! Trellis emits structured events through `tracing`. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis::supervisor=debug")
//!     .init();
//! ```
//!
//! Per-tick dispatch is logged at `trace`, state changes (modals, focus,
//! drags, windows) at `debug`, and recoverable oddities at `warn`.
//!
//! [`format_tree`] renders a widget subtree as indented lines for debugging.

use std::fmt::Write as FmtWrite;

use crate::widget::{WidgetId, WidgetTree};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Widget tree target.
    pub const WIDGET: &str = "trellis::widget";
    /// Event delivery target.
    pub const EVENTS: &str = "trellis::events";
    /// Layout engine target.
    pub const LAYOUT: &str = "trellis::layout";
    /// Supervisor dispatch target.
    pub const SUPERVISOR: &str = "trellis::supervisor";
    /// Window manager target.
    pub const WINDOWS: &str = "trellis::supervisor::windows";
    /// Drag and drop target.
    pub const DRAG: &str = "trellis::supervisor::drag";
}

/// Options for [`format_tree_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeFormatOptions {
    /// Append relative position and size to each line.
    pub show_geometry: bool,
    /// Maximum depth to descend (`None` for unlimited).
    pub max_depth: Option<usize>,
    /// Spaces per level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            show_geometry: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Only kinds and names.
    pub fn minimal() -> Self {
        Self {
            show_geometry: false,
            ..Self::default()
        }
    }
}

/// Render the subtree rooted at `root` with default options.
///
/// ```
/// use trellis::logging::{format_tree_with, TreeFormatOptions};
/// use trellis::widget::WidgetTree;
/// use trellis::widgets::Frame;
///
/// let mut tree = WidgetTree::new();
/// let root = tree.insert(Frame::new());
/// let child = tree.insert(Frame::new());
/// tree.adopt(root, child).unwrap();
/// tree.set_name(child, "body");
///
/// let dump = format_tree_with(&tree, root, TreeFormatOptions::minimal());
/// assert_eq!(dump, "Frame\n  Frame \"body\"\n");
/// ```
pub fn format_tree(tree: &WidgetTree, root: WidgetId) -> String {
    format_tree_with(tree, root, TreeFormatOptions::default())
}

/// Render the subtree rooted at `root`, one widget per line.
pub fn format_tree_with(tree: &WidgetTree, root: WidgetId, options: TreeFormatOptions) -> String {
    let mut output = String::new();
    format_into(tree, root, 0, &options, &mut output);
    output
}

fn format_into(
    tree: &WidgetTree,
    id: WidgetId,
    depth: usize,
    options: &TreeFormatOptions,
    output: &mut String,
) {
    if options.max_depth.is_some_and(|max| depth > max) {
        return;
    }
    let Some(base) = tree.base(id) else {
        return;
    };

    output.extend(std::iter::repeat_n(' ', depth * options.indent_size));
    output.push_str(tree.kind(id));
    // Writing to a String cannot fail.
    if let Some(name) = base.name() {
        let _ = write!(output, " {name:?}");
    }
    if let Some(detail) = tree.describe(id) {
        let _ = write!(output, " <{detail}>");
    }
    if options.show_geometry {
        let rect = base.rect();
        let _ = write!(
            output,
            " @({},{}) {}x{}",
            rect.left(),
            rect.top(),
            rect.width(),
            rect.height()
        );
    }
    if base.is_hidden() {
        output.push_str(" [hidden]");
    }
    output.push('\n');

    for &child in base.children() {
        format_into(tree, child, depth + 1, options, output);
    }
}

#[cfg(test)]
mod tests {
    use trellis_render::{Point, Size};

    use super::*;
    use crate::widgets::{Frame, Label};

    #[test]
    fn test_format_tree_with_geometry() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Frame::new());
        let label = tree.insert(Label::new("hi"));
        tree.adopt(root, label).unwrap();
        tree.resize(root, Size::new(100, 50));
        tree.move_to(label, Point::new(3, 4));
        tree.hide(label);

        let dump = format_tree(&tree, root);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "Frame @(0,0) 100x50");
        assert_eq!(lines[1], "  Label <hi> @(3,4) 0x0 [hidden]");
    }

    #[test]
    fn test_format_tree_respects_max_depth() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Frame::new());
        let mid = tree.insert(Frame::new());
        let leaf = tree.insert(Frame::new());
        tree.adopt(root, mid).unwrap();
        tree.adopt(mid, leaf).unwrap();

        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        assert_eq!(format_tree_with(&tree, root, options), "Frame\n  Frame\n");
    }

    #[test]
    fn test_unknown_root_formats_empty() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Frame::new());
        tree.remove(root).unwrap();
        assert!(format_tree(&tree, root).is_empty());
    }
}
