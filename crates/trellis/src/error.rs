//! Error types for Trellis.

use thiserror::Error;
use trellis_render::RenderError;

use crate::widget::WidgetId;

/// Errors from structural operations on the widget tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The widget id does not exist in the tree (never inserted, or removed).
    #[error("unknown widget {0:?}")]
    UnknownWidget(WidgetId),

    /// A widget was asked to adopt itself.
    #[error("widget {0:?} cannot adopt itself")]
    SelfParent(WidgetId),

    /// The child already belongs to another container.
    #[error("widget {child:?} already has parent {parent:?}")]
    AlreadyParented {
        /// The widget being adopted.
        child: WidgetId,
        /// Its current parent.
        parent: WidgetId,
    },

    /// Adopting the child would make a widget its own ancestor.
    #[error("adopting {child:?} into {parent:?} would create a cycle")]
    Cycle {
        /// The would-be parent.
        parent: WidgetId,
        /// The widget being adopted.
        child: WidgetId,
    },
}

/// Result type for tree operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;

/// Errors from supervisor window management.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorError {
    /// A focus operation was attempted before any window was added.
    #[error("no managed windows")]
    NoWindows,

    /// The widget does not carry a window role.
    #[error("widget {0:?} is not a window")]
    NotAWindow(WidgetId),

    /// The window exists but was never passed to `add_window`.
    #[error("window {0:?} is not managed by this supervisor")]
    UnmanagedWindow(WidgetId),

    /// A tree lookup failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Result type for supervisor operations.
pub type SupervisorResult<T> = std::result::Result<T, SupervisorError>;

/// The umbrella error type for Trellis operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Widget tree error.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Supervisor error.
    #[error("supervisor error: {0}")]
    Supervisor(#[from] SupervisorError),

    /// Render engine error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Convenience result type for Trellis operations.
pub type Result<T> = std::result::Result<T, Error>;
