//! Declarative widget configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use trellis_render::Color;

/// How a widget's border is shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BorderStyle {
    /// A flat border in the border color.
    #[default]
    Solid,
    /// Light top-left edge, dark bottom-right edge.
    Raised,
    /// Dark top-left edge, light bottom-right edge.
    Sunken,
}

/// A bundle of common widget settings applied with
/// [`WidgetTree::configure`](super::WidgetTree::configure).
///
/// Zero sizes and `None` colors leave the corresponding setting untouched, so
/// a config only needs to name what it changes.
///
/// ```
/// use trellis::widget::{BorderStyle, WidgetConfig};
/// use trellis_render::Color;
///
/// let config = WidgetConfig::new()
///     .with_size(120, 24)
///     .with_border(2, BorderStyle::Raised)
///     .with_background(Color::LIGHT_GREY);
/// assert_eq!(config.width, 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WidgetConfig {
    /// Requested width. Non-zero marks the widget fixed-size.
    pub width: i32,
    /// Requested height. Non-zero marks the widget fixed-size.
    pub height: i32,
    /// Treat the requested size as a minimum instead of fixing it.
    pub auto_resize: bool,

    pub margin: i32,
    pub background: Option<Color>,
    pub foreground: Option<Color>,

    pub border_size: i32,
    pub border_style: Option<BorderStyle>,
    pub border_color: Option<Color>,

    pub outline_size: i32,
    pub outline_color: Option<Color>,
}

impl WidgetConfig {
    /// An empty configuration that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested size.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Keep the widget auto-sized even when a size is given.
    pub fn with_auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }

    pub fn with_margin(mut self, margin: i32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Set the border thickness and style.
    pub fn with_border(mut self, size: i32, style: BorderStyle) -> Self {
        self.border_size = size;
        self.border_style = Some(style);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Set the outline thickness and color.
    pub fn with_outline(mut self, size: i32, color: Color) -> Self {
        self.outline_size = size;
        self.outline_color = Some(color);
        self
    }
}
