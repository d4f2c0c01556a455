//! Text run description handed to the render engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Color;

/// A run of text together with the style used to draw it.
///
/// Shaping and rasterization belong to the engine; widgets only ever ask
/// for the bounding box of a `Text` and for it to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Text {
    /// The string content. May contain newlines; widgets measure line by line.
    pub content: String,
    /// Font size in pixels.
    pub size: i32,
    /// Fill color.
    pub color: Color,
    /// Optional stroke (outline) color.
    pub stroke: Option<Color>,
    /// Padding applied on every side by widgets that own the text.
    pub padding: i32,
    /// Extra horizontal padding.
    pub pad_x: i32,
    /// Extra vertical padding.
    pub pad_y: i32,
}

impl Text {
    /// Default font size in pixels.
    pub const DEFAULT_SIZE: i32 = 12;

    /// Create a text run with default styling.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the font size.
    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the uniform padding.
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    /// Copy of this style with different content.
    pub fn with_content(&self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self.clone()
        }
    }

    /// Total horizontal padding on one side.
    #[inline]
    pub fn horizontal_padding(&self) -> i32 {
        self.padding + self.pad_x
    }

    /// Total vertical padding on one side.
    #[inline]
    pub fn vertical_padding(&self) -> i32 {
        self.padding + self.pad_y
    }
}

impl Default for Text {
    fn default() -> Self {
        Self {
            content: String::new(),
            size: Self::DEFAULT_SIZE,
            color: Color::BLACK,
            stroke: None,
            padding: 0,
            pad_x: 0,
            pad_y: 0,
        }
    }
}
