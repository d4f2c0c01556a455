//! A headless engine that records draw calls.
//!
//! `RecordingEngine` uses fixed-width text metrics so layout is predictable,
//! which makes it the engine of choice for tests and for hosts that want to
//! replay a frame onto a real backend later.

use std::collections::HashSet;

use crate::engine::RenderEngine;
use crate::error::{RenderError, RenderResult};
use crate::text::Text;
use crate::types::{Color, Point, Rect, Size};

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// A filled rectangle.
    Box { color: Color, rect: Rect },
    /// A line segment.
    Line { color: Color, from: Point, to: Point },
    /// A text run.
    Text { content: String, color: Color, at: Point },
    /// A texture blit.
    Texture { name: String, src: Rect, dst: Rect },
}

/// Render engine that records every call into a list.
#[derive(Debug, Clone)]
pub struct RecordingEngine {
    commands: Vec<DrawCommand>,
    window_size: Size,
    textures: HashSet<String>,
}

impl RecordingEngine {
    /// Create an engine reporting the given surface size.
    pub fn new(window_size: Size) -> Self {
        Self {
            commands: Vec::new(),
            window_size,
            textures: HashSet::new(),
        }
    }

    /// Width in pixels of one glyph at the given font size.
    #[inline]
    pub fn glyph_width(font_size: i32) -> i32 {
        (font_size / 2).max(1)
    }

    /// Make a texture name known so `copy_texture` accepts it.
    pub fn register_texture(&mut self, name: impl Into<String>) {
        self.textures.insert(name.into());
    }

    /// Change the reported surface size.
    pub fn set_window_size(&mut self, size: Size) {
        self.window_size = size;
    }

    /// All commands recorded so far, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded text contents, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new(Size::new(640, 480))
    }
}

impl RenderEngine for RecordingEngine {
    fn draw_box(&mut self, color: Color, rect: Rect) {
        self.commands.push(DrawCommand::Box { color, rect });
    }

    fn draw_line(&mut self, color: Color, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line { color, from, to });
    }

    fn draw_text(&mut self, text: &Text, at: Point) -> RenderResult<()> {
        if text.size <= 0 {
            return Err(RenderError::InvalidFontSize(text.size));
        }
        self.commands.push(DrawCommand::Text {
            content: text.content.clone(),
            color: text.color,
            at,
        });
        Ok(())
    }

    fn compute_text_rect(&self, text: &Text) -> RenderResult<Rect> {
        if text.size <= 0 {
            return Err(RenderError::InvalidFontSize(text.size));
        }
        let glyphs = text.content.chars().count() as i32;
        Ok(Rect::new(0, 0, glyphs * Self::glyph_width(text.size), text.size))
    }

    fn copy_texture(&mut self, texture: &str, src: Rect, dst: Rect) -> RenderResult<()> {
        if !self.textures.contains(texture) {
            tracing::warn!(target: "trellis_render", texture, "blit of unknown texture");
            return Err(RenderError::UnknownTexture(texture.to_owned()));
        }
        self.commands.push(DrawCommand::Texture {
            name: texture.to_owned(),
            src,
            dst,
        });
        Ok(())
    }

    fn window_size(&self) -> Size {
        self.window_size
    }
}
