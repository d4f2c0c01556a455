//! Label: one or more lines of text.

use trellis_render::{Point, RenderEngine, Size, Text};

use crate::logging::targets;
use crate::widget::{Widget, WidgetId, WidgetTree};

/// A text label. Content may span several lines separated by `\n`.
///
/// An auto-sized label is as wide as its widest line and as tall as all
/// lines together, plus text padding and its box.
#[derive(Debug, Clone)]
pub struct Label {
    text: Text,
    line_height: i32,
}

impl Label {
    /// A label with default text styling.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_text(Text::new(content))
    }

    /// A label with full control over text styling.
    pub fn with_text(text: Text) -> Self {
        Self {
            text,
            line_height: 0,
        }
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut Text {
        &mut self.text
    }

    /// The displayed string.
    pub fn value(&self) -> &str {
        &self.text.content
    }

    pub fn set_value(&mut self, content: impl Into<String>) {
        self.text.content = content.into();
    }

    /// Height of one line as of the last compute.
    pub fn line_height(&self) -> i32 {
        self.line_height
    }
}

impl Widget for Label {
    fn kind(&self) -> &'static str {
        "Label"
    }

    fn describe(&self) -> Option<String> {
        Some(self.text.content.clone())
    }

    fn compute(&mut self, id: WidgetId, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        let mut measured = Size::ZERO;
        for line in self.text.content.split('\n') {
            match engine.compute_text_rect(&self.text.with_content(line)) {
                Ok(rect) => {
                    measured.width = measured.width.max(rect.width());
                    measured.height += rect.height();
                    self.line_height = rect.height();
                }
                Err(err) => {
                    tracing::warn!(target: targets::WIDGET, ?id, %err, "failed to measure label text");
                }
            }
        }

        let t = tree.thickness(id);
        let natural = measured.grow(
            (self.text.horizontal_padding() + t) * 2,
            (self.text.vertical_padding() + t) * 2,
        );
        if let Some(base) = tree.base_mut(id) {
            base.settle_auto_size(natural);
        }
    }

    fn present(&self, id: WidgetId, tree: &WidgetTree, engine: &mut dyn RenderEngine, at: Point) {
        let Some(base) = tree.base(id) else {
            return;
        };
        base.draw_box(engine, at);

        let t = base.style.thickness();
        let origin = at + Point::new(
            t + self.text.horizontal_padding(),
            t + self.text.vertical_padding(),
        );
        for (i, line) in self.text.content.split('\n').enumerate() {
            let position = origin + Point::new(0, i as i32 * self.line_height);
            if let Err(err) = engine.draw_text(&self.text.with_content(line), position) {
                tracing::warn!(target: targets::WIDGET, ?id, %err, "failed to draw label text");
            }
        }
    }
}
