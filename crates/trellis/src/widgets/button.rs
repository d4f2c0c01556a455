//! Button: a clickable box around a single child widget.

use trellis_render::{Color, Point, RenderEngine, Size};

use super::Label;
use crate::error::TreeResult;
use crate::widget::{BorderStyle, Event, Propagation, Widget, WidgetConfig, WidgetId, WidgetTree};

/// Colors and borders for a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStyle {
    pub background: Color,
    /// Applied to a [`Label`] child.
    pub foreground: Color,
    pub hover_background: Color,
    pub hover_foreground: Color,
    pub outline_color: Color,
    pub outline_size: i32,
    pub border_style: BorderStyle,
    pub border_size: i32,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(200, 200, 200),
            foreground: Color::BLACK,
            hover_background: Color::rgb(200, 255, 255),
            hover_foreground: Color::BLACK,
            outline_color: Color::BLACK,
            outline_size: 1,
            border_style: BorderStyle::Raised,
            border_size: 2,
        }
    }
}

impl ButtonStyle {
    /// A flat style with no border or outline, as used for menu items and
    /// title bar buttons.
    pub fn flat() -> Self {
        Self {
            outline_size: 0,
            border_size: 0,
            ..Self::default()
        }
    }
}

/// A button wrapping one child, usually a [`Label`].
///
/// The button reacts to its own hover and press events: hovering swaps in the
/// hover colors, pressing sinks the border and nudges the child by a pixel.
#[derive(Debug, Clone)]
pub struct Button {
    child: WidgetId,
    style: ButtonStyle,
    hovering: bool,
    pressed: bool,
}

impl Button {
    /// Insert a button around `child` and wire its visual-state handlers.
    pub fn create(tree: &mut WidgetTree, child: WidgetId) -> TreeResult<WidgetId> {
        Self::create_with_style(tree, child, ButtonStyle::default())
    }

    pub fn create_with_style(
        tree: &mut WidgetTree,
        child: WidgetId,
        style: ButtonStyle,
    ) -> TreeResult<WidgetId> {
        let button = tree.insert(Button {
            child,
            style,
            hovering: false,
            pressed: false,
        });
        if let Err(err) = tree.adopt(button, child) {
            let _ = tree.remove(button);
            return Err(err);
        }
        Self::apply_style(tree, button);

        tree.handle(button, Event::MouseOver, move |ctx| {
            Self::set_hovering(ctx.tree, ctx.widget, true);
            Propagation::Continue
        });
        tree.handle(button, Event::MouseOut, move |ctx| {
            Self::set_hovering(ctx.tree, ctx.widget, false);
            Propagation::Continue
        });
        tree.handle(button, Event::MouseDown, move |ctx| {
            Self::set_pressed(ctx.tree, ctx.widget, true);
            Propagation::Continue
        });
        tree.handle(button, Event::MouseUp, move |ctx| {
            Self::set_pressed(ctx.tree, ctx.widget, false);
            Propagation::Continue
        });

        Ok(button)
    }

    /// Convenience: a button around a new [`Label`].
    pub fn with_label(tree: &mut WidgetTree, text: impl Into<String>) -> TreeResult<WidgetId> {
        let label = tree.insert(Label::new(text));
        Self::create(tree, label)
    }

    pub fn child(&self) -> WidgetId {
        self.child
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Replace the style of `button` and reapply it.
    pub fn set_style(tree: &mut WidgetTree, button: WidgetId, style: ButtonStyle) {
        if let Some(widget) = tree.widget_mut::<Button>(button) {
            widget.style = style;
        }
        Self::apply_style(tree, button);
    }

    /// Set the text of a [`Label`] child. Returns `false` if the child is not a
    /// label.
    pub fn set_text(tree: &mut WidgetTree, button: WidgetId, text: impl Into<String>) -> bool {
        let Some(child) = tree.widget::<Button>(button).map(|b| b.child) else {
            return false;
        };
        match tree.widget_mut::<Label>(child) {
            Some(label) => {
                label.set_value(text);
                true
            }
            None => false,
        }
    }

    fn apply_style(tree: &mut WidgetTree, button: WidgetId) {
        let Some((style, hovering, child)) = tree
            .widget::<Button>(button)
            .map(|b| (b.style, b.hovering, b.child))
        else {
            return;
        };
        tree.configure(
            button,
            &WidgetConfig::new()
                .with_border(style.border_size, style.border_style)
                .with_outline(style.outline_size, style.outline_color)
                .with_background(if hovering {
                    style.hover_background
                } else {
                    style.background
                }),
        );
        // Zero sizes are ignored by configure, so flat styles need this.
        if let Some(base) = tree.base_mut(button) {
            base.style.border_size = style.border_size;
            base.style.outline_size = style.outline_size;
        }
        if let Some(label) = tree.widget_mut::<Label>(child) {
            label.text_mut().color = if hovering {
                style.hover_foreground
            } else {
                style.foreground
            };
        }
    }

    fn set_hovering(tree: &mut WidgetTree, button: WidgetId, hovering: bool) {
        if let Some(widget) = tree.widget_mut::<Button>(button) {
            widget.hovering = hovering;
        }
        Self::apply_style(tree, button);
    }

    fn set_pressed(tree: &mut WidgetTree, button: WidgetId, pressed: bool) {
        let Some(style) = tree.widget_mut::<Button>(button).map(|widget| {
            widget.pressed = pressed;
            widget.style
        }) else {
            return;
        };
        if let Some(base) = tree.base_mut(button) {
            base.style.border_style = if pressed {
                BorderStyle::Sunken
            } else {
                style.border_style
            };
        }
    }
}

impl Widget for Button {
    fn kind(&self) -> &'static str {
        "Button"
    }

    fn compute(&mut self, id: WidgetId, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        tree.compute(self.child, engine);

        let t = tree.thickness(id);
        let child_size = tree.size(self.child);
        if let Some(base) = tree.base_mut(id) {
            base.settle_auto_size(child_size.grow(t * 2, t * 2));
        }

        // Center the child when the button is bigger than it needs to be.
        let inner = tree.base(id).map_or(Size::ZERO, |b| b.inner_size());
        let x = ((inner.width - child_size.width) / 2).max(0);
        let y = ((inner.height - child_size.height) / 2).max(0);
        tree.move_to(self.child, Point::new(x, y));
    }

    fn present(&self, id: WidgetId, tree: &WidgetTree, engine: &mut dyn RenderEngine, at: Point) {
        let Some(base) = tree.base(id) else {
            return;
        };
        base.draw_box(engine, at);

        let t = base.style.thickness();
        let nudge = if self.pressed { 1 } else { 0 };
        let origin = at + Point::new(t + nudge, t + nudge);
        tree.present(self.child, engine, origin + tree.point(self.child));
    }
}

#[cfg(test)]
mod tests {
    use trellis_render::{RecordingEngine, Text};

    use super::*;

    fn label_button(tree: &mut WidgetTree) -> (WidgetId, WidgetId) {
        let label = tree.insert(Label::with_text(Text::new("ok").with_size(10)));
        let button = Button::create(tree, label).unwrap();
        (button, label)
    }

    #[test]
    fn test_auto_size_wraps_child() {
        let mut tree = WidgetTree::new();
        let (button, label) = label_button(&mut tree);
        let mut engine = RecordingEngine::default();
        tree.compute(button, &mut engine);

        // Outline 1 + border 2 on each side around a 10x10 label.
        assert_eq!(tree.size(button), Size::new(16, 16));
        assert_eq!(tree.point(label), Point::ZERO);
    }

    #[test]
    fn test_fixed_size_centers_child() {
        let mut tree = WidgetTree::new();
        let (button, label) = label_button(&mut tree);
        tree.resize(button, Size::new(46, 26));
        let mut engine = RecordingEngine::default();
        tree.compute(button, &mut engine);

        assert_eq!(tree.size(button), Size::new(46, 26));
        assert_eq!(tree.point(label), Point::new(15, 5));
    }

    #[test]
    fn test_hover_and_press_change_style() {
        let mut tree = WidgetTree::new();
        let (button, label) = label_button(&mut tree);
        let style = ButtonStyle::default();

        tree.event(button, Event::MouseOver, Point::ZERO, None);
        assert!(tree.widget::<Button>(button).unwrap().is_hovering());
        assert_eq!(tree.base(button).unwrap().style.background, style.hover_background);
        assert_eq!(
            tree.widget::<Label>(label).unwrap().text().color,
            style.hover_foreground
        );

        tree.event(button, Event::MouseDown, Point::ZERO, None);
        assert_eq!(tree.base(button).unwrap().style.border_style, BorderStyle::Sunken);

        tree.event(button, Event::MouseUp, Point::ZERO, None);
        tree.event(button, Event::MouseOut, Point::ZERO, None);
        let widget = tree.widget::<Button>(button).unwrap();
        assert!(!widget.is_hovering() && !widget.is_pressed());
        assert_eq!(tree.base(button).unwrap().style.border_style, BorderStyle::Raised);
        assert_eq!(tree.base(button).unwrap().style.background, style.background);
    }

    #[test]
    fn test_flat_style_has_no_box() {
        let mut tree = WidgetTree::new();
        let label = tree.insert(Label::new("x"));
        let button = Button::create_with_style(&mut tree, label, ButtonStyle::flat()).unwrap();
        assert_eq!(tree.thickness(button), 0);
    }

    #[test]
    fn test_set_text() {
        let mut tree = WidgetTree::new();
        let button = Button::with_label(&mut tree, "before").unwrap();
        assert!(Button::set_text(&mut tree, button, "after"));
        let child = tree.widget::<Button>(button).unwrap().child();
        assert_eq!(tree.widget::<Label>(child).unwrap().value(), "after");

        let frame_child = tree.insert(super::super::Frame::new());
        let other = Button::create(&mut tree, frame_child).unwrap();
        assert!(!Button::set_text(&mut tree, other, "nope"));
    }

    #[test]
    fn test_create_with_parented_child_fails() {
        let mut tree = WidgetTree::new();
        let (_, label) = label_button(&mut tree);
        let before = tree.len();
        assert!(Button::create(&mut tree, label).is_err());
        assert_eq!(tree.len(), before);
    }
}
