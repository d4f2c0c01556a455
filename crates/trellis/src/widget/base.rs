//! Widget base state.
//!
//! This module provides `WidgetBase`, the state every widget in the tree has
//! regardless of what it draws: geometry, sizing mode, visibility, tree links,
//! box styling, and an optional window role.

use trellis_render::{Color, Point, Rect, RenderEngine, Size};

use super::config::{BorderStyle, WidgetConfig};
use super::WidgetId;
use crate::layout::LayoutRule;

/// How far border highlights and shadows move away from the border color.
pub const BORDER_COLOR_OFFSET: u8 = 40;

/// Box styling shared by every widget.
///
/// The box is drawn from the outside in: outline, then border, then the
/// background. Margin is empty space outside the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxStyle {
    pub margin: i32,
    pub outline_size: i32,
    pub outline_color: Color,
    pub border_size: i32,
    pub border_style: BorderStyle,
    pub border_color: Color,
    pub background: Color,
    pub foreground: Color,
}

impl BoxStyle {
    /// Thickness of the box on one side: margin + border + outline.
    #[inline]
    pub fn thickness(&self) -> i32 {
        self.margin + self.border_size + self.outline_size
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            margin: 0,
            outline_size: 0,
            outline_color: Color::INVISIBLE,
            border_size: 0,
            border_style: BorderStyle::Solid,
            border_color: Color::INVISIBLE,
            background: Color::INVISIBLE,
            foreground: Color::BLACK,
        }
    }
}

/// Marks a widget as a top-level window.
///
/// The supervisor keys its window handling off this role instead of the
/// widget's concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowRole {
    /// Whether the window has been handed to a supervisor.
    pub managed: bool,
    /// Whether the window is at the head of the focus list.
    pub focused: bool,
}

/// The base state for all widgets.
#[derive(Debug, Clone, Default)]
pub struct WidgetBase {
    name: Option<String>,

    /// Position relative to the parent's content box.
    position: Point,
    /// Full outer size including the box.
    size: Size,
    fixed_size: bool,
    /// Size handed down by the parent's layout, or by the host for roots.
    assigned: Option<Size>,
    hidden: bool,

    parent: Option<WidgetId>,
    children: Vec<WidgetId>,

    layout: Option<LayoutRule>,
    window: Option<WindowRole>,

    /// Box styling.
    pub style: BoxStyle,
}

impl WidgetBase {
    /// Create a base with default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Debug name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position relative to the parent's content box.
    #[inline]
    pub fn point(&self) -> Point {
        self.position
    }

    pub fn move_to(&mut self, point: Point) {
        self.position = point;
    }

    /// Full outer size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the size explicitly and mark the widget fixed-size.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.fixed_size = true;
    }

    /// Set the size without touching the fixed-size flag.
    ///
    /// The size is also remembered as the assigned size, which an auto-sized
    /// widget grows to when its content is smaller.
    pub fn resize_auto(&mut self, size: Size) {
        self.size = size;
        self.assigned = Some(size);
    }

    /// Overwrite the computed size. Used by layout; never changes sizing mode.
    pub(crate) fn set_computed_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Whether the size was set explicitly.
    #[inline]
    pub fn fixed_size(&self) -> bool {
        self.fixed_size
    }

    pub fn set_fixed_size(&mut self, fixed: bool) {
        self.fixed_size = fixed;
    }

    /// The size assigned by the parent's layout this pass, if any.
    #[inline]
    pub fn assigned_size(&self) -> Option<Size> {
        self.assigned
    }

    pub(crate) fn clear_assigned_size(&mut self) {
        self.assigned = None;
    }

    /// Settle an auto-sized widget on its natural size, grown to any assigned
    /// size. Fixed-size widgets are left alone.
    pub fn settle_auto_size(&mut self, natural: Size) {
        if !self.fixed_size {
            self.size = natural.max(self.assigned.unwrap_or(Size::ZERO));
        }
    }

    /// Rectangle relative to the parent's content box.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Size of the content box inside margin, border and outline.
    pub fn inner_size(&self) -> Size {
        let t = self.style.thickness();
        self.size.shrink(t * 2, t * 2)
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether this widget itself is hidden. Ancestors are not consulted.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    // =========================================================================
    // Tree links
    // =========================================================================

    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub(crate) fn set_parent(&mut self, parent: Option<WidgetId>) {
        self.parent = parent;
    }

    pub(crate) fn push_child(&mut self, child: WidgetId) {
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: WidgetId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| *c != child);
        self.children.len() != before
    }

    /// The layout rule the parent applies to this widget.
    #[inline]
    pub fn layout(&self) -> Option<&LayoutRule> {
        self.layout.as_ref()
    }

    pub(crate) fn set_layout(&mut self, rule: Option<LayoutRule>) {
        self.layout = rule;
    }

    // =========================================================================
    // Window role
    // =========================================================================

    #[inline]
    pub fn window_role(&self) -> Option<WindowRole> {
        self.window
    }

    pub fn set_window_role(&mut self, role: Option<WindowRole>) {
        self.window = role;
    }

    pub(crate) fn window_role_mut(&mut self) -> Option<&mut WindowRole> {
        self.window.as_mut()
    }

    // =========================================================================
    // Configuration and drawing
    // =========================================================================

    /// Apply a configuration. Zero and `None` fields are ignored.
    pub fn configure(&mut self, config: &WidgetConfig) {
        if config.width != 0 || config.height != 0 {
            let mut size = self.size;
            if config.width != 0 {
                size.width = config.width;
            }
            if config.height != 0 {
                size.height = config.height;
            }
            if config.auto_resize {
                self.resize_auto(size);
            } else {
                self.resize(size);
            }
        }

        let style = &mut self.style;
        if config.margin != 0 {
            style.margin = config.margin;
        }
        if let Some(color) = config.background {
            style.background = color;
        }
        if let Some(color) = config.foreground {
            style.foreground = color;
        }
        if config.border_size != 0 {
            style.border_size = config.border_size;
        }
        if let Some(border_style) = config.border_style {
            style.border_style = border_style;
        }
        if let Some(color) = config.border_color {
            style.border_color = color;
        }
        if config.outline_size != 0 {
            style.outline_size = config.outline_size;
        }
        if let Some(color) = config.outline_color {
            style.outline_color = color;
        }
    }

    /// Draw the outline, border and background with the outer box at `at`.
    pub fn draw_box(&self, engine: &mut dyn RenderEngine, at: Point) {
        let style = &self.style;
        let outline = style.outline_size;
        let border = style.border_size;
        let border_color = if style.border_color.is_invisible() {
            Color::RED
        } else {
            style.border_color
        };
        let highlight = border_color.lighten(BORDER_COLOR_OFFSET);
        let shadow = border_color.darken(BORDER_COLOR_OFFSET);

        let mut rect = Rect::from_origin_size(at, self.size).inset(style.margin);

        if outline > 0 && !style.outline_color.is_invisible() {
            engine.draw_box(style.outline_color, rect);
        }
        rect = rect.inset(outline);

        if border > 0 {
            let (top_left, bottom_right) = match style.border_style {
                BorderStyle::Raised => (highlight, shadow),
                BorderStyle::Sunken => (shadow, highlight),
                BorderStyle::Solid => (border_color, border_color),
            };
            engine.draw_box(top_left, rect);
            let shifted = Rect::new(
                rect.left() + border,
                rect.top() + border,
                rect.width() - border,
                rect.height() - border,
            );
            engine.draw_box(bottom_right, shifted);
        }

        if !style.background.is_invisible() {
            engine.draw_box(style.background, rect.inset(border));
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_render::{DrawCommand, RecordingEngine};

    use super::*;

    #[test]
    fn test_settle_auto_size() {
        let mut base = WidgetBase::new();
        base.settle_auto_size(Size::new(10, 10));
        assert_eq!(base.size(), Size::new(10, 10));

        base.resize_auto(Size::new(30, 5));
        base.settle_auto_size(Size::new(10, 10));
        assert_eq!(base.size(), Size::new(30, 10));
        assert!(!base.fixed_size());

        base.resize(Size::new(4, 4));
        base.settle_auto_size(Size::new(10, 10));
        assert_eq!(base.size(), Size::new(4, 4));
    }

    #[test]
    fn test_configure_ignores_zero_fields() {
        let mut base = WidgetBase::new();
        base.style.margin = 3;
        base.configure(&WidgetConfig::new().with_background(Color::BLUE));
        assert_eq!(base.style.margin, 3);
        assert_eq!(base.style.background, Color::BLUE);
        assert!(!base.fixed_size());

        base.configure(&WidgetConfig::new().with_size(50, 0));
        assert!(base.fixed_size());
        assert_eq!(base.size().width, 50);
    }

    #[test]
    fn test_configure_auto_resize_keeps_auto_sizing() {
        let mut base = WidgetBase::new();
        base.configure(&WidgetConfig::new().with_size(50, 20).with_auto_resize(true));
        assert!(!base.fixed_size());
        assert_eq!(base.assigned_size(), Some(Size::new(50, 20)));
    }

    #[test]
    fn test_thickness_and_inner_size() {
        let mut base = WidgetBase::new();
        base.configure(
            &WidgetConfig::new()
                .with_size(40, 30)
                .with_margin(1)
                .with_border(2, BorderStyle::Solid)
                .with_outline(1, Color::BLACK),
        );
        assert_eq!(base.style.thickness(), 4);
        assert_eq!(base.inner_size(), Size::new(32, 22));
    }

    #[test]
    fn test_draw_box_raised_border() {
        let mut base = WidgetBase::new();
        base.configure(
            &WidgetConfig::new()
                .with_size(20, 10)
                .with_border(2, BorderStyle::Raised)
                .with_border_color(Color::GREY)
                .with_background(Color::WHITE),
        );

        let mut engine = RecordingEngine::default();
        base.draw_box(&mut engine, Point::new(5, 5));

        assert_eq!(
            engine.commands(),
            &[
                DrawCommand::Box {
                    color: Color::GREY.lighten(BORDER_COLOR_OFFSET),
                    rect: Rect::new(5, 5, 20, 10),
                },
                DrawCommand::Box {
                    color: Color::GREY.darken(BORDER_COLOR_OFFSET),
                    rect: Rect::new(7, 7, 18, 8),
                },
                DrawCommand::Box {
                    color: Color::WHITE,
                    rect: Rect::new(7, 7, 16, 6),
                },
            ]
        );
    }

    #[test]
    fn test_draw_box_skips_invisible_layers() {
        let base = WidgetBase::new();
        let mut engine = RecordingEngine::default();
        base.draw_box(&mut engine, Point::ZERO);
        assert!(engine.commands().is_empty());
    }
}
