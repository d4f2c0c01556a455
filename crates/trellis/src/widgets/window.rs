//! Window: a movable top-level container with a title bar.

use std::ops::BitOr;

use trellis_render::{Color, Point, RenderEngine, Size, Text};

use super::{Button, ButtonStyle, Frame, Label};
use crate::error::{SupervisorError, SupervisorResult, TreeError, TreeResult};
use crate::layout::{Pack, Place, Side};
use crate::logging::targets;
use crate::supervisor::Supervisor;
use crate::widget::{
    BORDER_COLOR_OFFSET, BorderStyle, Event, Propagation, Widget, WidgetBase, WidgetConfig,
    WidgetId, WidgetTree, WindowRole,
};

/// Which title bar buttons a window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowButtons(u8);

impl WindowButtons {
    /// No buttons.
    pub const NONE: Self = Self(0);
    /// Fires [`Event::CloseWindow`] at the window.
    pub const CLOSE: Self = Self(1 << 0);
    /// Fires [`Event::MaximizeWindow`] at the window.
    pub const MAXIMIZE: Self = Self(1 << 1);
    /// Fires [`Event::MinimizeWindow`] at the window.
    pub const MINIMIZE: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::CLOSE.0 | Self::MAXIMIZE.0 | Self::MINIMIZE.0);

    /// Returns true if this set contains every button in `other`.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for WindowButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Title bar and body colors for a [`Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStyle {
    pub active_title_background: Color,
    pub active_title_foreground: Color,
    pub inactive_title_background: Color,
    pub inactive_title_foreground: Color,
    pub active_background: Color,
    pub inactive_background: Color,
}

impl Default for WindowStyle {
    fn default() -> Self {
        Self {
            active_title_background: Color::BLUE,
            active_title_foreground: Color::WHITE,
            inactive_title_background: Color::DARK_GREY,
            inactive_title_foreground: Color::GREY,
            active_background: Color::GREY,
            inactive_background: Color::GREY,
        }
    }
}

/// Title bar buttons in pack order, with the event each one fires.
const TITLE_BUTTONS: [(WindowButtons, &str, Event); 3] = [
    (WindowButtons::CLOSE, "×", Event::CloseWindow),
    (WindowButtons::MAXIMIZE, "+", Event::MaximizeWindow),
    (WindowButtons::MINIMIZE, "_", Event::MinimizeWindow),
];

/// Geometry to return to when a maximized window is restored.
#[derive(Debug, Clone, Copy)]
struct Restore {
    point: Point,
    size: Size,
    fixed: bool,
}

/// A top-level window.
///
/// The window owns a body frame holding a title bar and a content frame.
/// Children go into the content frame with [`Window::pack`], or onto the
/// body with [`Window::place`]. Focus is tracked through the window's
/// [`WindowRole`], which the supervisor updates.
#[derive(Debug, Clone)]
pub struct Window {
    title: String,
    style: WindowStyle,
    body: WidgetId,
    title_bar: WidgetId,
    title_label: WidgetId,
    buttons: [WidgetId; 3],
    content: WidgetId,
    maximized: bool,
    restore: Option<Restore>,
    /// Host window size as of the last compute.
    screen: Option<Size>,
    /// Cursor and window position when a title bar drag began.
    drag_origin: Option<(Point, Point)>,
}

impl Window {
    /// Build a window and its title bar and content frames.
    pub fn create(tree: &mut WidgetTree, title: impl Into<String>) -> TreeResult<WidgetId> {
        let title = title.into();
        let style = WindowStyle::default();

        let body = tree.insert(Frame::new());
        tree.configure(
            body,
            &WidgetConfig::new()
                .with_background(style.active_background)
                .with_border(2, BorderStyle::Raised),
        );

        let title_bar = tree.insert(Frame::new());
        tree.configure(
            title_bar,
            &WidgetConfig::new().with_background(style.active_title_background),
        );
        Frame::pack(tree, body, title_bar, Pack::new(Side::N).fill())?;

        let mut title_text = Text::new(title.clone())
            .with_size(11)
            .with_color(style.active_title_foreground)
            .with_padding(2);
        title_text.stroke = Some(style.active_title_background.darken(BORDER_COLOR_OFFSET));
        let title_label = tree.insert(Label::with_text(title_text));
        Frame::pack(tree, title_bar, title_label, Pack::new(Side::W))?;

        let mut buttons = [title_label; 3];
        for (slot, &(_, glyph, _)) in buttons.iter_mut().zip(TITLE_BUTTONS.iter()) {
            let label = tree.insert(Label::with_text(
                Text::new(glyph).with_size(8).with_padding(2),
            ));
            let style = ButtonStyle {
                border_size: 0,
                ..ButtonStyle::default()
            };
            let button = Button::create_with_style(tree, label, style)?;
            tree.hide(button);
            Frame::pack(tree, title_bar, button, Pack::new(Side::E))?;
            *slot = button;
        }

        let content = tree.insert(Frame::new());
        tree.configure(content, &WidgetConfig::new().with_background(Color::GREY));
        Frame::pack(tree, body, content, Pack::new(Side::N).fill().expand())?;

        let mut base = WidgetBase::new();
        base.set_name(title.clone());
        base.set_window_role(Some(WindowRole::default()));
        let window = tree.insert_with_base(
            Window {
                title,
                style,
                body,
                title_bar,
                title_label,
                buttons,
                content,
                maximized: false,
                restore: None,
                screen: None,
                drag_origin: None,
            },
            base,
        );
        tree.adopt(window, body)?;

        // Title buttons fire their window event and keep the click to themselves.
        for (&button, &(_, _, event)) in buttons.iter().zip(TITLE_BUTTONS.iter()) {
            tree.handle(button, Event::Click, move |ctx| {
                ctx.fire(window, event);
                Propagation::Stop
            });
        }

        Ok(window)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> &WindowStyle {
        &self.style
    }

    /// The frame directly inside the window.
    pub fn body(&self) -> WidgetId {
        self.body
    }

    pub fn title_bar(&self) -> WidgetId {
        self.title_bar
    }

    pub fn title_label(&self) -> WidgetId {
        self.title_label
    }

    /// The frame that [`Window::pack`] packs into.
    pub fn content(&self) -> WidgetId {
        self.content
    }

    /// The close, maximize and minimize buttons, in that order.
    pub fn buttons(&self) -> [WidgetId; 3] {
        self.buttons
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Whether `window` is a window with focus.
    pub fn is_focused(tree: &WidgetTree, window: WidgetId) -> bool {
        tree.window_role(window).is_some_and(|role| role.focused)
    }

    pub fn set_title(tree: &mut WidgetTree, window: WidgetId, title: impl Into<String>) {
        let title = title.into();
        let Some(label) = tree.widget_mut::<Window>(window).map(|w| {
            w.title = title.clone();
            w.title_label
        }) else {
            return;
        };
        if let Some(label) = tree.widget_mut::<Label>(label) {
            label.set_value(title.clone());
        }
        tree.set_name(window, title);
    }

    /// Replace the window's colors.
    pub fn set_style(tree: &mut WidgetTree, window: WidgetId, style: WindowStyle) {
        if let Some(w) = tree.widget_mut::<Window>(window) {
            w.style = style;
        }
        Self::apply_focus_colors(tree, window);
    }

    /// Show exactly the title bar buttons in `buttons`.
    pub fn set_buttons(tree: &mut WidgetTree, window: WidgetId, buttons: WindowButtons) {
        let Some(ids) = tree.widget::<Window>(window).map(|w| w.buttons) else {
            return;
        };
        for (&id, &(flag, _, _)) in ids.iter().zip(TITLE_BUTTONS.iter()) {
            if buttons.contains(flag) {
                tree.show(id);
            } else {
                tree.hide(id);
            }
        }
    }

    /// Pack a child into the content frame.
    pub fn pack(tree: &mut WidgetTree, window: WidgetId, child: WidgetId, pack: Pack) -> TreeResult<()> {
        match tree.widget::<Window>(window).map(|w| w.content) {
            Some(content) => Frame::pack(tree, content, child, pack),
            None => Err(TreeError::UnknownWidget(window)),
        }
    }

    /// Place a child on the body frame, so it is positioned against the whole
    /// window rather than the content area.
    pub fn place(tree: &mut WidgetTree, window: WidgetId, child: WidgetId, place: Place) -> TreeResult<()> {
        match tree.widget::<Window>(window).map(|w| w.body) {
            Some(body) => Frame::place(tree, body, child, place),
            None => Err(TreeError::UnknownWidget(window)),
        }
    }

    /// Move the window to the middle of a screen of the given size.
    pub fn center(tree: &mut WidgetTree, window: WidgetId, screen: Size) {
        let size = tree.size(window);
        tree.move_to(
            window,
            Point::new(
                screen.width / 2 - size.width / 2,
                screen.height / 2 - size.height / 2,
            ),
        );
    }

    /// Hide the window and fire [`Event::CloseWindow`] at it.
    pub fn close(tree: &mut WidgetTree, window: WidgetId, supervisor: Option<&Supervisor>) {
        tree.hide(window);
        let point = tree.absolute_point(window);
        tree.event(window, Event::CloseWindow, point, supervisor);
    }

    /// Maximize the window to the host window size, or restore it.
    ///
    /// The host size is learned on compute; before the first compute only
    /// the flag changes.
    pub fn set_maximized(tree: &mut WidgetTree, window: WidgetId, maximized: bool) {
        let Some(w) = tree.widget::<Window>(window) else {
            return;
        };
        let (screen, restore) = (w.screen, w.restore);

        let mut new_restore = restore;
        match (maximized, screen) {
            (true, Some(screen)) => {
                if restore.is_none() {
                    new_restore = Some(Restore {
                        point: tree.point(window),
                        size: tree.size(window),
                        fixed: tree.fixed_size(window),
                    });
                }
                tree.move_to(window, Point::ZERO);
                tree.resize(window, screen);
            }
            (false, _) => {
                if let Some(restore) = restore {
                    tree.move_to(window, restore.point);
                    if restore.fixed {
                        tree.resize(window, restore.size);
                    } else if let Some(base) = tree.base_mut(window) {
                        base.set_fixed_size(false);
                    }
                }
                new_restore = None;
            }
            (true, None) => {}
        }

        if let Some(w) = tree.widget_mut::<Window>(window) {
            w.maximized = maximized;
            w.restore = new_restore;
        }
        tracing::debug!(target: targets::WINDOWS, ?window, maximized, "maximize toggled");
    }

    /// Hook the window up to a supervisor.
    ///
    /// Dragging the title bar moves the window, pressing anywhere in it
    /// raises it, and the close and maximize events hide and maximize it.
    /// The title bar, its buttons and the window are registered for routing
    /// and the window joins the supervisor's focus list.
    pub fn supervise(tree: &mut WidgetTree, window: WidgetId, supervisor: &Supervisor) -> SupervisorResult<()> {
        if !tree.contains(window) {
            return Err(TreeError::UnknownWidget(window).into());
        }
        let Some((title_bar, buttons)) = tree.widget::<Window>(window).map(|w| (w.title_bar, w.buttons))
        else {
            return Err(SupervisorError::NotAWindow(window));
        };

        tree.handle(title_bar, Event::MouseDown, move |ctx| {
            // A press on a title button is a click, not a drag.
            let on_button = buttons
                .iter()
                .any(|&b| !ctx.tree.hidden(b) && ctx.tree.absolute_rect(b).contains(ctx.point));
            if on_button {
                return Propagation::Continue;
            }
            let origin = ctx.tree.point(window);
            if let Some(w) = ctx.tree.widget_mut::<Window>(window) {
                w.drag_origin = Some((ctx.point, origin));
            }
            if let Some(supervisor) = ctx.supervisor {
                supervisor.drag_start_widget(window);
            }
            Propagation::Continue
        });

        tree.handle(window, Event::MouseDown, move |ctx| {
            if let Some(supervisor) = ctx.supervisor {
                if let Err(err) = supervisor.focus_window(ctx.tree, window) {
                    tracing::warn!(target: targets::WINDOWS, ?window, %err, "could not focus window");
                }
            }
            Propagation::Continue
        });

        tree.handle(window, Event::DragMove, move |ctx| {
            let origin = ctx.tree.widget::<Window>(window).and_then(|w| w.drag_origin);
            if let Some((start, point)) = origin {
                let delta = start.delta_to(ctx.point);
                if delta != Point::ZERO {
                    ctx.tree.move_to(window, point + delta);
                }
            }
            Propagation::Continue
        });

        tree.handle(window, Event::CloseWindow, move |ctx| {
            ctx.tree.hide(window);
            Propagation::Continue
        });

        tree.handle(window, Event::MaximizeWindow, move |ctx| {
            let maximized = ctx.tree.widget::<Window>(window).is_some_and(|w| w.maximized);
            Window::set_maximized(ctx.tree, window, !maximized);
            Propagation::Continue
        });

        supervisor.add(title_bar);
        for button in buttons {
            supervisor.add(button);
        }
        supervisor.add(window);
        supervisor.add_window(tree, window)
    }

    fn apply_focus_colors(tree: &mut WidgetTree, window: WidgetId) {
        let focused = Self::is_focused(tree, window);
        if let Some(w) = tree.widget::<Window>(window).cloned() {
            w.paint(tree, focused);
        }
    }

    /// Color the title bar and body for the given focus state.
    fn paint(&self, tree: &mut WidgetTree, focused: bool) {
        let style = &self.style;
        let (title_bg, title_fg, background) = if focused {
            (
                style.active_title_background,
                style.active_title_foreground,
                style.active_background,
            )
        } else {
            (
                style.inactive_title_background,
                style.inactive_title_foreground,
                style.inactive_background,
            )
        };

        tree.configure(self.title_bar, &WidgetConfig::new().with_background(title_bg));
        tree.configure(self.body, &WidgetConfig::new().with_background(background));
        if let Some(label) = tree.widget_mut::<Label>(self.title_label) {
            let text = label.text_mut();
            text.color = title_fg;
            text.stroke = Some(title_bg.darken(BORDER_COLOR_OFFSET));
        }
    }
}

impl Widget for Window {
    fn kind(&self) -> &'static str {
        "Window"
    }

    fn describe(&self) -> Option<String> {
        Some(self.title.clone())
    }

    fn compute(&mut self, id: WidgetId, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        self.screen = Some(engine.window_size());

        let focused = Self::is_focused(tree, id);
        self.paint(tree, focused);

        let Some(base) = tree.base(id) else {
            return;
        };
        let t = base.style.thickness();
        let fixed = base.fixed_size();
        let outer = base.size();
        let assigned = base.assigned_size();
        if fixed {
            tree.resize(self.body, outer.shrink(t * 2, t * 2));
        } else if let Some(assigned) = assigned {
            tree.resize_auto(self.body, assigned.shrink(t * 2, t * 2));
        } else if let Some(body) = tree.base_mut(self.body) {
            body.set_fixed_size(false);
            body.clear_assigned_size();
        }

        tree.compute(self.body, engine);
        tree.move_to(self.body, Point::ZERO);

        let natural = tree.size(self.body).grow(t * 2, t * 2);
        if let Some(base) = tree.base_mut(id) {
            base.settle_auto_size(natural);
        }
    }
}
