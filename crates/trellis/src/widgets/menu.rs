//! Menu: a popup list of clickable items shown as a modal.

use trellis_render::{Color, Point, RenderEngine, Size, Text};

use super::{Button, ButtonStyle, Frame, Label};
use crate::error::{TreeError, TreeResult};
use crate::layout::{Pack, Side};
use crate::logging::targets;
use crate::supervisor::Supervisor;
use crate::widget::{Event, EventContext, Propagation, Widget, WidgetConfig, WidgetId, WidgetTree};

/// Width of every popup menu.
pub const MENU_WIDTH: i32 = 180;

/// A popup menu.
///
/// Menus start hidden. [`Menu::popup`] shows one at a point and pushes it as
/// the supervisor's modal; picking an item or pressing outside the menu pops
/// and hides it again.
///
/// ```
/// use trellis::supervisor::Supervisor;
/// use trellis::widget::WidgetTree;
/// use trellis::widgets::Menu;
/// use trellis_render::Point;
///
/// let mut tree = WidgetTree::new();
/// let supervisor = Supervisor::new();
/// let menu = Menu::create(&mut tree).unwrap();
/// Menu::add_item(&mut tree, menu, "Open", |_ctx| {}).unwrap();
///
/// Menu::popup(&mut tree, menu, &supervisor, Point::new(10, 10));
/// assert_eq!(supervisor.modal(), Some(menu));
/// ```
#[derive(Debug, Clone)]
pub struct Menu {
    body: WidgetId,
    items: Vec<WidgetId>,
}

impl Menu {
    pub fn create(tree: &mut WidgetTree) -> TreeResult<WidgetId> {
        let body = tree.insert(Frame::new());
        tree.configure(
            body,
            &WidgetConfig::new().with_background(ButtonStyle::default().background),
        );

        let menu = tree.insert(Menu {
            body,
            items: Vec::new(),
        });
        tree.adopt(menu, body)?;
        tree.hide(menu);

        tree.handle(menu, Event::CloseModal, move |ctx| {
            Menu::close(ctx.tree, menu, ctx.supervisor);
            Propagation::Continue
        });
        Ok(menu)
    }

    pub fn body(&self) -> WidgetId {
        self.body
    }

    /// Items in the order they were added.
    pub fn items(&self) -> &[WidgetId] {
        &self.items
    }

    /// Append an item. Clicking it runs `command`, then closes the menu.
    pub fn add_item<F>(
        tree: &mut WidgetTree,
        menu: WidgetId,
        label: impl Into<String>,
        mut command: F,
    ) -> TreeResult<WidgetId>
    where
        F: FnMut(&mut EventContext<'_>) + 'static,
    {
        let Some(body) = tree.widget::<Menu>(menu).map(|m| m.body) else {
            return Err(TreeError::UnknownWidget(menu));
        };

        let mut text = Text::new(label).with_color(Color::BLACK);
        text.pad_x = 12;
        text.pad_y = 2;
        let label = tree.insert(Label::with_text(text));
        let item = Button::create_with_style(tree, label, ButtonStyle::flat())?;
        Frame::pack(tree, body, item, Pack::new(Side::N).fill_x())?;

        tree.handle(item, Event::Click, move |ctx| {
            command(ctx);
            Menu::close(ctx.tree, menu, ctx.supervisor);
            Propagation::Continue
        });

        if let Some(m) = tree.widget_mut::<Menu>(menu) {
            m.items.push(item);
        }
        Ok(item)
    }

    /// Show the menu at `at` and make it the active modal.
    ///
    /// Items are registered with the supervisor here, so items added after a
    /// previous popup take part in routing too.
    pub fn popup(tree: &mut WidgetTree, menu: WidgetId, supervisor: &Supervisor, at: Point) {
        let Some(items) = tree.widget::<Menu>(menu).map(|m| m.items.clone()) else {
            tracing::warn!(target: targets::WIDGET, ?menu, "popup of unknown menu");
            return;
        };
        tree.move_to(menu, at);
        tree.show(menu);
        for item in items {
            supervisor.add(item);
        }
        supervisor.push_modal(menu);
    }

    /// Hide the menu and pop it off the modal stack if it is on top.
    pub fn close(tree: &mut WidgetTree, menu: WidgetId, supervisor: Option<&Supervisor>) {
        if let Some(supervisor) = supervisor {
            supervisor.pop_modal(menu);
        }
        tree.hide(menu);
    }
}

impl Widget for Menu {
    fn kind(&self) -> &'static str {
        "Menu"
    }

    fn compute(&mut self, id: WidgetId, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        tree.resize_auto(self.body, Size::new(MENU_WIDTH, 0));
        tree.compute(self.body, engine);
        tree.move_to(self.body, Point::ZERO);

        let t = tree.thickness(id);
        let natural = tree.size(self.body).grow(t * 2, t * 2);
        if let Some(base) = tree.base_mut(id) {
            base.settle_auto_size(natural);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use trellis_render::RecordingEngine;

    use super::*;

    #[test]
    fn test_created_hidden() {
        let mut tree = WidgetTree::new();
        let menu = Menu::create(&mut tree).unwrap();
        assert!(tree.hidden(menu));
        assert_eq!(tree.kind(menu), "Menu");
    }

    #[test]
    fn test_items_fill_menu_width() {
        let mut tree = WidgetTree::new();
        let menu = Menu::create(&mut tree).unwrap();
        let first = Menu::add_item(&mut tree, menu, "New", |_| {}).unwrap();
        let second = Menu::add_item(&mut tree, menu, "Quit", |_| {}).unwrap();

        let mut engine = RecordingEngine::default();
        tree.compute(menu, &mut engine);

        // Default text size 12: 6px glyphs, 12px lines, plus 12/2 padding.
        assert_eq!(tree.size(first), Size::new(MENU_WIDTH, 16));
        assert_eq!(tree.point(second), Point::new(0, 16));
        assert_eq!(tree.size(menu), Size::new(MENU_WIDTH, 32));
        assert_eq!(tree.widget::<Menu>(menu).unwrap().items(), &[first, second]);
    }

    #[test]
    fn test_popup_and_item_click() {
        let mut tree = WidgetTree::new();
        let supervisor = Supervisor::new();
        let menu = Menu::create(&mut tree).unwrap();
        let ran = Rc::new(Cell::new(0));
        let counter = ran.clone();
        let item = Menu::add_item(&mut tree, menu, "Go", move |_| counter.set(counter.get() + 1))
            .unwrap();

        Menu::popup(&mut tree, menu, &supervisor, Point::new(40, 50));
        assert!(!tree.hidden(menu));
        assert_eq!(tree.point(menu), Point::new(40, 50));
        assert_eq!(supervisor.modal(), Some(menu));
        assert_eq!(supervisor.widget_count(), 1);

        tree.event(item, Event::Click, Point::ZERO, Some(&supervisor));
        assert_eq!(ran.get(), 1);
        assert!(tree.hidden(menu));
        assert_eq!(supervisor.modal(), None);
    }

    #[test]
    fn test_close_modal_hides() {
        let mut tree = WidgetTree::new();
        let supervisor = Supervisor::new();
        let menu = Menu::create(&mut tree).unwrap();
        Menu::popup(&mut tree, menu, &supervisor, Point::ZERO);

        tree.event(menu, Event::CloseModal, Point::ZERO, Some(&supervisor));
        assert!(tree.hidden(menu));
        assert_eq!(supervisor.modal_depth(), 0);
    }

    #[test]
    fn test_popup_twice_registers_once() {
        let mut tree = WidgetTree::new();
        let supervisor = Supervisor::new();
        let menu = Menu::create(&mut tree).unwrap();
        Menu::add_item(&mut tree, menu, "One", |_| {}).unwrap();

        Menu::popup(&mut tree, menu, &supervisor, Point::ZERO);
        Menu::close(&mut tree, menu, Some(&supervisor));
        Menu::popup(&mut tree, menu, &supervisor, Point::ZERO);
        assert_eq!(supervisor.widget_count(), 1);
    }
}
