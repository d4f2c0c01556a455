//! The widget arena.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use slotmap::SlotMap;
use trellis_render::{Point, Rect, RenderEngine, Size};

use super::base::{WidgetBase, WindowRole};
use super::config::WidgetConfig;
use super::events::{Event, EventContext, EventResult, Handler, Propagation};
use super::traits::Widget;
use super::WidgetId;
use crate::error::{TreeError, TreeResult};
use crate::layout::LayoutRule;
use crate::logging::targets;
use crate::supervisor::Supervisor;

struct WidgetNode {
    base: WidgetBase,
    /// `None` only while the widget is detached for `compute`.
    widget: Option<Box<dyn Widget>>,
    handlers: HashMap<Event, Vec<Handler>>,
}

/// Owns every widget and the links between them.
///
/// A container's children list is the owning edge; the parent link is only
/// used for upward queries. Removing a widget removes its whole subtree.
///
/// Read accessors such as [`point`](Self::point) return defaults for ids that
/// are not in the tree, and plain setters ignore them. Structural operations
/// report unknown ids as [`TreeError::UnknownWidget`].
#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, WidgetNode>,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of widgets in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert a widget as a new root.
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.insert_with_base(widget, WidgetBase::new())
    }

    /// Insert a widget with a prepared base.
    pub fn insert_with_base<W: Widget>(&mut self, widget: W, base: WidgetBase) -> WidgetId {
        self.nodes.insert(WidgetNode {
            base,
            widget: Some(Box::new(widget)),
            handlers: HashMap::new(),
        })
    }

    /// Remove a widget and all of its descendants.
    pub fn remove(&mut self, id: WidgetId) -> TreeResult<()> {
        if !self.contains(id) {
            return Err(TreeError::UnknownWidget(id));
        }
        self.detach(id);

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.base.children().iter().copied());
            }
        }
        Ok(())
    }

    // =========================================================================
    // Access
    // =========================================================================

    pub fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.nodes.get(id).map(|n| &n.base)
    }

    pub fn base_mut(&mut self, id: WidgetId) -> Option<&mut WidgetBase> {
        self.nodes.get_mut(id).map(|n| &mut n.base)
    }

    /// Borrow the concrete widget.
    ///
    /// Returns `None` if the id is unknown, the type does not match, or the
    /// widget is currently detached because its `compute` is running.
    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        let widget: &dyn Widget = self.nodes.get(id)?.widget.as_deref()?;
        (widget as &dyn Any).downcast_ref::<W>()
    }

    /// Mutably borrow the concrete widget.
    pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        let widget: &mut dyn Widget = self.nodes.get_mut(id)?.widget.as_deref_mut()?;
        (widget as &mut dyn Any).downcast_mut::<W>()
    }

    /// The widget's type name, or `"?"` for unknown ids.
    pub fn kind(&self, id: WidgetId) -> &'static str {
        self.nodes
            .get(id)
            .and_then(|n| n.widget.as_deref())
            .map_or("?", |w| w.kind())
    }

    /// The widget's debug detail, if it has one.
    pub fn describe(&self, id: WidgetId) -> Option<String> {
        self.nodes.get(id)?.widget.as_deref()?.describe()
    }

    pub fn set_name(&mut self, id: WidgetId, name: impl Into<String>) {
        if let Some(base) = self.base_mut(id) {
            base.set_name(name);
        }
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.base(id)?.parent()
    }

    /// Children in insertion order. Empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.base(id).map_or(&[], |b| b.children())
    }

    /// Iterate over the ancestors of a widget, nearest first.
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Whether `id` is `ancestor` or somewhere below it.
    pub fn is_descendant_of(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Make `child` a child of `parent`, appended after existing children.
    pub fn adopt(&mut self, parent: WidgetId, child: WidgetId) -> TreeResult<()> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownWidget(parent));
        }
        let Some(existing) = self.base(child).map(|b| b.parent()) else {
            return Err(TreeError::UnknownWidget(child));
        };
        if parent == child {
            return Err(TreeError::SelfParent(child));
        }
        if let Some(existing) = existing {
            return Err(TreeError::AlreadyParented {
                child,
                parent: existing,
            });
        }
        if self.is_descendant_of(parent, child) {
            return Err(TreeError::Cycle { parent, child });
        }

        if let Some(base) = self.base_mut(child) {
            base.set_parent(Some(parent));
        }
        if let Some(base) = self.base_mut(parent) {
            base.push_child(child);
        }
        Ok(())
    }

    /// Detach `child` from its parent, making it a root again.
    ///
    /// Its layout rule is dropped along with the parent link.
    pub fn orphan(&mut self, child: WidgetId) -> TreeResult<()> {
        if !self.contains(child) {
            return Err(TreeError::UnknownWidget(child));
        }
        self.detach(child);
        Ok(())
    }

    fn detach(&mut self, child: WidgetId) {
        let parent = self.base_mut(child).and_then(|base| {
            base.set_layout(None);
            let parent = base.parent();
            base.set_parent(None);
            parent
        });
        if let Some(base) = parent.and_then(|p| self.base_mut(p)) {
            base.remove_child(child);
        }
    }

    pub fn layout_rule(&self, id: WidgetId) -> Option<&LayoutRule> {
        self.base(id)?.layout()
    }

    pub(crate) fn set_layout_rule(&mut self, id: WidgetId, rule: Option<LayoutRule>) {
        if let Some(base) = self.base_mut(id) {
            base.set_layout(rule);
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position relative to the parent's content box.
    pub fn point(&self, id: WidgetId) -> Point {
        self.base(id).map_or(Point::ZERO, |b| b.point())
    }

    pub fn move_to(&mut self, id: WidgetId, point: Point) {
        if let Some(base) = self.base_mut(id) {
            base.move_to(point);
        }
    }

    pub fn move_by(&mut self, id: WidgetId, delta: Point) {
        if let Some(base) = self.base_mut(id) {
            let point = base.point() + delta;
            base.move_to(point);
        }
    }

    pub fn size(&self, id: WidgetId) -> Size {
        self.base(id).map_or(Size::ZERO, |b| b.size())
    }

    /// Set an explicit size and mark the widget fixed-size.
    pub fn resize(&mut self, id: WidgetId, size: Size) {
        if let Some(base) = self.base_mut(id) {
            base.resize(size);
        }
    }

    /// Set a size the widget grows to while staying auto-sized.
    pub fn resize_auto(&mut self, id: WidgetId, size: Size) {
        if let Some(base) = self.base_mut(id) {
            base.resize_auto(size);
        }
    }

    pub fn fixed_size(&self, id: WidgetId) -> bool {
        self.base(id).is_some_and(|b| b.fixed_size())
    }

    /// Box thickness on one side: margin + border + outline.
    pub fn thickness(&self, id: WidgetId) -> i32 {
        self.base(id).map_or(0, |b| b.style.thickness())
    }

    /// Rectangle relative to the parent's content box.
    pub fn rect(&self, id: WidgetId) -> Rect {
        self.base(id).map_or(Rect::ZERO, |b| b.rect())
    }

    /// Position in root coordinates.
    ///
    /// Children are laid out inside the parent's box, so every ancestor
    /// contributes its position plus its box thickness.
    pub fn absolute_point(&self, id: WidgetId) -> Point {
        self.ancestors(id).fold(self.point(id), |acc, ancestor| {
            let t = self.thickness(ancestor);
            acc + self.point(ancestor) + Point::new(t, t)
        })
    }

    /// Rectangle in root coordinates.
    pub fn absolute_rect(&self, id: WidgetId) -> Rect {
        Rect::from_origin_size(self.absolute_point(id), self.size(id))
    }

    /// Apply a configuration to a widget.
    pub fn configure(&mut self, id: WidgetId, config: &WidgetConfig) {
        if let Some(base) = self.base_mut(id) {
            base.configure(config);
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether the widget or any of its ancestors is hidden.
    ///
    /// Unknown ids count as hidden.
    pub fn hidden(&self, id: WidgetId) -> bool {
        match self.base(id) {
            None => true,
            Some(base) if base.is_hidden() => true,
            Some(_) => self
                .ancestors(id)
                .any(|a| self.base(a).is_some_and(|b| b.is_hidden())),
        }
    }

    pub fn hide(&mut self, id: WidgetId) {
        if let Some(base) = self.base_mut(id) {
            base.hide();
        }
    }

    pub fn show(&mut self, id: WidgetId) {
        if let Some(base) = self.base_mut(id) {
            base.show();
        }
    }

    // =========================================================================
    // Windows
    // =========================================================================

    pub fn window_role(&self, id: WidgetId) -> Option<WindowRole> {
        self.base(id)?.window_role()
    }

    pub(crate) fn window_role_mut(&mut self, id: WidgetId) -> Option<&mut WindowRole> {
        self.base_mut(id)?.window_role_mut()
    }

    /// The nearest managed window containing `id`, including `id` itself.
    pub fn window_of(&self, id: WidgetId) -> Option<WidgetId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&w| self.window_role(w).is_some_and(|role| role.managed))
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a handler. Handlers for one event run in registration order.
    pub fn handle<F>(&mut self, id: WidgetId, event: Event, handler: F)
    where
        F: FnMut(&mut EventContext<'_>) -> Propagation + 'static,
    {
        match self.nodes.get_mut(id) {
            Some(node) => node
                .handlers
                .entry(event)
                .or_default()
                .push(Box::new(handler)),
            None => tracing::warn!(
                target: targets::WIDGET,
                ?id,
                %event,
                "handler registered on unknown widget"
            ),
        }
    }

    /// Whether the widget has any handlers for an event.
    pub fn has_handler(&self, id: WidgetId, event: Event) -> bool {
        self.nodes
            .get(id)
            .and_then(|n| n.handlers.get(&event))
            .is_some_and(|h| !h.is_empty())
    }

    /// Fire an event at a widget.
    ///
    /// Handlers run until one returns [`Propagation::Stop`]. Handlers added
    /// while the event is being delivered run from the next delivery on.
    pub fn event(
        &mut self,
        id: WidgetId,
        event: Event,
        point: Point,
        supervisor: Option<&Supervisor>,
    ) -> EventResult {
        let mut handlers = match self.nodes.get_mut(id).and_then(|n| n.handlers.get_mut(&event)) {
            Some(list) if !list.is_empty() => std::mem::take(list),
            _ => return EventResult::NoHandler,
        };

        tracing::trace!(target: targets::EVENTS, ?id, %event, "fire");

        let mut result = EventResult::Handled;
        {
            let mut ctx = EventContext {
                tree: self,
                supervisor,
                widget: id,
                event,
                point,
            };
            for handler in handlers.iter_mut() {
                if handler(&mut ctx).is_stop() {
                    result = EventResult::StopPropagation;
                    break;
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            let slot = node.handlers.entry(event).or_default();
            let added = std::mem::replace(slot, handlers);
            slot.extend(added);
        }
        result
    }

    // =========================================================================
    // Compute and present
    // =========================================================================

    /// Recompute a widget's size and the layout of its subtree.
    pub fn compute(&mut self, id: WidgetId, engine: &mut dyn RenderEngine) {
        let Some(mut widget) = self.nodes.get_mut(id).and_then(|n| n.widget.take()) else {
            return;
        };
        widget.compute(id, self, engine);
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
    }

    /// Draw a widget and its subtree with its outer box at `at`.
    ///
    /// Hidden widgets draw nothing.
    pub fn present(&self, id: WidgetId, engine: &mut dyn RenderEngine, at: Point) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.base.is_hidden() {
            return;
        }
        if let Some(widget) = node.widget.as_deref() {
            widget.present(id, self, engine, at);
        }
    }

    /// Draw every child of `id`, offset into its content box.
    pub fn present_children(&self, id: WidgetId, engine: &mut dyn RenderEngine, at: Point) {
        let t = self.thickness(id);
        let origin = at + Point::new(t, t);
        for &child in self.children(id) {
            self.present(child, engine, origin + self.point(child));
        }
    }
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("len", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
