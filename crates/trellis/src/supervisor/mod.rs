//! Event routing and window management.
//!
//! The [`Supervisor`] turns one [`InputState`] sample per frame into synthetic
//! widget events. It owns four pieces of state, each behind its own lock:
//!
//! - the registry of widgets that take part in routing, in serial order
//! - the modal stack
//! - the focus history of top-level windows
//! - the drag/drop state
//!
//! Locks are never held while a handler runs, so handlers may call back into
//! the supervisor (register widgets, push or pop modals, raise windows, start
//! drags) freely.
//!
//! # Routing
//!
//! Each [`tick`](Supervisor::tick):
//!
//! 1. Partitions registered widgets into those under the cursor and the rest.
//! 2. While dragging, suppresses normal routing: `DragMove` goes to the
//!    subject. Releasing the buttons fires `Drop` on every widget under the
//!    cursor, ends the drag and sends `MouseUp` (never `Click`) to widgets
//!    still pressed from before the drag.
//! 3. Moves focus off the focused window if it has been hidden.
//! 4. Without a modal, delivers to widgets of the focused window first; if
//!    a handler runs for a widget under the cursor, no other widget receives
//!    enter-side events this tick.
//! 5. Delivers to the remaining widgets. A modal restricts delivery to its
//!    own subtree. Without one, only the topmost window under the cursor may
//!    receive events: nothing if it is the focused window (already served),
//!    the window itself if it is not focused (so a click can raise it), and
//!    widgets outside every window if the cursor is over no window.
//!
//! Widgets that are not eligible are treated as if the cursor were elsewhere,
//! and a handler asking to stop never suppresses the leave side, so every `MouseOver` is eventually matched by a `MouseOut` and every
//! `MouseDown` by a `MouseUp`.

mod drag_drop;
mod input;
mod modal;
mod registry;
mod window_manager;

use std::collections::HashSet;

use parking_lot::{Mutex, RwLock};
use trellis_render::{Point, RenderEngine};

pub use drag_drop::DragState;
pub use input::InputState;
pub use registry::{WidgetSlot, WidgetSlots};

use self::modal::ModalStack;
use self::registry::Registry;
use self::window_manager::FocusList;
use crate::error::{SupervisorError, SupervisorResult, TreeError};
use crate::logging::targets;
use crate::widget::{Event, EventResult, Propagation, WidgetId, WidgetTree};

/// Hover and press bookkeeping carried between ticks.
#[derive(Debug, Default)]
struct RoutingState {
    hovered: HashSet<WidgetId>,
    pressed: HashSet<WidgetId>,
    primary_was_down: bool,
}

/// Which widgets may receive pointer events during a delivery pass.
#[derive(Debug, Clone, Copy)]
enum Eligibility {
    Everything,
    Nothing,
    Only(WidgetId),
    /// Widgets not inside any managed window.
    Unowned,
    /// The modal and its descendants.
    Subtree(WidgetId),
}

impl Eligibility {
    fn admits(self, tree: &WidgetTree, id: WidgetId) -> bool {
        if tree.hidden(id) {
            return false;
        }
        match self {
            Self::Everything => true,
            Self::Nothing => false,
            Self::Only(target) => id == target,
            Self::Unowned => tree.window_of(id).is_none(),
            Self::Subtree(root) => tree.is_descendant_of(id, root),
        }
    }
}

/// What happened during one delivery pass.
///
/// `handled` only counts the enter side; a `MouseOut` handler does not
/// consume the input.
#[derive(Debug, Clone, Copy, Default)]
struct PassOutcome {
    handled: bool,
    stopped: bool,
}

impl PassOutcome {
    fn record(&mut self, result: EventResult) {
        self.handled |= result.was_handled();
        self.stopped |= result.is_stop();
    }

    fn record_leave(&mut self, result: EventResult) {
        self.stopped |= result.is_stop();
    }
}

/// Routes input to widgets and manages modals, windows and drags.
///
/// All methods take `&self`; the supervisor can be shared with handlers
/// through [`EventContext::supervisor`](crate::widget::EventContext).
#[derive(Debug, Default)]
pub struct Supervisor {
    registry: RwLock<Registry>,
    routing: Mutex<RoutingState>,
    modals: Mutex<ModalStack>,
    windows: RwLock<FocusList>,
    drag: Mutex<DragState>,
}

impl Supervisor {
    /// Create a supervisor with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register a widget for event routing, returning its serial.
    ///
    /// Adding a widget that is already registered returns its existing serial.
    pub fn add(&self, id: WidgetId) -> u64 {
        let (serial, added) = self.registry.write().add(id);
        if added {
            tracing::debug!(target: targets::SUPERVISOR, ?id, serial, "widget registered");
        }
        serial
    }

    /// Stop routing events to a widget.
    pub fn remove(&self, id: WidgetId) -> bool {
        let removed = self.registry.write().remove(id);
        if removed {
            let mut routing = self.routing.lock();
            routing.hovered.remove(&id);
            routing.pressed.remove(&id);
        }
        removed
    }

    /// Registered widgets in ascending serial order.
    ///
    /// The iterator walks a snapshot, so registering widgets while iterating
    /// is safe; they show up in the next call.
    pub fn widgets(&self) -> WidgetSlots {
        WidgetSlots::new(self.registry.read().snapshot())
    }

    /// Number of registered widgets.
    pub fn widget_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Split registered widgets into those whose absolute rectangle contains
    /// `point` and those that do not, each in serial order.
    pub fn hovering(&self, tree: &WidgetTree, point: Point) -> (Vec<WidgetSlot>, Vec<WidgetSlot>) {
        self.widgets()
            .partition(|slot| tree.absolute_rect(slot.id).contains(point))
    }

    /// Drop registry entries for widgets that are no longer in the tree.
    fn prune(&self, tree: &WidgetTree) {
        let dropped = self.registry.write().retain(|id| tree.contains(id));
        if dropped.is_empty() {
            return;
        }
        let mut routing = self.routing.lock();
        for slot in dropped {
            tracing::warn!(
                target: targets::SUPERVISOR,
                id = ?slot.id,
                serial = slot.serial,
                "registered widget no longer exists"
            );
            routing.hovered.remove(&slot.id);
            routing.pressed.remove(&slot.id);
        }
    }

    // =========================================================================
    // Modals
    // =========================================================================

    /// Make `id` the active modal, returning the stack depth.
    pub fn push_modal(&self, id: WidgetId) -> usize {
        let depth = self.modals.lock().push(id);
        tracing::debug!(target: targets::SUPERVISOR, ?id, depth, "modal pushed");
        depth
    }

    /// Pop the active modal. Only succeeds when `id` is the active modal.
    pub fn pop_modal(&self, id: WidgetId) -> bool {
        let popped = self.modals.lock().pop(id);
        if popped {
            tracing::debug!(target: targets::SUPERVISOR, ?id, "modal popped");
        } else {
            tracing::debug!(target: targets::SUPERVISOR, ?id, "refused to pop inactive modal");
        }
        popped
    }

    /// The active modal, if any.
    pub fn modal(&self) -> Option<WidgetId> {
        self.modals.lock().top()
    }

    /// Number of stacked modals.
    pub fn modal_depth(&self) -> usize {
        self.modals.lock().len()
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    /// Begin a drag without a subject.
    pub fn drag_start(&self) {
        self.drag.lock().start();
        tracing::debug!(target: targets::DRAG, "drag started");
    }

    /// Begin a drag that sends `DragMove` to `subject` every tick.
    pub fn drag_start_widget(&self, subject: WidgetId) {
        self.drag.lock().start_widget(subject);
        tracing::debug!(target: targets::DRAG, ?subject, "drag started");
    }

    /// End the current drag.
    pub fn drag_stop(&self) {
        self.drag.lock().stop();
        tracing::debug!(target: targets::DRAG, "drag stopped");
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.lock().is_dragging()
    }

    /// The widget being dragged, if any.
    pub fn drag_subject(&self) -> Option<WidgetId> {
        self.drag.lock().subject()
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Start managing a window and focus it.
    ///
    /// The widget must carry a [`WindowRole`](crate::widget::WindowRole).
    /// Adding a window twice is a no-op.
    pub fn add_window(&self, tree: &mut WidgetTree, id: WidgetId) -> SupervisorResult<()> {
        if !tree.contains(id) {
            return Err(TreeError::UnknownWidget(id).into());
        }
        if tree.window_role(id).is_none() {
            return Err(SupervisorError::NotAWindow(id));
        }

        let old_head = {
            let mut windows = self.windows.write();
            if windows.contains(id) {
                return Ok(());
            }
            windows.insert(id)
        };

        if let Some(role) = tree.window_role_mut(id) {
            role.managed = true;
            role.focused = true;
        }
        if let Some(role) = old_head.and_then(|old| tree.window_role_mut(old)) {
            role.focused = false;
        }
        tracing::debug!(target: targets::WINDOWS, ?id, "window added");
        Ok(())
    }

    /// Raise a managed window to the top and give it focus.
    ///
    /// Focusing the window that already has focus is a no-op.
    pub fn focus_window(&self, tree: &mut WidgetTree, id: WidgetId) -> SupervisorResult<()> {
        let old_head = {
            let mut windows = self.windows.write();
            if windows.is_empty() {
                return Err(SupervisorError::NoWindows);
            }
            if !tree.contains(id) {
                return Err(TreeError::UnknownWidget(id).into());
            }
            if tree.window_role(id).is_none() {
                return Err(SupervisorError::NotAWindow(id));
            }
            if !windows.contains(id) {
                return Err(SupervisorError::UnmanagedWindow(id));
            }
            windows.raise(id)
        };

        if let Some(old) = old_head {
            if let Some(role) = tree.window_role_mut(old) {
                role.focused = false;
            }
            if let Some(role) = tree.window_role_mut(id) {
                role.focused = true;
            }
            tracing::debug!(target: targets::WINDOWS, from = ?old, to = ?id, "focus changed");
        }
        Ok(())
    }

    /// Hide every managed window, returning how many there are.
    pub fn close_all_windows(&self, tree: &mut WidgetTree) -> usize {
        let windows = self.windows.read().top_to_bottom();
        for &window in &windows {
            tree.hide(window);
        }
        tracing::debug!(target: targets::WINDOWS, count = windows.len(), "closed all windows");
        windows.len()
    }

    /// The focused window.
    pub fn focused_window(&self) -> Option<WidgetId> {
        self.windows.read().head()
    }

    /// Managed windows from the focused one down.
    pub fn windows(&self) -> Vec<WidgetId> {
        self.windows.read().top_to_bottom()
    }

    /// Whether any visible managed window covers `point`.
    pub fn is_point_in_window(&self, tree: &WidgetTree, point: Point) -> bool {
        self.window_at(tree, point).is_some()
    }

    /// The topmost visible managed window under `point`.
    fn window_at(&self, tree: &WidgetTree, point: Point) -> Option<WidgetId> {
        self.windows
            .read()
            .top_to_bottom()
            .into_iter()
            .find(|&w| !tree.hidden(w) && tree.absolute_rect(w).contains(point))
    }

    /// If the focused window is hidden, focus the next visible one.
    fn advance_hidden_focus(&self, tree: &mut WidgetTree) {
        let order = self.windows.read().top_to_bottom();
        let Some((&head, rest)) = order.split_first() else {
            return;
        };
        if !tree.hidden(head) {
            return;
        }
        if let Some(&next) = rest.iter().find(|&&w| !tree.hidden(w)) {
            if let Err(err) = self.focus_window(tree, next) {
                tracing::warn!(target: targets::WINDOWS, %err, "could not move focus off hidden window");
            }
        }
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Route one input sample.
    ///
    /// Returns [`Propagation::Stop`] when the host should not forward this
    /// input anywhere else: a drag or modal is active, a handler asked to
    /// stop, or the focused window consumed the input.
    pub fn tick(&self, tree: &mut WidgetTree, input: &InputState) -> Propagation {
        self.prune(tree);

        let cursor = input.cursor;
        let (hovering, outside) = self.hovering(tree, cursor);

        let press_edge = {
            let mut routing = self.routing.lock();
            let edge = input.button1 && !routing.primary_was_down;
            routing.primary_was_down = input.button1;
            edge
        };

        if self.is_dragging() {
            if input.is_released() {
                for &slot in &hovering {
                    if !tree.hidden(slot.id) {
                        self.fire(tree, slot, Event::Drop, cursor);
                    }
                }
                self.drag_stop();
                self.release_pressed(tree, &hovering, &outside, cursor);
            } else if let Some(subject) = self.drag_subject() {
                tree.event(subject, Event::DragMove, cursor, Some(self));
            }
            return Propagation::Stop;
        }

        self.advance_hidden_focus(tree);

        let modal = self.modal();
        if let Some(modal) = modal {
            if press_edge && !tree.absolute_rect(modal).contains(cursor) {
                tracing::debug!(target: targets::SUPERVISOR, ?modal, "press outside modal");
                tree.event(modal, Event::CloseModal, cursor, Some(self));
            }
        }

        let focused = self.focused_window();
        let in_focused = |tree: &WidgetTree, id: WidgetId| {
            focused.is_some_and(|window| tree.window_of(id) == Some(window))
        };

        let mut consumed = false;
        if modal.is_none() && focused.is_some() {
            let outcome = self.deliver(
                tree,
                &hovering,
                &outside,
                input,
                |tree, id| in_focused(tree, id),
                Eligibility::Everything,
            );
            consumed = outcome.handled || outcome.stopped;
        }

        // Once the focused window consumed the input the second pass only
        // settles widgets the cursor left.
        let eligibility = match modal {
            Some(modal) => Eligibility::Subtree(modal),
            None if consumed => Eligibility::Nothing,
            None => match self.window_at(tree, cursor) {
                Some(window) if Some(window) == focused => Eligibility::Nothing,
                Some(window) => Eligibility::Only(window),
                None => Eligibility::Unowned,
            },
        };
        let outcome = self.deliver(
            tree,
            &hovering,
            &outside,
            input,
            |tree, id| modal.is_some() || !in_focused(tree, id),
            eligibility,
        );

        if consumed || modal.is_some() || outcome.stopped {
            Propagation::Stop
        } else {
            Propagation::Continue
        }
    }

    /// Draw managed windows from the bottom of the focus list up, then the
    /// modal stack from the bottom up.
    ///
    /// Each visible window or modal is computed right before it is drawn.
    pub fn present(&self, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        let windows = self.windows.read().bottom_to_top();
        let modals = self.modals.lock().bottom_to_top();

        for id in windows.into_iter().chain(modals) {
            if tree.hidden(id) {
                continue;
            }
            tree.compute(id, engine);
            let at = tree.absolute_point(id);
            tree.present(id, engine, at);
        }
    }

    // =========================================================================
    // Delivery
    // =========================================================================

    /// Run one delivery pass over the widgets for which `in_pass` holds.
    ///
    /// Hovering widgets that are eligible go through the enter branch; every
    /// other widget in the pass goes through the leave branch. Once a handler
    /// asks to stop, the remaining eligible hovering widgets are skipped, but
    /// the leave branch still runs for everything else.
    fn deliver(
        &self,
        tree: &mut WidgetTree,
        hovering: &[WidgetSlot],
        outside: &[WidgetSlot],
        input: &InputState,
        in_pass: impl Fn(&WidgetTree, WidgetId) -> bool,
        eligibility: Eligibility,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::default();

        for &slot in hovering {
            if !in_pass(tree, slot.id) {
                continue;
            }
            if !eligibility.admits(tree, slot.id) {
                self.leave(tree, slot, input.cursor, &mut outcome);
            } else if !outcome.stopped {
                self.enter(tree, slot, input, &mut outcome);
            }
        }

        for &slot in outside {
            if in_pass(tree, slot.id) {
                self.leave(tree, slot, input.cursor, &mut outcome);
            }
        }

        outcome
    }

    /// Finish presses that a drag swallowed: `MouseUp` without `Click`.
    fn release_pressed(
        &self,
        tree: &mut WidgetTree,
        hovering: &[WidgetSlot],
        outside: &[WidgetSlot],
        cursor: Point,
    ) {
        let mut pressed: Vec<WidgetSlot> = {
            let mut routing = self.routing.lock();
            hovering
                .iter()
                .chain(outside)
                .copied()
                .filter(|slot| routing.pressed.remove(&slot.id))
                .collect()
        };
        pressed.sort_by_key(|slot| slot.serial);
        for slot in pressed {
            self.fire(tree, slot, Event::MouseUp, cursor);
        }
    }

    /// Cursor is over an eligible widget.
    fn enter(
        &self,
        tree: &mut WidgetTree,
        slot: WidgetSlot,
        input: &InputState,
        outcome: &mut PassOutcome,
    ) {
        let (over, down, release) = {
            let mut routing = self.routing.lock();
            let over = routing.hovered.insert(slot.id);
            let down = input.button1 && routing.pressed.insert(slot.id);
            let release = !input.button1 && routing.pressed.remove(&slot.id);
            (over, down, release)
        };

        if over {
            outcome.record(self.fire(tree, slot, Event::MouseOver, input.cursor));
        }
        if down {
            outcome.record(self.fire(tree, slot, Event::MouseDown, input.cursor));
        }
        if release {
            outcome.record(self.fire(tree, slot, Event::MouseUp, input.cursor));
            outcome.record(self.fire(tree, slot, Event::Click, input.cursor));
        }
    }

    /// Cursor is elsewhere, or the widget may not receive events right now.
    fn leave(&self, tree: &mut WidgetTree, slot: WidgetSlot, cursor: Point, outcome: &mut PassOutcome) {
        let (out, up) = {
            let mut routing = self.routing.lock();
            (routing.hovered.remove(&slot.id), routing.pressed.remove(&slot.id))
        };

        if out {
            outcome.record_leave(self.fire(tree, slot, Event::MouseOut, cursor));
        }
        if up {
            outcome.record_leave(self.fire(tree, slot, Event::MouseUp, cursor));
        }
    }

    fn fire(&self, tree: &mut WidgetTree, slot: WidgetSlot, event: Event, cursor: Point) -> EventResult {
        tracing::trace!(
            target: targets::SUPERVISOR,
            %event,
            widget = ?slot.id,
            serial = slot.serial,
            "dispatch"
        );
        tree.event(slot.id, event, cursor, Some(self))
    }
}

static_assertions::assert_impl_all!(Supervisor: Send, Sync);
