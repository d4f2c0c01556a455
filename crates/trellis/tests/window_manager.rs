//! Tests for window focus, presentation order and the bundled window and
//! menu widgets under a supervisor.

use std::cell::Cell;
use std::rc::Rc;

use trellis::render::{Color, DrawCommand, Point, RecordingEngine, Size};
use trellis::supervisor::{InputState, Supervisor};
use trellis::widget::{Event, Propagation, WidgetConfig, WidgetId, WidgetTree, WindowRole};
use trellis::widgets::{Frame, Menu, Window, WindowButtons};
use trellis::{SupervisorError, TreeError};

/// A plain frame carrying a window role, with a fixed size and background.
fn plain_window(tree: &mut WidgetTree, at: Point, color: Color) -> WidgetId {
    let id = tree.insert(Frame::new());
    tree.move_to(id, at);
    tree.resize(id, Size::new(40, 40));
    tree.configure(id, &WidgetConfig::new().with_background(color));
    if let Some(base) = tree.base_mut(id) {
        base.set_window_role(Some(WindowRole::default()));
    }
    id
}

/// A supervised 200x150 window at `at`.
fn window(tree: &mut WidgetTree, supervisor: &Supervisor, at: Point) -> WidgetId {
    let id = Window::create(tree, "Test").unwrap();
    tree.move_to(id, at);
    tree.resize(id, Size::new(200, 150));
    Window::supervise(tree, id, supervisor).unwrap();
    id
}

fn focused(tree: &WidgetTree, id: WidgetId) -> bool {
    tree.window_role(id).is_some_and(|role| role.focused)
}

fn box_colors(engine: &RecordingEngine) -> Vec<Color> {
    engine
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Box { color, .. } => Some(*color),
            _ => None,
        })
        .collect()
}

fn at(x: i32, y: i32) -> InputState {
    InputState::at(Point::new(x, y))
}

// =========================================================================
// Focus list
// =========================================================================

#[test]
fn test_focus_order_is_most_recent_first() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let a = plain_window(&mut tree, Point::ZERO, Color::RED);
    let b = plain_window(&mut tree, Point::ZERO, Color::GREEN);
    let c = plain_window(&mut tree, Point::ZERO, Color::BLUE);
    for id in [a, b, c] {
        supervisor.add_window(&mut tree, id).unwrap();
    }

    assert_eq!(supervisor.windows(), vec![c, b, a]);
    assert_eq!(supervisor.focused_window(), Some(c));
    assert!(focused(&tree, c) && !focused(&tree, b) && !focused(&tree, a));

    supervisor.focus_window(&mut tree, a).unwrap();
    assert_eq!(supervisor.windows(), vec![a, c, b]);
    assert!(focused(&tree, a) && !focused(&tree, c));

    // Focusing the head changes nothing.
    supervisor.focus_window(&mut tree, a).unwrap();
    assert_eq!(supervisor.windows(), vec![a, c, b]);
}

#[test]
fn test_add_window_twice_is_a_no_op() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let a = plain_window(&mut tree, Point::ZERO, Color::RED);
    let b = plain_window(&mut tree, Point::ZERO, Color::GREEN);
    supervisor.add_window(&mut tree, a).unwrap();
    supervisor.add_window(&mut tree, b).unwrap();
    supervisor.add_window(&mut tree, a).unwrap();

    assert_eq!(supervisor.windows(), vec![b, a]);
    assert!(tree.window_role(a).is_some_and(|role| role.managed));
}

#[test]
fn test_focus_errors() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let window = plain_window(&mut tree, Point::ZERO, Color::RED);
    let stranger = plain_window(&mut tree, Point::ZERO, Color::GREEN);
    let frame = tree.insert(Frame::new());
    let gone = tree.insert(Frame::new());
    tree.remove(gone).unwrap();

    assert_eq!(
        supervisor.focus_window(&mut tree, window),
        Err(SupervisorError::NoWindows)
    );
    assert_eq!(
        supervisor.add_window(&mut tree, frame),
        Err(SupervisorError::NotAWindow(frame))
    );
    assert_eq!(
        supervisor.add_window(&mut tree, gone),
        Err(SupervisorError::Tree(TreeError::UnknownWidget(gone)))
    );

    supervisor.add_window(&mut tree, window).unwrap();
    assert_eq!(
        supervisor.focus_window(&mut tree, gone),
        Err(SupervisorError::Tree(TreeError::UnknownWidget(gone)))
    );
    assert_eq!(
        supervisor.focus_window(&mut tree, frame),
        Err(SupervisorError::NotAWindow(frame))
    );
    assert_eq!(
        supervisor.focus_window(&mut tree, stranger),
        Err(SupervisorError::UnmanagedWindow(stranger))
    );
}

#[test]
fn test_close_all_windows() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let ids: Vec<_> = [Color::RED, Color::GREEN, Color::BLUE]
        .into_iter()
        .map(|color| {
            let id = plain_window(&mut tree, Point::ZERO, color);
            supervisor.add_window(&mut tree, id).unwrap();
            id
        })
        .collect();

    assert_eq!(supervisor.close_all_windows(&mut tree), 3);
    assert!(ids.iter().all(|&id| tree.hidden(id)));
    assert_eq!(Supervisor::new().close_all_windows(&mut tree), 0);
}

#[test]
fn test_hidden_focused_window_hands_focus_on() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let a = plain_window(&mut tree, Point::ZERO, Color::RED);
    let b = plain_window(&mut tree, Point::ZERO, Color::GREEN);
    let c = plain_window(&mut tree, Point::ZERO, Color::BLUE);
    for id in [a, b, c] {
        supervisor.add_window(&mut tree, id).unwrap();
    }

    tree.hide(c);
    tree.hide(b);
    supervisor.tick(&mut tree, &at(500, 500));
    assert_eq!(supervisor.focused_window(), Some(a));
    assert!(focused(&tree, a) && !focused(&tree, c));
}

#[test]
fn test_is_point_in_window() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let a = plain_window(&mut tree, Point::new(10, 10), Color::RED);
    supervisor.add_window(&mut tree, a).unwrap();
    let unmanaged = plain_window(&mut tree, Point::new(100, 100), Color::GREEN);

    assert!(supervisor.is_point_in_window(&tree, Point::new(20, 20)));
    assert!(!supervisor.is_point_in_window(&tree, Point::new(50, 50)));
    assert!(!supervisor.is_point_in_window(&tree, tree.absolute_point(unmanaged)));

    tree.hide(a);
    assert!(!supervisor.is_point_in_window(&tree, Point::new(20, 20)));
}

// =========================================================================
// Presentation
// =========================================================================

#[test]
fn test_present_draws_bottom_window_first_then_modals() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let red = plain_window(&mut tree, Point::ZERO, Color::RED);
    let green = plain_window(&mut tree, Point::ZERO, Color::GREEN);
    let blue = plain_window(&mut tree, Point::ZERO, Color::BLUE);
    for id in [red, green, blue] {
        supervisor.add_window(&mut tree, id).unwrap();
    }
    supervisor.focus_window(&mut tree, red).unwrap();

    let modal = tree.insert(Frame::new());
    tree.resize(modal, Size::new(10, 10));
    tree.configure(modal, &WidgetConfig::new().with_background(Color::WHITE));
    supervisor.push_modal(modal);

    let mut engine = RecordingEngine::default();
    supervisor.present(&mut tree, &mut engine);
    assert_eq!(
        box_colors(&engine),
        vec![Color::GREEN, Color::BLUE, Color::RED, Color::WHITE]
    );

    tree.hide(blue);
    engine.take_commands();
    supervisor.present(&mut tree, &mut engine);
    assert_eq!(box_colors(&engine), vec![Color::GREEN, Color::RED, Color::WHITE]);
}

// =========================================================================
// Window widget
// =========================================================================

#[test]
fn test_window_drags_by_title_bar() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let id = window(&mut tree, &supervisor, Point::new(100, 100));
    let mut engine = RecordingEngine::default();
    supervisor.present(&mut tree, &mut engine);

    let title_bar = tree.widget::<Window>(id).unwrap().title_bar();
    assert_eq!(tree.absolute_point(title_bar), Point::new(104, 102));
    let clicks = Rc::new(Cell::new(0));
    for target in [id, title_bar] {
        let clicks = clicks.clone();
        tree.handle(target, Event::Click, move |_| {
            clicks.set(clicks.get() + 1);
            Propagation::Continue
        });
    }

    assert_eq!(supervisor.tick(&mut tree, &at(110, 105).pressed()), Propagation::Stop);
    assert!(supervisor.is_dragging());
    assert_eq!(supervisor.drag_subject(), Some(id));

    supervisor.tick(&mut tree, &at(140, 125).pressed());
    assert_eq!(tree.point(id), Point::new(130, 120));

    supervisor.tick(&mut tree, &at(140, 125));
    assert!(!supervisor.is_dragging());
    assert_eq!(tree.point(id), Point::new(130, 120));

    // The press that started the drag ended with it.
    supervisor.tick(&mut tree, &at(140, 125));
    supervisor.tick(&mut tree, &at(141, 125));
    assert_eq!(clicks.get(), 0);
    assert!(!supervisor.is_dragging());
}

#[test]
fn test_press_on_background_window_raises_it() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let back = Window::create(&mut tree, "Back").unwrap();
    tree.resize(back, Size::new(100, 100));
    Window::supervise(&mut tree, back, &supervisor).unwrap();
    let front = Window::create(&mut tree, "Front").unwrap();
    tree.move_to(front, Point::new(50, 50));
    tree.resize(front, Size::new(100, 100));
    Window::supervise(&mut tree, front, &supervisor).unwrap();
    let mut engine = RecordingEngine::default();
    supervisor.present(&mut tree, &mut engine);
    assert_eq!(supervisor.focused_window(), Some(front));

    supervisor.tick(&mut tree, &at(10, 60).pressed());
    assert_eq!(supervisor.focused_window(), Some(back));
    assert_eq!(supervisor.windows(), vec![back, front]);
    assert!(Window::is_focused(&tree, back));
    assert!(!Window::is_focused(&tree, front));
    // Only the window itself was eligible, so no drag began.
    assert!(!supervisor.is_dragging());
}

#[test]
fn test_close_button_hides_window() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let id = window(&mut tree, &supervisor, Point::new(100, 100));
    Window::set_buttons(&mut tree, id, WindowButtons::CLOSE);
    let mut engine = RecordingEngine::default();
    supervisor.present(&mut tree, &mut engine);

    let close = tree.widget::<Window>(id).unwrap().buttons()[0];
    assert_eq!(tree.absolute_rect(close).origin, Point::new(286, 102));

    supervisor.tick(&mut tree, &at(290, 108).pressed());
    assert!(!supervisor.is_dragging());
    assert!(!tree.hidden(id));

    supervisor.tick(&mut tree, &at(290, 108));
    assert!(tree.hidden(id));
}

#[test]
fn test_maximize_event_uses_host_size() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let id = window(&mut tree, &supervisor, Point::new(100, 100));
    let mut engine = RecordingEngine::new(Size::new(800, 600));
    supervisor.present(&mut tree, &mut engine);

    tree.event(id, Event::MaximizeWindow, Point::ZERO, Some(&supervisor));
    assert_eq!(tree.point(id), Point::ZERO);
    assert_eq!(tree.size(id), Size::new(800, 600));

    tree.event(id, Event::MaximizeWindow, Point::ZERO, Some(&supervisor));
    assert_eq!(tree.point(id), Point::new(100, 100));
    assert_eq!(tree.size(id), Size::new(200, 150));
}

#[test]
fn test_supervise_rejects_other_widgets() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let frame = tree.insert(Frame::new());
    assert_eq!(
        Window::supervise(&mut tree, frame, &supervisor),
        Err(SupervisorError::NotAWindow(frame))
    );
    tree.remove(frame).unwrap();
    assert_eq!(
        Window::supervise(&mut tree, frame, &supervisor),
        Err(SupervisorError::Tree(TreeError::UnknownWidget(frame)))
    );
    assert!(supervisor.windows().is_empty());
}

// =========================================================================
// Menu widget
// =========================================================================

#[test]
fn test_menu_item_click_runs_command_and_closes() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let menu = Menu::create(&mut tree).unwrap();
    let picked = Rc::new(Cell::new(false));
    let flag = picked.clone();
    Menu::add_item(&mut tree, menu, "Open", move |_| flag.set(true)).unwrap();

    Menu::popup(&mut tree, menu, &supervisor, Point::new(10, 10));
    let mut engine = RecordingEngine::default();
    supervisor.present(&mut tree, &mut engine);
    assert_eq!(engine.texts(), vec!["Open"]);

    supervisor.tick(&mut tree, &at(20, 15).pressed());
    supervisor.tick(&mut tree, &at(20, 15));
    assert!(picked.get());
    assert!(tree.hidden(menu));
    assert_eq!(supervisor.modal(), None);
}

#[test]
fn test_menu_closes_on_press_outside() {
    let mut tree = WidgetTree::new();
    let supervisor = Supervisor::new();
    let menu = Menu::create(&mut tree).unwrap();
    let picked = Rc::new(Cell::new(false));
    let flag = picked.clone();
    Menu::add_item(&mut tree, menu, "Open", move |_| flag.set(true)).unwrap();

    Menu::popup(&mut tree, menu, &supervisor, Point::new(10, 10));
    let mut engine = RecordingEngine::default();
    supervisor.present(&mut tree, &mut engine);

    let result = supervisor.tick(&mut tree, &at(400, 400).pressed());
    assert_eq!(result, Propagation::Stop);
    assert!(tree.hidden(menu));
    assert_eq!(supervisor.modal(), None);
    assert!(!picked.get());
}
