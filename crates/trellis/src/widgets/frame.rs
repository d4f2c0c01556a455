//! Frame: the general-purpose container.

use trellis_render::{Point, RenderEngine};

use crate::error::{TreeError, TreeResult};
use crate::layout::{self, LayoutRule, Pack, Place, Side};
use crate::widget::{Widget, WidgetId, WidgetTree};

/// A container that lays out its children with pack and place rules and
/// draws its box behind them.
///
/// ```
/// use trellis::layout::{Pack, Side};
/// use trellis::widget::WidgetTree;
/// use trellis::widgets::{Frame, Label};
/// use trellis_render::RecordingEngine;
///
/// let mut tree = WidgetTree::new();
/// let frame = tree.insert(Frame::new());
/// let label = tree.insert(Label::new("hello"));
/// Frame::pack(&mut tree, frame, label, Pack::new(Side::N)).unwrap();
///
/// let mut engine = RecordingEngine::default();
/// tree.compute(frame, &mut engine);
/// assert_eq!(tree.size(frame), tree.size(label));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Frame;

impl Frame {
    pub fn new() -> Self {
        Self
    }

    /// Pack `child` into `frame` along a side.
    ///
    /// Padding and fill shorthands are folded in here. Packing a child that
    /// already belongs to `frame` replaces its rule.
    ///
    /// # Panics
    ///
    /// Panics if `pack.side` is [`Side::Center`].
    #[track_caller]
    pub fn pack(tree: &mut WidgetTree, frame: WidgetId, child: WidgetId, pack: Pack) -> TreeResult<()> {
        assert!(
            pack.side != Side::Center,
            "cannot pack a widget against Side::Center"
        );
        Self::attach(tree, frame, child, LayoutRule::Pack(pack.normalized()))
    }

    /// Place `child` into `frame` at a point or against its edges.
    pub fn place(tree: &mut WidgetTree, frame: WidgetId, child: WidgetId, place: Place) -> TreeResult<()> {
        Self::attach(tree, frame, child, LayoutRule::Place(place))
    }

    /// Remove a packed child from `frame`. Returns whether it was packed there.
    ///
    /// The child stays in the tree as a root.
    pub fn unpack(tree: &mut WidgetTree, frame: WidgetId, child: WidgetId) -> bool {
        let packed_here = tree.parent(child) == Some(frame)
            && matches!(tree.layout_rule(child), Some(LayoutRule::Pack(_)));
        packed_here && tree.orphan(child).is_ok()
    }

    fn attach(tree: &mut WidgetTree, frame: WidgetId, child: WidgetId, rule: LayoutRule) -> TreeResult<()> {
        if !tree.contains(child) {
            return Err(TreeError::UnknownWidget(child));
        }
        if tree.parent(child) != Some(frame) {
            tree.adopt(frame, child)?;
        }
        tree.set_layout_rule(child, Some(rule));
        Ok(())
    }
}

impl Widget for Frame {
    fn kind(&self) -> &'static str {
        "Frame"
    }

    fn compute(&mut self, id: WidgetId, tree: &mut WidgetTree, engine: &mut dyn RenderEngine) {
        layout::arrange(tree, id, engine);
    }

    fn present(&self, id: WidgetId, tree: &WidgetTree, engine: &mut dyn RenderEngine, at: Point) {
        if let Some(base) = tree.base(id) {
            base.draw_box(engine, at);
        }
        tree.present_children(id, engine, at);
    }
}

#[cfg(test)]
mod tests {
    use trellis_render::{Color, DrawCommand, RecordingEngine, Rect, Size};

    use super::*;
    use crate::widget::WidgetConfig;

    #[test]
    fn test_pack_adopts_and_normalizes() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new());
        let child = tree.insert(Frame::new());

        Frame::pack(&mut tree, frame, child, Pack::new(Side::S).padding(2).fill()).unwrap();
        assert_eq!(tree.parent(child), Some(frame));
        assert_eq!(tree.children(frame), &[child]);

        let Some(LayoutRule::Pack(pack)) = tree.layout_rule(child) else {
            panic!("expected a pack rule");
        };
        assert_eq!(pack.pad_x, 2);
        assert!(pack.fill_x && pack.fill_y);
    }

    #[test]
    fn test_repack_replaces_rule() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new());
        let child = tree.insert(Frame::new());

        Frame::pack(&mut tree, frame, child, Pack::new(Side::N)).unwrap();
        Frame::place(&mut tree, frame, child, Place::default().top(4)).unwrap();
        assert_eq!(tree.children(frame).len(), 1);
        assert!(matches!(tree.layout_rule(child), Some(LayoutRule::Place(_))));
    }

    #[test]
    fn test_pack_into_other_parent_fails() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Frame::new());
        let b = tree.insert(Frame::new());
        let child = tree.insert(Frame::new());

        Frame::pack(&mut tree, a, child, Pack::default()).unwrap();
        assert_eq!(
            Frame::pack(&mut tree, b, child, Pack::default()),
            Err(TreeError::AlreadyParented { child, parent: a })
        );
    }

    #[test]
    #[should_panic(expected = "Side::Center")]
    fn test_pack_center_panics() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new());
        let child = tree.insert(Frame::new());
        let _ = Frame::pack(&mut tree, frame, child, Pack::new(Side::Center));
    }

    #[test]
    fn test_unpack() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new());
        let packed = tree.insert(Frame::new());
        let placed = tree.insert(Frame::new());
        Frame::pack(&mut tree, frame, packed, Pack::default()).unwrap();
        Frame::place(&mut tree, frame, placed, Place::default()).unwrap();

        assert!(!Frame::unpack(&mut tree, frame, placed));
        assert!(Frame::unpack(&mut tree, frame, packed));
        assert!(!Frame::unpack(&mut tree, frame, packed));
        assert_eq!(tree.parent(packed), None);
        assert_eq!(tree.children(frame), &[placed]);
    }

    #[test]
    fn test_present_offsets_children_by_box() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new());
        let child = tree.insert(Frame::new());
        tree.configure(
            frame,
            &WidgetConfig::new().with_size(50, 50).with_margin(3),
        );
        tree.configure(
            child,
            &WidgetConfig::new().with_size(10, 10).with_background(Color::RED),
        );
        Frame::place(&mut tree, frame, child, Place::at(Point::new(5, 6))).unwrap();

        let mut engine = RecordingEngine::default();
        tree.compute(frame, &mut engine);
        tree.present(frame, &mut engine, Point::new(100, 100));

        assert_eq!(
            engine.commands(),
            &[DrawCommand::Box {
                color: Color::RED,
                rect: Rect::new(108, 109, 10, 10),
            }]
        );
        assert_eq!(tree.size(frame), Size::new(50, 50));
    }

    #[test]
    fn test_hidden_frame_draws_nothing() {
        let mut tree = WidgetTree::new();
        let frame = tree.insert(Frame::new());
        tree.configure(
            frame,
            &WidgetConfig::new().with_size(5, 5).with_background(Color::BLUE),
        );
        tree.hide(frame);

        let mut engine = RecordingEngine::default();
        tree.present(frame, &mut engine, Point::ZERO);
        assert!(engine.commands().is_empty());
    }
}
