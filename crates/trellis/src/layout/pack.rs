//! Pack layout: children stacked against the sides of their container.
//!
//! Children are grouped by [`Side`] and each group is stacked outward from its
//! edge with its own running offset. Groups are processed in the order N, NE,
//! E, SE, S, SW, W, NW. Sides touching north or south stack vertically; pure
//! east and west stack horizontally.
//!
//! # Passes
//!
//! 1. Compute every child at its natural size and fold the stacked extents
//!    into the content size the container needs.
//! 2. If the container has a target size (fixed, or assigned by its own
//!    parent) and some children `expand`, split the leftover space evenly
//!    between them and re-stack.
//! 3. Settle the container's size, then align every child on the cross axis
//!    and position south/east children from the far edge.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use trellis_render::{Point, RenderEngine, Size};

use crate::widget::{WidgetId, WidgetTree};

/// A side of a container to pack against.
///
/// `Center` is an anchor value for alignment predicates only; packing a child
/// against it is a configuration fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Center,
    #[default]
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Side {
    /// The order in which side groups are laid out.
    pub const PACK_ORDER: [Side; 8] = [
        Side::N,
        Side::NE,
        Side::E,
        Side::SE,
        Side::S,
        Side::SW,
        Side::W,
        Side::NW,
    ];

    /// N, NE or NW.
    #[inline]
    pub fn is_north(self) -> bool {
        matches!(self, Side::N | Side::NE | Side::NW)
    }

    /// S, SE or SW.
    #[inline]
    pub fn is_south(self) -> bool {
        matches!(self, Side::S | Side::SE | Side::SW)
    }

    /// E, NE or SE.
    #[inline]
    pub fn is_east(self) -> bool {
        matches!(self, Side::E | Side::NE | Side::SE)
    }

    /// W, NW or SW.
    #[inline]
    pub fn is_west(self) -> bool {
        matches!(self, Side::W | Side::NW | Side::SW)
    }

    /// Center, N or S: horizontally centered when there is room.
    #[inline]
    pub fn is_center(self) -> bool {
        matches!(self, Side::Center | Side::N | Side::S)
    }

    /// Center, E or W: vertically centered when there is room.
    #[inline]
    pub fn is_middle(self) -> bool {
        matches!(self, Side::Center | Side::E | Side::W)
    }

    /// Whether children on this side stack top-to-bottom or bottom-to-top.
    #[inline]
    pub fn stacks_vertically(self) -> bool {
        self.is_north() || self.is_south()
    }
}

/// Packing directive for one child.
///
/// ```
/// use trellis::layout::{Pack, Side};
///
/// let pack = Pack::new(Side::W).fill().padding(4);
/// let normalized = pack.normalized();
/// assert!(normalized.fill_x && normalized.fill_y);
/// assert_eq!(normalized.pad_x, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Pack {
    pub side: Side,
    /// Shorthand for `fill_x` and `fill_y`.
    pub fill: bool,
    /// Stretch across the container's width (N/S sides).
    pub fill_x: bool,
    /// Stretch across the container's height (E/W sides).
    pub fill_y: bool,
    /// Added to both `pad_x` and `pad_y`.
    pub padding: i32,
    pub pad_x: i32,
    pub pad_y: i32,
    /// Take a share of any leftover space in the container.
    pub expand: bool,
}

impl Pack {
    /// Pack against the given side with no fill, padding or expansion.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    pub fn fill(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn fill_x(mut self) -> Self {
        self.fill_x = true;
        self
    }

    pub fn fill_y(mut self) -> Self {
        self.fill_y = true;
        self
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn pad_x(mut self, pad_x: i32) -> Self {
        self.pad_x = pad_x;
        self
    }

    pub fn pad_y(mut self, pad_y: i32) -> Self {
        self.pad_y = pad_y;
        self
    }

    pub fn expand(mut self) -> Self {
        self.expand = true;
        self
    }

    /// Fold `padding` into the per-axis padding and `fill` into both fills.
    ///
    /// The result is what the layout reads; folding twice adds the padding
    /// twice, so it is applied once when the child is packed.
    pub fn normalized(mut self) -> Self {
        self.pad_x += self.padding;
        self.pad_y += self.padding;
        self.padding = 0;
        if self.fill {
            self.fill_x = true;
            self.fill_y = true;
        }
        self
    }
}

/// One visible packed child during a layout pass.
#[derive(Debug, Clone, Copy)]
struct Slot {
    child: WidgetId,
    pack: Pack,
    /// Distance from the child's own edge of the container to the child,
    /// along the stacking axis.
    main_offset: i32,
}

/// Lay out packed children and settle the container's size.
///
/// Runs even with no packed children so that the container still settles on
/// its box size.
pub(crate) fn compute_packed(
    tree: &mut WidgetTree,
    container: WidgetId,
    packed: &[(WidgetId, Pack)],
    engine: &mut dyn RenderEngine,
) {
    let Some(base) = tree.base(container) else {
        return;
    };
    let t = base.style.thickness();
    let fixed = base.fixed_size();
    let current = base.size();
    let target = if fixed {
        current
    } else {
        base.assigned_size().unwrap_or(Size::ZERO)
    };

    // Natural sizes first; a size assigned by a previous pass must not stick.
    for &(child, pack) in packed {
        assert!(
            pack.side != Side::Center,
            "cannot pack a widget against Side::Center"
        );
        if let Some(base) = tree.base_mut(child) {
            base.clear_assigned_size();
        }
        tree.compute(child, engine);
    }

    let mut slots: Vec<Slot> = Side::PACK_ORDER
        .iter()
        .flat_map(|&side| packed.iter().filter(move |(_, pack)| pack.side == side))
        .filter(|(child, _)| tree.base(*child).is_some_and(|b| !b.is_hidden()))
        .map(|&(child, pack)| Slot {
            child,
            pack,
            main_offset: 0,
        })
        .collect();

    let mut extent = stack(tree, &mut slots);

    let expanding: Vec<WidgetId> = slots
        .iter()
        .filter(|slot| slot.pack.expand)
        .map(|slot| slot.child)
        .collect();
    if !expanding.is_empty() && !target.is_zero() {
        let inner = target.shrink(t * 2, t * 2);
        let share = expanding.len() as i32;
        let grow_w = (inner.width - extent.width).max(0) / share;
        let grow_h = (inner.height - extent.height).max(0) / share;

        if grow_w > 0 || grow_h > 0 {
            for &child in &expanding {
                if tree.fixed_size(child) {
                    continue;
                }
                let grown = tree.size(child).grow(grow_w, grow_h);
                tree.resize_auto(child, grown);
                tree.compute(child, engine);
            }
            extent = stack(tree, &mut slots);
        }
    }

    let minimum = extent.grow(t * 2, t * 2);
    let size = if fixed {
        Size::new(
            if current.width == 0 { minimum.width } else { current.width },
            if current.height == 0 { minimum.height } else { current.height },
        )
    } else {
        minimum.max(target)
    };
    if let Some(base) = tree.base_mut(container) {
        base.set_computed_size(size);
    }

    let inner = size.shrink(t * 2, t * 2);
    for slot in &slots {
        align(tree, slot, inner, t, engine);
    }
}

/// Stack the slots along their sides, recording each one's main-axis offset.
///
/// Returns the content size needed to hold every stack.
fn stack(tree: &WidgetTree, slots: &mut [Slot]) -> Size {
    let mut extent = Size::ZERO;
    let mut side = None;
    let mut offset = 0;

    for slot in slots.iter_mut() {
        if side != Some(slot.pack.side) {
            side = Some(slot.pack.side);
            offset = 0;
        }

        let size = tree.size(slot.child);
        let Pack { pad_x, pad_y, .. } = slot.pack;

        if slot.pack.side.stacks_vertically() {
            offset += pad_y;
            slot.main_offset = offset;
            extent.height = extent.height.max(offset + size.height + pad_y);
            extent.width = extent.width.max(pad_x * 2 + size.width);
            offset += size.height + pad_y;
        } else {
            offset += pad_x;
            slot.main_offset = offset;
            extent.width = extent.width.max(offset + size.width + pad_x);
            extent.height = extent.height.max(pad_y * 2 + size.height);
            offset += size.width + pad_x;
        }
    }

    extent
}

/// Give an auto-sized child exactly `size`, relaying out its contents.
///
/// The child settles on at least its natural size when computed, so a child
/// wider than the fill target is clamped afterwards.
fn stretch(tree: &mut WidgetTree, child: WidgetId, size: Size, engine: &mut dyn RenderEngine) -> Size {
    if tree.size(child) != size {
        tree.resize_auto(child, size);
        tree.compute(child, engine);
    }
    if let Some(base) = tree.base_mut(child) {
        base.set_computed_size(size);
    }
    size
}

/// Apply fill and cross-axis alignment, then move the child into place.
fn align(
    tree: &mut WidgetTree,
    slot: &Slot,
    inner: Size,
    thickness: i32,
    engine: &mut dyn RenderEngine,
) {
    let Slot {
        child,
        pack,
        main_offset,
    } = *slot;
    let side = pack.side;
    let mut size = tree.size(child);

    if side.stacks_vertically() {
        if pack.fill_x && !tree.fixed_size(child) {
            let width = inner.width - thickness * 2 - pack.pad_x * 2;
            if width > 0 {
                size = stretch(tree, child, Size::new(width, size.height), engine);
            }
        }

        let x = if pack.fill_x || (size.width < inner.width && side.is_center()) {
            (inner.width - size.width) / 2
        } else if size.width < inner.width && side.is_east() {
            inner.width - size.width - pack.pad_x
        } else {
            pack.pad_x
        };
        let y = if side.is_south() {
            inner.height - main_offset - size.height
        } else {
            main_offset
        };
        tree.move_to(child, Point::new(x, y));
    } else {
        if pack.fill_y && !tree.fixed_size(child) {
            let height = inner.height - thickness * 2 - pack.pad_y * 2;
            if height > 0 {
                size = stretch(tree, child, Size::new(size.width, height), engine);
            }
        }

        let y = if pack.fill_y || (size.height < inner.height && side.is_middle()) {
            (inner.height - size.height) / 2
        } else {
            pack.pad_y
        };
        let x = if side.is_east() {
            inner.width - main_offset - size.width
        } else {
            main_offset
        };
        tree.move_to(child, Point::new(x, y));
    }
}
