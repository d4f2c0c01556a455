//! Layout engine.
//!
//! A container lays out its children in one deterministic pass driven by the
//! rule each child was attached with:
//!
//! - [`Pack`]: stacked against a [`Side`] of the container, optionally filling
//!   the cross axis and expanding into leftover space.
//! - [`Place`]: pinned to a point or to edge offsets.
//!
//! Children without a rule are computed but keep whatever position they have.
//! Layout is total: it never fails, and configuration faults panic.

mod pack;
mod place;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use trellis_render::RenderEngine;

pub use pack::{Pack, Side};
pub use place::{Place, PlaceStrategy};

use crate::logging::targets;
use crate::widget::{WidgetId, WidgetTree};

/// The rule a container applies to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LayoutRule {
    Pack(Pack),
    Place(Place),
}

/// Lay out the children of `container` and settle its size.
///
/// Packed children are arranged first and determine the container's size;
/// placed children are then positioned against the settled content box.
pub fn arrange(tree: &mut WidgetTree, container: WidgetId, engine: &mut dyn RenderEngine) {
    let mut packed = Vec::new();
    let mut placed = Vec::new();

    for &child in tree.children(container) {
        match tree.layout_rule(child) {
            Some(LayoutRule::Pack(pack)) => packed.push((child, *pack)),
            Some(LayoutRule::Place(place)) => placed.push((child, *place)),
            None => {}
        }
    }

    let loose: Vec<WidgetId> = tree
        .children(container)
        .iter()
        .copied()
        .filter(|&child| tree.layout_rule(child).is_none())
        .collect();
    tracing::trace!(
        target: targets::LAYOUT,
        ?container,
        packed = packed.len(),
        placed = placed.len(),
        loose = loose.len(),
        "arrange"
    );
    for child in loose {
        tree.compute(child, engine);
    }

    pack::compute_packed(tree, container, &packed, engine);
    place::compute_placed(tree, container, &placed, engine);
}
