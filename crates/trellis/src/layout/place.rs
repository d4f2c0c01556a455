//! Place layout: children pinned to a point or to the container's edges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use trellis_render::{Point, RenderEngine};

use crate::widget::{WidgetId, WidgetTree};

/// How a [`Place`] directive positions its child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceStrategy {
    /// At `Place::point`, relative to the container's content box.
    Point,
    /// Measured inward from the container's edges, or centered.
    Edges,
}

/// Placement directive for one child.
///
/// Edge offsets are measured inward from the container's content box.
/// `right` wins over `left` and `bottom` over `top`; `center` and `middle`
/// override their axis entirely. If no edge offset is set and neither flag is,
/// the child goes to `point`, even when that is the origin.
///
/// ```
/// use trellis::layout::{Place, PlaceStrategy};
/// use trellis_render::Point;
///
/// assert_eq!(Place::at(Point::new(5, 5)).strategy(), PlaceStrategy::Point);
/// assert_eq!(Place::default().right(10).strategy(), PlaceStrategy::Edges);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Place {
    pub point: Point,
    pub top: i32,
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
    pub center: bool,
    pub middle: bool,
}

impl Place {
    /// Place at an explicit point.
    pub fn at(point: Point) -> Self {
        Self {
            point,
            ..Self::default()
        }
    }

    pub fn top(mut self, top: i32) -> Self {
        self.top = top;
        self
    }

    pub fn left(mut self, left: i32) -> Self {
        self.left = left;
        self
    }

    pub fn right(mut self, right: i32) -> Self {
        self.right = right;
        self
    }

    pub fn bottom(mut self, bottom: i32) -> Self {
        self.bottom = bottom;
        self
    }

    /// Center horizontally.
    pub fn center(mut self) -> Self {
        self.center = true;
        self
    }

    /// Center vertically.
    pub fn middle(mut self) -> Self {
        self.middle = true;
        self
    }

    pub fn strategy(&self) -> PlaceStrategy {
        if self.top != 0
            || self.left != 0
            || self.right != 0
            || self.bottom != 0
            || self.center
            || self.middle
        {
            PlaceStrategy::Edges
        } else {
            PlaceStrategy::Point
        }
    }
}

/// Compute and position every placed child against the container's settled
/// content box.
///
/// Computing the child first also lays out any placed children it has.
pub(crate) fn compute_placed(
    tree: &mut WidgetTree,
    container: WidgetId,
    placed: &[(WidgetId, Place)],
    engine: &mut dyn RenderEngine,
) {
    let Some(inner) = tree.base(container).map(|b| b.inner_size()) else {
        return;
    };

    for &(child, place) in placed {
        tree.compute(child, engine);
        let size = tree.size(child);

        let point = match place.strategy() {
            PlaceStrategy::Point => place.point,
            PlaceStrategy::Edges => {
                let mut point = Point::ZERO;
                if place.left != 0 {
                    point.x = place.left;
                }
                if place.top != 0 {
                    point.y = place.top;
                }
                if place.right != 0 {
                    point.x = inner.width - size.width - place.right;
                }
                if place.bottom != 0 {
                    point.y = inner.height - size.height - place.bottom;
                }
                if place.center {
                    point.x = (inner.width - size.width) / 2;
                }
                if place.middle {
                    point.y = (inner.height - size.height) / 2;
                }
                point
            }
        };
        tree.move_to(child, point);
    }
}
