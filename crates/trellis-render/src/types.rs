//! Basic geometry and color types for rendering.
//!
//! All geometry is integer pixel space. Rectangles are half-open: a point on
//! the right or bottom edge is outside.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Offset this point by another, treated as a delta.
    #[inline]
    pub const fn offset(self, by: Point) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }

    /// The delta that moves `self` onto `other`.
    #[inline]
    pub const fn delta_to(self, other: Point) -> Self {
        Self {
            x: other.x - self.x,
            y: other.y - self.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.offset(rhs)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Whether both dimensions are zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.width == 0 && self.height == 0
    }

    /// Check if the size has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grow both dimensions by the given amounts.
    #[inline]
    pub const fn grow(self, width: i32, height: i32) -> Self {
        Self {
            width: self.width + width,
            height: self.height + height,
        }
    }

    /// Shrink both dimensions by the given amounts.
    #[inline]
    pub const fn shrink(self, width: i32, height: i32) -> Self {
        self.grow(-width, -height)
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size components.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle from an origin point and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    /// Left edge x coordinate.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.origin.x
    }

    /// Top edge y coordinate.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.origin.y
    }

    /// Right edge x coordinate (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge y coordinate (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.origin.y + self.size.height
    }

    /// Width of the rectangle.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.size.width
    }

    /// Height of the rectangle.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.size.height
    }

    /// Check whether a point lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Shrink the rectangle by `amount` on every side.
    #[inline]
    pub const fn inset(&self, amount: i32) -> Self {
        Self::new(
            self.origin.x + amount,
            self.origin.y + amount,
            self.size.width - amount * 2,
            self.size.height - amount * 2,
        )
    }
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent. Widgets treat it as "not set".
    pub const INVISIBLE: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GREY: Self = Self::rgb(153, 153, 153);
    pub const DARK_GREY: Self = Self::rgb(64, 64, 64);
    pub const LIGHT_GREY: Self = Self::rgb(204, 204, 204);

    /// Create a color from RGBA components.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Whether the color is fully transparent.
    #[inline]
    pub const fn is_invisible(&self) -> bool {
        self.a == 0
    }

    /// Raise each color channel by `amount`, saturating at 255.
    pub fn lighten(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
            a: self.a,
        }
    }

    /// Lower each color channel by `amount`, saturating at 0.
    pub fn darken(self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
            a: self.a,
        }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF0000FF").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if len != 6 && len != 8 {
            return None;
        }

        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(hex.get(6..8)?, 16).ok()?
        } else {
            255
        };

        Some(Self::rgba(r, g, b, a))
    }
}
