//! Integer raster geometry.
//!
//! Coordinates follow the image convention: origin at the **top-left**
//! corner, X to the right, Y downward. Signed coordinates are allowed so
//! that neighbor lookups and interlacing blocks may reach past the image
//! edge before being clipped.
//!
//! ```rust
//! use perceptual_core::{Point, Rect};
//!
//! let rect = Rect::new(-2, 3, 4, 4);
//! let clipped = rect.intersect(&Rect::from_size(10, 10)).unwrap();
//! assert_eq!(clipped, Rect::new(0, 3, 2, 4));
//! assert!(clipped.contains(Point::new(1, 6)));
//! ```

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Image dimensions in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rectangle defined by origin (x, y) and dimensions (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point is inside this rectangle.
    ///
    /// Inclusive on the left/top edges, exclusive on the right/bottom edges.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && (point.x as i64) < self.right()
            && (point.y as i64) < self.bottom()
    }

    /// Returns the overlapping region, or `None` if there is no overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left as i64 || bottom <= top as i64 {
            return None;
        }
        Some(Self::new(
            left,
            top,
            (right - left as i64) as u32,
            (bottom - top as i64) as u32,
        ))
    }
}
