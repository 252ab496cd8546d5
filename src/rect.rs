//! Integer geometry for atlas packing.
//!
//! Atlas surfaces are addressed in plain unsigned pixels with the origin at
//! the top-left corner, the x-axis growing to the right and the y-axis
//! growing downward. Two types cover everything the packer needs:
//!
//! - [`Size`] - the width/height of an item to pack or of a surface
//! - [`AtlasRect`] - an absolute placement inside one atlas page
//!
//! # Example
//!
//! ```
//! use shelfpack::{AtlasRect, Size};
//!
//! let size = Size::new(40, 20);
//! let rect = AtlasRect::new(0, 0, size.width, size.height);
//!
//! assert_eq!(rect.right(), 40);
//! assert_eq!(rect.bottom(), 20);
//! assert!(!rect.intersects(&AtlasRect::new(40, 0, 40, 20)));
//! ```

/// A width/height pair in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Area in pixels, widened to avoid overflow for large surfaces.
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// A placement rectangle inside one atlas page.
///
/// `(x, y)` is the absolute pixel offset of the top-left corner; `width` and
/// `height` are the packed item's original dimensions. A placement is
/// immutable once assigned and never moves for the lifetime of its page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasRect {
    /// X offset of the top-left corner.
    pub x: u32,
    /// Y offset of the top-left corner.
    pub y: u32,
    /// Width of the placed item.
    pub width: u32,
    /// Height of the placed item.
    pub height: u32,
}

impl AtlasRect {
    /// A zero-sized rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Creates a new rectangle from offset and size.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The item's dimensions as a [`Size`].
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// One past the right edge.
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// One past the bottom edge.
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Returns `true` if this rectangle overlaps `other` in both axes.
    ///
    /// Zero-sized rectangles never intersect anything.
    pub fn intersects(&self, other: &Self) -> bool {
        // a degenerate rect covers no pixels and cannot overlap
        if self.width == 0 || self.height == 0 || other.width == 0 || other.height == 0 {
            return false;
        }
        let x_overlap = (self.x as u64) < other.right() && (other.x as u64) < self.right();
        let y_overlap = (self.y as u64) < other.bottom() && (other.y as u64) < self.bottom();
        x_overlap && y_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_area() {
        assert_eq!(Size::new(4, 8).area(), 32);
        assert_eq!(Size::new(u32::MAX, 2).area(), u32::MAX as u64 * 2);
    }

    #[test]
    fn test_rect_edges() {
        let rect = AtlasRect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.size(), Size::new(30, 40));
    }

    #[test]
    fn test_intersects() {
        let a = AtlasRect::new(0, 0, 100, 100);
        let b = AtlasRect::new(150, 0, 100, 100);
        let c = AtlasRect::new(50, 50, 100, 100);

        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = AtlasRect::new(0, 0, 40, 20);
        let b = AtlasRect::new(40, 0, 40, 20);
        let c = AtlasRect::new(0, 20, 40, 20);

        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_zero_sized_never_intersects() {
        let empty = AtlasRect::new(10, 10, 0, 0);
        let full = AtlasRect::new(0, 0, 100, 100);
        assert!(!empty.intersects(&full));
        assert!(!full.intersects(&empty));

        // degenerate in one axis only, interior of the other rect
        let zero_width = AtlasRect::new(10, 10, 0, 30);
        let zero_height = AtlasRect::new(10, 10, 30, 0);
        assert!(!zero_width.intersects(&full));
        assert!(!full.intersects(&zero_width));
        assert!(!zero_height.intersects(&full));
        assert!(!full.intersects(&zero_height));
    }
}
