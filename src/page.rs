//! Single-page shelf allocator.
//!
//! An [`AtlasPage`] owns one fixed-size surface and packs rectangles into it
//! with a first-fit shelf strategy: items fill the current shelf left to
//! right in call order, and when the next item no longer fits the shelf, a
//! new shelf starts below the tallest item of the old one. No reordering or
//! best-fit search is performed, so packing efficiency depends on call order.
//! That is a documented limitation of shelf packing, not a defect.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    rect::{AtlasRect, Size},
    surface::Surface,
};

/// One fixed-size atlas page with its shelf-packing cursor and key index.
///
/// The page owns its backing surface exclusively; dropping the page releases
/// the surface. Placements are recorded under a caller-supplied key and are
/// never evicted or moved.
pub struct AtlasPage<K, S> {
    surface: S,
    index: FxHashMap<K, AtlasRect>,
    max_x: u32,
    max_y: u32,
    // shelf cursor
    x_pen: u32,
    line_base: u32,
    line_pitch: u32,
}

impl<K, S> AtlasPage<K, S>
where
    K: Eq + Hash,
    S: Surface,
{
    /// Creates an empty page over `surface`.
    pub fn new(surface: S) -> Self {
        let max_x = surface.width();
        let max_y = surface.height();
        Self {
            surface,
            index: FxHashMap::default(),
            max_x,
            max_y,
            x_pen: 0,
            line_base: 0,
            line_pitch: 0,
        }
    }

    /// Page width in pixels.
    pub fn width(&self) -> u32 {
        self.max_x
    }

    /// Page height in pixels.
    pub fn height(&self) -> u32 {
        self.max_y
    }

    /// The backing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the backing surface, for writing pixel data into
    /// committed placements.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The placement recorded for `key`, if this page owns it.
    pub fn rect(&self, key: &K) -> Option<&AtlasRect> {
        self.index.get(key)
    }

    /// Returns `true` if `key` is packed into this page.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Iterates over all committed placements.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &AtlasRect)> {
        self.index.iter()
    }

    /// Number of committed placements.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if nothing has been packed yet.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Fraction of the page area covered by committed placements.
    pub fn utilization(&self) -> f32 {
        let packed: u64 = self.index.values().map(|rect| rect.size().area()).sum();
        packed as f32 / (self.max_x as f32 * self.max_y as f32)
    }

    /// Tries to place an item of `size` and record it under `key`.
    ///
    /// Returns `None` if the page cannot fit the item at its current packing
    /// state; a failed attempt leaves the cursor untouched, so the manager
    /// can probe pages freely. Keys must be unique per page; the manager
    /// guards this globally, and bypassing it with a duplicate key is a
    /// caller error.
    pub fn try_alloc(&mut self, key: K, size: Size) -> Option<AtlasRect> {
        debug_assert!(
            !self.index.contains_key(&key),
            "key is already packed into this page"
        );

        let snapshot = (self.x_pen, self.line_base, self.line_pitch);

        match self.place(size.width, size.height) {
            Some((x, y)) => {
                let rect = AtlasRect::new(x, y, size.width, size.height);
                trace!(x, y, width = size.width, height = size.height, "placed item");
                self.index.insert(key, rect);
                Some(rect)
            }
            None => {
                // roll the cursor back; a failed attempt is a state no-op
                (self.x_pen, self.line_base, self.line_pitch) = snapshot;
                None
            }
        }
    }

    /// The shelf algorithm. Mutates the cursor in place; the caller restores
    /// the snapshot on failure.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        // a previous shelf already overflowed
        if self.line_base > self.max_y {
            return None;
        }
        // too wide for any shelf of this page
        if w > self.max_x {
            return None;
        }
        // current shelf position leaves no height budget
        if self.line_base as u64 + h as u64 > self.max_y as u64 {
            return None;
        }

        // try the current shelf
        if self.x_pen as u64 + w as u64 <= self.max_x as u64 {
            let place = (self.x_pen, self.line_base);
            self.line_pitch = self.line_pitch.max(h);
            self.x_pen += w;
            return Some(place);
        }

        // start a new shelf below the tallest item of the old one
        self.line_base = self.line_base.saturating_add(self.line_pitch);
        self.line_pitch = h;
        self.x_pen = 0;

        if self.line_base as u64 + h as u64 > self.max_y as u64 {
            // new shelf does not fit vertically
            return None;
        }

        // width was checked against max_x above, so the fresh shelf fits
        let place = (self.x_pen, self.line_base);
        self.x_pen += w;
        Some(place)
    }

    #[cfg(test)]
    fn cursor(&self) -> (u32, u32, u32) {
        (self.x_pen, self.line_base, self.line_pitch)
    }
}
