//! Multi-page atlas manager.
//!
//! An [`AtlasManager`] makes allocation appear unbounded by spanning any
//! number of fixed-size [`AtlasPage`]s. Requests probe existing pages newest
//! first, since earlier pages tend to fill up first; when every page refuses,
//! a new page is created, sized up to the request if it exceeds the default
//! page dimensions. A key index spanning all pages gives O(1) lookup.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    error::AtlasError,
    page::AtlasPage,
    rect::{AtlasRect, Size},
    surface::{CpuSurfaceFactory, PixelSurface, SurfaceFactory, copy_pixels},
};

/// Default page dimensions, matching common GPU texture size limits.
pub const DEFAULT_PAGE_SIZE: u32 = 2048;

/// Stable handle to one page of an [`AtlasManager`].
///
/// Pages are append-only and never removed, so a handle stays valid for the
/// manager's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(pub(crate) usize);

impl PageId {
    /// Index of the page in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Routes allocations across an ordered collection of atlas pages.
///
/// The manager starts with exactly one default-sized page and appends new
/// pages lazily; pages are never removed or merged. Keys are unique across
/// the whole collection.
///
/// # Example
///
/// ```
/// use shelfpack::{AtlasManager, CpuSurfaceFactory, Size};
///
/// let mut atlas = AtlasManager::new(CpuSurfaceFactory);
/// let (page, rect) = atlas.alloc("icon", Size::new(32, 32)).unwrap();
///
/// assert_eq!(atlas.try_get(&"icon"), Some((page, rect)));
/// ```
pub struct AtlasManager<K, F: SurfaceFactory = CpuSurfaceFactory> {
    factory: F,
    default_width: u32,
    default_height: u32,
    pages: Vec<AtlasPage<K, F::Surface>>,
    owner: FxHashMap<K, PageId>,
}

impl<K, F> AtlasManager<K, F>
where
    K: Eq + Hash + Clone,
    F: SurfaceFactory,
{
    /// Creates a manager with [`DEFAULT_PAGE_SIZE`] square pages.
    pub fn new(factory: F) -> Self {
        Self::with_page_size(factory, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE)
    }

    /// Creates a manager with the given default page dimensions and one
    /// initial empty page.
    pub fn with_page_size(mut factory: F, width: u32, height: u32) -> Self {
        let first = AtlasPage::new(factory.create(width, height));
        Self {
            factory,
            default_width: width,
            default_height: height,
            pages: vec![first],
            owner: FxHashMap::default(),
        }
    }

    /// Reserves a placement for `key`, spilling over to a new page when no
    /// existing page can fit the item.
    ///
    /// An item larger than the default page dimensions gets a page sized to
    /// fit it, so allocation fails only on key misuse.
    ///
    /// # Errors
    ///
    /// [`AtlasError::DuplicateKey`] if `key` is already registered anywhere
    /// in the manager; nothing is mutated in that case.
    pub fn alloc(&mut self, key: K, size: Size) -> Result<(PageId, AtlasRect), AtlasError> {
        if self.owner.contains_key(&key) {
            return Err(AtlasError::DuplicateKey);
        }

        // newest pages are the likeliest to still have shelf space
        for index in (0..self.pages.len()).rev() {
            if let Some(rect) = self.pages[index].try_alloc(key.clone(), size) {
                let id = PageId(index);
                self.owner.insert(key, id);
                return Ok((id, rect));
            }
        }

        let width = self.default_width.max(size.width);
        let height = self.default_height.max(size.height);
        let mut page = AtlasPage::new(self.factory.create(width, height));
        debug!(width, height, pages = self.pages.len() + 1, "created atlas page");

        let rect = page
            .try_alloc(key.clone(), size)
            .expect("allocation should fit in a new page");
        let id = PageId(self.pages.len());
        self.pages.push(page);
        self.owner.insert(key, id);
        Ok((id, rect))
    }

    /// Allocates a placement for `source`'s dimensions and copies its pixels
    /// into the owning page.
    ///
    /// # Errors
    ///
    /// [`AtlasError::DuplicateKey`] on key misuse, [`AtlasError::Copy`] if
    /// the pixel transfer reports a range error. The placement fits its page
    /// by construction, so a copy error can only come from a surface whose
    /// reported dimensions disagree with its storage; in that case the key
    /// stays registered with blank pixels, since placements are never
    /// evicted.
    pub fn set<Src>(&mut self, key: K, source: &Src) -> Result<(PageId, AtlasRect), AtlasError>
    where
        Src: PixelSurface + ?Sized,
        F::Surface: PixelSurface,
    {
        let size = Size::new(source.width(), source.height());
        let (id, rect) = self.alloc(key, size)?;
        copy_pixels(source, None, self.pages[id.0].surface_mut(), rect.x, rect.y)?;
        Ok((id, rect))
    }

    /// Looks up the page and placement registered for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the manager index names a page that denies owning the key;
    /// that is a bug in index maintenance, not a recoverable error.
    pub fn try_get(&self, key: &K) -> Option<(PageId, AtlasRect)> {
        let id = *self.owner.get(key)?;
        let rect = self.pages[id.0]
            .rect(key)
            .copied()
            .expect("manager index out of sync with page index");
        Some((id, rect))
    }

    /// Returns `true` if `key` is registered in any page.
    pub fn contains_key(&self, key: &K) -> bool {
        self.owner.contains_key(key)
    }

    /// The page behind `id`.
    pub fn page(&self, id: PageId) -> &AtlasPage<K, F::Surface> {
        &self.pages[id.0]
    }

    /// Iterates over pages in creation order.
    pub fn pages(&self) -> impl Iterator<Item = &AtlasPage<K, F::Surface>> {
        self.pages.iter()
    }

    /// Number of pages created so far. Always at least one.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of keys registered across all pages.
    pub fn len(&self) -> usize {
        self.owner.len()
    }

    /// Returns `true` if no key has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }

    /// Releases every page and its backing surface.
    ///
    /// Consuming `self` makes teardown single-shot by construction; the
    /// manager cannot be used afterward. Dropping the manager has the same
    /// effect.
    pub fn dispose(self) {}
}

impl<K, F> Default for AtlasManager<K, F>
where
    K: Eq + Hash + Clone,
    F: SurfaceFactory + Default,
{
    fn default() -> Self {
        Self::new(F::default())
    }
}
