//! shelfpack packs variable-sized rectangular images into fixed-size atlas
//! pages at runtime, so a renderer can batch many small textures into few
//! large surfaces and cut bind overhead.
//!
//! # Layers
//!
//! - [`AtlasPage`] packs rectangles into one fixed-size surface with a
//!   first-fit shelf strategy and rolls failed attempts back completely.
//! - [`AtlasManager`] spans any number of pages, probing existing pages
//!   newest first and creating a new page, sized to fit, when every existing
//!   one refuses. A key index across all pages gives O(1) lookup.
//!
//! Pixel storage stays behind the [`Surface`] traits; the built-in
//! [`CpuSurface`] backend is enough to pack, blit, and upload, and GPU
//! texture wrappers plug in through [`SurfaceFactory`].
//!
//! # Example
//!
//! ```
//! use shelfpack::{AtlasManager, CpuSurface, CpuSurfaceFactory};
//!
//! let mut atlas = AtlasManager::new(CpuSurfaceFactory);
//!
//! // pack an image and write its pixels into the owning page
//! let sprite = CpuSurface::from_pixels(2, 2, vec![1, 2, 3, 4]);
//! let (page, rect) = atlas.set("sprite", &sprite).unwrap();
//!
//! assert_eq!((rect.width, rect.height), (2, 2));
//! assert_eq!(atlas.page(page).surface().pixel(rect.x, rect.y), 1);
//! ```
//!
//! Packing is single-threaded and synchronous: nothing blocks, and callers
//! needing concurrent access serialize calls themselves.

pub mod error;
pub mod manager;
pub mod page;
pub mod rect;
pub mod surface;

pub use error::{AtlasError, CopyError};
pub use manager::{AtlasManager, DEFAULT_PAGE_SIZE, PageId};
pub use page::AtlasPage;
pub use rect::{AtlasRect, Size};
pub use surface::{CpuSurface, CpuSurfaceFactory, PixelSurface, Surface, SurfaceFactory, copy_pixels};
