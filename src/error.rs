//! Error types for atlas allocation and pixel transfer.
//!
//! Capacity exhaustion is deliberately *not* represented here: a page that
//! cannot fit a request reports it through `Option::None`, since probing full
//! pages is an expected, frequent outcome the manager uses for control flow.
//! The types below cover caller errors only.

use thiserror::Error;

use crate::rect::AtlasRect;

/// A pixel transfer would read or write outside a surface.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CopyError {
    /// The source sub-rectangle falls outside the source surface.
    #[error("source rectangle {rect:?} is out of the {surface_width}x{surface_height} source surface")]
    SourceOutOfBounds {
        /// The requested source sub-rectangle.
        rect: AtlasRect,
        /// Source surface width.
        surface_width: u32,
        /// Source surface height.
        surface_height: u32,
    },
    /// The destination write would exceed the destination surface.
    #[error("destination rectangle {rect:?} is out of the {surface_width}x{surface_height} destination surface")]
    DestinationOutOfBounds {
        /// The rejected destination rectangle.
        rect: AtlasRect,
        /// Destination surface width.
        surface_width: u32,
        /// Destination surface height.
        surface_height: u32,
    },
}

/// Errors reported by [`AtlasManager`](crate::AtlasManager) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AtlasError {
    /// The key is already registered somewhere in the manager.
    ///
    /// Rejected before any mutation; the existing placement is untouched.
    #[error("key is already registered in this atlas manager")]
    DuplicateKey,
    /// A pixel transfer into the atlas failed.
    #[error(transparent)]
    Copy(#[from] CopyError),
}
