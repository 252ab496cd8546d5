//! Surface abstraction and the pixel-copy primitive.
//!
//! The packer itself never touches pixels; it only needs a surface's
//! dimensions. The traits here keep the backing storage opaque so pages can
//! wrap a GPU texture just as well as a CPU buffer:
//!
//! - [`Surface`] - anything with a fixed width and height
//! - [`SurfaceFactory`] - produces a new surface for requested dimensions
//! - [`PixelSurface`] - surfaces that expose their pixel storage, enabling
//!   [`copy_pixels`] and [`AtlasManager::set`](crate::AtlasManager::set)
//!
//! [`CpuSurface`] is the built-in main-memory backend: one 32-bit packed
//! color per pixel, row-major, matching the common `Rgba8` texture layout so
//! a page can be uploaded to the GPU in one copy via [`CpuSurface::as_bytes`].

use crate::{error::CopyError, rect::AtlasRect};

/// A fixed-size 2D pixel surface.
///
/// Created once with its final dimensions and never resized. The atlas only
/// relies on `width`/`height`; everything else about the surface is opaque.
pub trait Surface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;
}

/// Produces backing surfaces for new atlas pages.
pub trait SurfaceFactory {
    /// The surface type this factory creates.
    type Surface: Surface;

    /// Creates a new surface of exactly `width` x `height` pixels.
    fn create(&mut self, width: u32, height: u32) -> Self::Surface;
}

/// A [`Surface`] whose pixel storage is directly readable and writable.
///
/// Pixels are 32-bit packed colors. Both methods require `rect` to lie fully
/// inside the surface; [`copy_pixels`] performs that validation, so these are
/// the raw, already-validated transfer hooks.
pub trait PixelSurface: Surface {
    /// Reads the pixels of `rect` into `out`, row-major.
    ///
    /// `out` must hold exactly `rect.width * rect.height` pixels.
    fn read_rect(&self, rect: AtlasRect, out: &mut [u32]);

    /// Writes `pixels` (row-major, `rect.width * rect.height` long) into
    /// `rect`.
    fn write_rect(&mut self, rect: AtlasRect, pixels: &[u32]);
}

/// Copies a sub-rectangle of `src` into `dst` at `(dst_x, dst_y)`.
///
/// `src_rect` of `None` copies the whole source. The transfer round-trips
/// pixel data exactly; the staging buffer is sized to the sub-rectangle and
/// released when the function returns, whatever the outcome.
///
/// # Errors
///
/// [`CopyError::DestinationOutOfBounds`] if the write would exceed `dst`,
/// [`CopyError::SourceOutOfBounds`] if `src_rect` exceeds `src`.
pub fn copy_pixels<S, D>(
    src: &S,
    src_rect: Option<AtlasRect>,
    dst: &mut D,
    dst_x: u32,
    dst_y: u32,
) -> Result<(), CopyError>
where
    S: PixelSurface + ?Sized,
    D: PixelSurface + ?Sized,
{
    let rect = src_rect.unwrap_or_else(|| AtlasRect::new(0, 0, src.width(), src.height()));
    let dst_rect = AtlasRect::new(dst_x, dst_y, rect.width, rect.height);

    if dst_rect.right() > dst.width() as u64 || dst_rect.bottom() > dst.height() as u64 {
        return Err(CopyError::DestinationOutOfBounds {
            rect: dst_rect,
            surface_width: dst.width(),
            surface_height: dst.height(),
        });
    }
    if rect.right() > src.width() as u64 || rect.bottom() > src.height() as u64 {
        return Err(CopyError::SourceOutOfBounds {
            rect,
            surface_width: src.width(),
            surface_height: src.height(),
        });
    }

    let mut staging = vec![0u32; rect.size().area() as usize];
    src.read_rect(rect, &mut staging);
    dst.write_rect(dst_rect, &staging);

    Ok(())
}

/// Main-memory pixel surface, one 32-bit packed color per pixel, row-major.
#[derive(Debug, Clone)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl CpuSurface {
    /// Creates a zero-filled surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel buffer length must match surface dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// The raw pixel storage, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Byte view of the pixel storage, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// The pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel out of surface");
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

impl Surface for CpuSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl PixelSurface for CpuSurface {
    fn read_rect(&self, rect: AtlasRect, out: &mut [u32]) {
        let row_len = rect.width as usize;
        for row in 0..rect.height as usize {
            let src_start =
                (rect.y as usize + row) * self.width as usize + rect.x as usize;
            out[row * row_len..(row + 1) * row_len]
                .copy_from_slice(&self.pixels[src_start..src_start + row_len]);
        }
    }

    fn write_rect(&mut self, rect: AtlasRect, pixels: &[u32]) {
        let row_len = rect.width as usize;
        for row in 0..rect.height as usize {
            let dst_start =
                (rect.y as usize + row) * self.width as usize + rect.x as usize;
            self.pixels[dst_start..dst_start + row_len]
                .copy_from_slice(&pixels[row * row_len..(row + 1) * row_len]);
        }
    }
}

/// Factory for [`CpuSurface`] pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuSurfaceFactory;

impl SurfaceFactory for CpuSurfaceFactory {
    type Surface = CpuSurface;

    fn create(&mut self, width: u32, height: u32) -> CpuSurface {
        CpuSurface::new(width, height)
    }
}
