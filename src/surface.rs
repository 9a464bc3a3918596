//! Pixel surfaces and the scoped lock discipline around raw buffer access.
//!
//! A [`Surface`] owns a 4-byte-per-pixel buffer whose channel layout is described
//! by a [`ChannelOrder`]. Raw access goes through a lock guard ([`SurfaceLock`] for
//! writes, [`SurfaceReadLock`] for reads); dropping the guard unlocks the surface,
//! so every exit path of a drawing routine releases it.

use crate::color::{ChannelOrder, Rgba};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, Size};
use std::cell::Cell;

/// Row alignment in bytes (one cache line).
const ROW_ALIGNMENT: usize = 64;

/// Owned pixel buffer with a channel layout and optional alpha capability.
#[derive(Debug)]
pub struct Surface {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// Pixels in row-major order, 4 bytes each, laid out per `channels`.
    pixels: Vec<u8>,
    /// Stride in bytes (may include padding for alignment).
    stride: usize,
    /// Byte position of each channel.
    channels: ChannelOrder,
    /// Whether the alpha byte carries meaning.
    has_alpha: bool,
    /// Number of live lock guards.
    locks: Cell<u32>,
}

impl Surface {
    /// Create an RGBA surface with an alpha channel, cleared to transparent black.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use pickframe::surface::Surface;
    ///
    /// let surface = Surface::new(800, 600).unwrap();
    /// assert_eq!(surface.width(), 800);
    /// assert_eq!(surface.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_format(width, height, ChannelOrder::RGBA, true)
    }

    /// Create a surface with an explicit channel order and alpha capability.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn with_format(
        width: u32,
        height: u32,
        channels: ChannelOrder,
        has_alpha: bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + ROW_ALIGNMENT - 1) & !(ROW_ALIGNMENT - 1);
        let pixels = vec![0; stride * (height as usize)];

        Ok(Self {
            width,
            height,
            pixels,
            stride,
            channels,
            has_alpha,
            locks: Cell::new(0),
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a [`Size`].
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width as i32, self.height as i32)
    }

    /// The whole surface as a rectangle anchored at the origin.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(Point::ORIGIN, self.size())
    }

    /// Get the stride (row width in bytes, including any padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Byte position of each channel within a pixel.
    #[must_use]
    pub const fn channel_order(&self) -> ChannelOrder {
        self.channels
    }

    /// Whether this surface stores a meaningful alpha channel.
    #[must_use]
    pub const fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    /// True while any lock guard on this surface is alive.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locks.get() > 0
    }

    /// Lock the surface for writing. The guard unlocks on drop.
    pub fn lock(&mut self) -> SurfaceLock<'_> {
        self.locks.set(self.locks.get() + 1);
        SurfaceLock { surface: self }
    }

    /// Lock the surface for reading. The guard unlocks on drop.
    pub fn lock_read(&self) -> SurfaceReadLock<'_> {
        self.locks.set(self.locks.get() + 1);
        SurfaceReadLock { surface: self }
    }

    /// Get the logical color at a pixel, or `None` when out of bounds.
    ///
    /// Alpha reads as 255 on alpha-less surfaces.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        let px = &self.pixels[idx..idx + 4];
        let c = self.channels;
        let a = if self.has_alpha { px[c.alpha] } else { 255 };
        Some(Rgba::new(px[c.red], px[c.green], px[c.blue], a))
    }

    /// Set the color at a pixel. Does nothing if out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let packed = crate::render::map_color(self, color);
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&packed.to_ne_bytes());
    }

    /// Clear the whole surface to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        let packed = crate::render::map_color(self, color).to_ne_bytes();
        let row_bytes = (self.width as usize) * 4;

        for y in 0..self.height as usize {
            let row_start = y * self.stride;
            for chunk in self.pixels[row_start..row_start + row_bytes].chunks_exact_mut(4) {
                chunk.copy_from_slice(&packed);
            }
        }
    }

    /// Pixel data as tightly packed `[R, G, B, A]` bytes, whatever the channel order.
    ///
    /// This is what PNG encoding expects.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let mut compact = Vec::with_capacity((self.width as usize) * (self.height as usize) * 4);
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(color) = self.get_pixel(x, y) {
                    compact.extend_from_slice(&color.to_array());
                }
            }
        }
        compact
    }

    /// Calculate the byte index for a pixel coordinate.
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }
}

impl Clone for Surface {
    /// Copies the pixels; the copy starts unlocked.
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
            stride: self.stride,
            channels: self.channels,
            has_alpha: self.has_alpha,
            locks: Cell::new(0),
        }
    }
}

/// Write access to a locked surface's raw pixel buffer.
#[derive(Debug)]
pub struct SurfaceLock<'a> {
    surface: &'a mut Surface,
}

impl SurfaceLock<'_> {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Stride in bytes.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.surface.stride
    }

    /// Channel layout of the locked surface.
    #[must_use]
    pub fn channel_order(&self) -> ChannelOrder {
        self.surface.channels
    }

    /// Whether the locked surface has an alpha channel.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        self.surface.has_alpha
    }

    /// Raw pixel bytes, row-major with [`Self::stride`] bytes per row.
    pub fn buffer(&mut self) -> &mut [u8] {
        &mut self.surface.pixels
    }

    /// Read a packed pixel, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        read_packed(self.surface, x, y)
    }

    /// Write a packed pixel. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, packed: u32) {
        if x < 0 || y < 0 || x >= self.surface.width as i32 || y >= self.surface.height as i32 {
            return;
        }
        let idx = self.surface.pixel_index(x as u32, y as u32);
        self.surface.pixels[idx..idx + 4].copy_from_slice(&packed.to_ne_bytes());
    }

    /// Write `packed` to every pixel of row `y` in `[x0, x1)`, clamped to the surface.
    pub fn fill_span(&mut self, y: i32, x0: i32, x1: i32, packed: u32) {
        if y < 0 || y >= self.surface.height as i32 {
            return;
        }
        let start = x0.max(0);
        let end = x1.min(self.surface.width as i32);
        if start >= end {
            return;
        }
        let bytes = packed.to_ne_bytes();
        let from = self.surface.pixel_index(start as u32, y as u32);
        let to = from + ((end - start) as usize) * 4;
        for chunk in self.surface.pixels[from..to].chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
    }
}

impl Drop for SurfaceLock<'_> {
    fn drop(&mut self) {
        self.surface.locks.set(self.surface.locks.get() - 1);
    }
}

/// Read access to a locked surface's raw pixel buffer.
#[derive(Debug)]
pub struct SurfaceReadLock<'a> {
    surface: &'a Surface,
}

impl SurfaceReadLock<'_> {
    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.surface.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Stride in bytes.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.surface.stride
    }

    /// Channel layout of the locked surface.
    #[must_use]
    pub fn channel_order(&self) -> ChannelOrder {
        self.surface.channels
    }

    /// Whether the locked surface has an alpha channel.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        self.surface.has_alpha
    }

    /// Raw pixel bytes, row-major with [`Self::stride`] bytes per row.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.surface.pixels
    }

    /// Read a packed pixel, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        read_packed(self.surface, x, y)
    }
}

impl Drop for SurfaceReadLock<'_> {
    fn drop(&mut self) {
        self.surface.locks.set(self.surface.locks.get() - 1);
    }
}

fn read_packed(surface: &Surface, x: i32, y: i32) -> Option<u32> {
    if x < 0 || y < 0 || x >= surface.width as i32 || y >= surface.height as i32 {
        return None;
    }
    let idx = surface.pixel_index(x as u32, y as u32);
    let px = &surface.pixels[idx..idx + 4];
    Some(u32::from_ne_bytes([px[0], px[1], px[2], px[3]]))
}
