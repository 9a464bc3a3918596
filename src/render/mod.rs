//! Software rasterization onto [`Surface`]s.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: integer polyline drawing over all eight octants
//! - **Scanline Polygon Fill**: edge table bucketed by starting row plus an active
//!   edge list stepped with the same integer error discipline as the lines
//! - **Alpha Compositing**: `dst = ((255 - a) * dst + a * src) / 255` per channel
//!
//! Every routine locks the surfaces it touches for the duration of the call and
//! tests candidate pixels against the surface bounds and an optional clip
//! rectangle before writing.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Foley, J. D. et al. (1990). *Computer Graphics: Principles and Practice*, §3.6.

mod copy;
mod polygon;
mod polyline;
pub mod shapes;
mod text;

pub use copy::copy_surface;
pub use polygon::draw_polygon;
pub use polyline::draw_polyline;
pub use text::{draw_text, fill, BlockTextProvider, Font, TextProvider};

use crate::color::{ChannelOrder, Rgba};
use crate::geometry::Rect;
use crate::surface::Surface;

/// Pack a color into the 32-bit pixel value a surface stores.
///
/// Channels are placed at the byte indices reported by the surface's channel
/// order. On alpha-less surfaces the alpha byte is written opaque.
///
/// # Example
///
/// ```
/// use pickframe::color::{ChannelOrder, Rgba};
/// use pickframe::render::map_color;
/// use pickframe::surface::Surface;
///
/// let surface = Surface::with_format(4, 4, ChannelOrder::BGRA, true).unwrap();
/// let packed = map_color(&surface, Rgba::new(1, 2, 3, 4));
/// assert_eq!(packed.to_ne_bytes(), [3, 2, 1, 4]);
/// ```
#[must_use]
pub fn map_color(surface: &Surface, color: Rgba) -> u32 {
    pack_color(surface.channel_order(), surface.has_alpha(), color)
}

/// Inverse of [`map_color`]. Alpha reads as 255 on alpha-less surfaces.
#[must_use]
pub fn unmap_color(surface: &Surface, packed: u32) -> Rgba {
    let c = surface.channel_order();
    let bytes = packed.to_ne_bytes();
    let a = if surface.has_alpha() { bytes[c.alpha] } else { 255 };
    Rgba::new(bytes[c.red], bytes[c.green], bytes[c.blue], a)
}

pub(crate) fn pack_color(channels: ChannelOrder, has_alpha: bool, color: Rgba) -> u32 {
    let mut bytes = [0u8; 4];
    bytes[channels.red] = color.r;
    bytes[channels.green] = color.g;
    bytes[channels.blue] = color.b;
    bytes[channels.alpha] = if has_alpha { color.a } else { 255 };
    u32::from_ne_bytes(bytes)
}

/// Writable pixel area: the surface bounds intersected with an optional clip.
///
/// Bounds are half-open: `left <= x < right`, `top <= y < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClipBox {
    pub(crate) left: i32,
    pub(crate) top: i32,
    pub(crate) right: i32,
    pub(crate) bottom: i32,
}

impl ClipBox {
    pub(crate) fn new(surface: &Surface, clip: Option<&Rect>) -> Self {
        let area = surface.rect();
        let area = match clip {
            Some(clip) => area.intersect(clip).unwrap_or_default(),
            None => area,
        };
        Self {
            left: area.left(),
            top: area.top(),
            right: area.right(),
            bottom: area.bottom(),
        }
    }

    #[inline]
    pub(crate) fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    #[inline]
    pub(crate) fn contains_row(&self, y: i32) -> bool {
        y >= self.top && y < self.bottom
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}
