//! Rectangle copies between surfaces, optionally alpha-composited.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::surface::Surface;

/// Resolve an optional sub-rectangle against its surface.
fn resolve(rect: Option<&Rect>, width: u32, height: u32) -> Result<Rect> {
    let whole = Rect::from_xywh(0, 0, width as i32, height as i32);
    match rect {
        None => Ok(whole),
        Some(rect) if whole.contains_rect(rect) && rect.size.width >= 0 && rect.size.height >= 0 => {
            Ok(*rect)
        }
        Some(rect) => Err(Error::RectOutOfBounds {
            rect: *rect,
            width,
            height,
        }),
    }
}

/// Copy `src_rect` of `src` onto `dst_rect` of `dst`.
///
/// A `None` rectangle means the whole surface. Both rectangles must lie inside
/// their surfaces and have the same size.
///
/// With `alpha` set, every color channel is blended as
/// `((255 - a) * dst + a * src) / 255` using the source alpha (255 for alpha-less
/// sources) and the destination alpha is written opaque. Otherwise the four
/// channels are copied exactly. Source and destination channel orders may differ.
///
/// # Errors
///
/// - [`Error::RectOutOfBounds`] when a rectangle does not fit its surface.
/// - [`Error::SizeMismatch`] when the resolved rectangles differ in size.
///
/// No pixel is written when an error is returned.
///
/// # Example
///
/// ```
/// use pickframe::prelude::*;
///
/// let mut src = Surface::new(4, 4).unwrap();
/// src.clear(Rgba::RED);
/// let mut dst = Surface::new(8, 8).unwrap();
///
/// let dst_rect = Rect::from_xywh(2, 2, 4, 4);
/// copy_surface(&mut dst, Some(&dst_rect), &src, None, false).unwrap();
/// assert_eq!(dst.get_pixel(5, 5), Some(Rgba::RED));
/// assert_eq!(dst.get_pixel(6, 6), Some(Rgba::TRANSPARENT));
/// ```
pub fn copy_surface(
    dst: &mut Surface,
    dst_rect: Option<&Rect>,
    src: &Surface,
    src_rect: Option<&Rect>,
    alpha: bool,
) -> Result<()> {
    let src_lock = src.lock_read();
    let mut dst_lock = dst.lock();

    let from = resolve(src_rect, src_lock.width(), src_lock.height())?;
    let to = resolve(dst_rect, dst_lock.width(), dst_lock.height())?;
    if from.size != to.size {
        log::debug!("copy_surface: source {:?} does not match destination {:?}", from.size, to.size);
        return Err(Error::SizeMismatch {
            source_size: from.size,
            destination_size: to.size,
        });
    }

    let sc = src_lock.channel_order();
    let dc = dst_lock.channel_order();
    let src_alpha = src_lock.has_alpha();
    let dst_alpha = dst_lock.has_alpha();
    let src_stride = src_lock.stride();
    let dst_stride = dst_lock.stride();
    let src_buf = src_lock.buffer();
    let dst_buf = dst_lock.buffer();

    let width = from.size.width as usize;
    for row in 0..from.size.height as usize {
        let src_row = (from.top() as usize + row) * src_stride + from.left() as usize * 4;
        let dst_row = (to.top() as usize + row) * dst_stride + to.left() as usize * 4;

        for col in 0..width {
            let s = &src_buf[src_row + col * 4..src_row + col * 4 + 4];
            let d = &mut dst_buf[dst_row + col * 4..dst_row + col * 4 + 4];
            let a = if src_alpha { s[sc.alpha] } else { 255 };

            if alpha {
                d[dc.red] = blend(d[dc.red], s[sc.red], a);
                d[dc.green] = blend(d[dc.green], s[sc.green], a);
                d[dc.blue] = blend(d[dc.blue], s[sc.blue], a);
                d[dc.alpha] = 255;
            } else {
                d[dc.red] = s[sc.red];
                d[dc.green] = s[sc.green];
                d[dc.blue] = s[sc.blue];
                d[dc.alpha] = if dst_alpha { a } else { 255 };
            }
        }
    }
    Ok(())
}

#[inline]
fn blend(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    (((255 - a) * u32::from(dst) + a * u32::from(src)) / 255) as u8
}
