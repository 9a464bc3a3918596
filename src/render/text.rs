//! Text blits and solid fills.
//!
//! Glyph rasterization lives behind [`TextProvider`]; this module only positions,
//! clips and composites what the provider returns.

use super::{copy_surface, map_color, ClipBox};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// A font request handed to a [`TextProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    /// Family name, interpreted by the provider.
    pub family: String,
    /// Pixel height of a line.
    pub size: u32,
}

impl Font {
    /// Create a font request.
    #[must_use]
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans", 14)
    }
}

/// Rasterizes strings into standalone surfaces.
pub trait TextProvider {
    /// Size of the surface [`TextProvider::render`] would produce.
    fn text_size(&self, text: &str, font: &Font) -> Size;

    /// Render `text` into a new surface with an alpha channel. Uncovered pixels
    /// must be fully transparent.
    ///
    /// # Errors
    ///
    /// Returns an error when the text has no drawable extent.
    fn render(&self, text: &str, font: &Font, color: Rgba) -> Result<Surface>;
}

/// Fallback provider drawing each visible character as a solid block.
///
/// Cells are `size / 2` wide and `size` tall; whitespace leaves its cell empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockTextProvider;

impl BlockTextProvider {
    fn advance(font: &Font) -> i32 {
        (font.size as i32 / 2).max(1)
    }
}

impl TextProvider for BlockTextProvider {
    fn text_size(&self, text: &str, font: &Font) -> Size {
        let chars = text.chars().count() as i32;
        if chars == 0 || font.size == 0 {
            return Size::ZERO;
        }
        Size::new(chars * Self::advance(font), font.size as i32)
    }

    fn render(&self, text: &str, font: &Font, color: Rgba) -> Result<Surface> {
        let size = self.text_size(text, font);
        let mut surface = Surface::new(size.width.max(0) as u32, size.height.max(0) as u32)?;
        let advance = Self::advance(font);
        let glyph = color.with_alpha(255);

        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let cell = Rect::from_xywh(i as i32 * advance, 0, advance, size.height);
            let inner = if advance > 2 { cell.inset(1) } else { cell };
            fill(&mut surface, Some(glyph), Some(&inner));
        }
        Ok(surface)
    }
}

/// Draw `text` with its top-left corner at `at`.
///
/// The rendered string is alpha-composited onto `surface`; whatever falls outside
/// the surface or `clip` is cut off.
pub fn draw_text(
    surface: &mut Surface,
    at: Point,
    text: &str,
    font: &Font,
    color: Rgba,
    clip: Option<&Rect>,
    provider: &dyn TextProvider,
) {
    let extent = provider.text_size(text, font);
    if extent.is_empty() {
        return;
    }
    let rendered = match provider.render(text, font, color) {
        Ok(rendered) => rendered,
        Err(e) => {
            log::debug!("text provider failed for {text:?}: {e}");
            return;
        }
    };

    let placed = Rect::new(at, rendered.size());
    let mut visible = placed.intersect(&surface.rect());
    if let (Some(area), Some(clip)) = (visible, clip) {
        visible = area.intersect(clip);
    }
    let Some(visible) = visible else {
        return;
    };

    let src_rect = Rect::new(visible.top_left - at, visible.size);
    if let Err(e) = copy_surface(surface, Some(&visible), &rendered, Some(&src_rect), true) {
        log::debug!("text blit skipped: {e}");
    }
}

/// Fill the surface (or its intersection with `clip`) with a solid color.
///
/// `None` fills opaque black. The packed color is written as is, without blending.
pub fn fill(surface: &mut Surface, color: Option<Rgba>, clip: Option<&Rect>) {
    let bounds = ClipBox::new(surface, clip);
    if bounds.is_empty() {
        return;
    }
    let packed = map_color(surface, color.unwrap_or(Rgba::BLACK));
    let mut lock = surface.lock();
    for y in bounds.top..bounds.bottom {
        lock.fill_span(y, bounds.left, bounds.right, packed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_none_is_black() {
        let mut surface = Surface::new(4, 4).unwrap();
        fill(&mut surface, None, None);
        assert_eq!(surface.get_pixel(3, 3), Some(Rgba::BLACK));
    }

    #[test]
    fn test_fill_clipped() {
        let mut surface = Surface::new(10, 10).unwrap();
        let clip = Rect::from_xywh(8, 8, 5, 5);
        fill(&mut surface, Some(Rgba::RED), Some(&clip));
        assert_eq!(surface.get_pixel(9, 9), Some(Rgba::RED));
        assert_eq!(surface.get_pixel(7, 9), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_block_provider_size() {
        let font = Font::new("any", 10);
        assert_eq!(BlockTextProvider.text_size("abc", &font), Size::new(15, 10));
        assert_eq!(BlockTextProvider.text_size("", &font), Size::ZERO);
    }

    #[test]
    fn test_block_provider_leaves_gaps_transparent() {
        let font = Font::new("any", 10);
        let rendered = BlockTextProvider.render("a b", &font, Rgba::BLUE).unwrap();
        assert_eq!(rendered.get_pixel(2, 5), Some(Rgba::BLUE));
        assert_eq!(rendered.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(rendered.get_pixel(7, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(rendered.get_pixel(12, 5), Some(Rgba::BLUE));
    }

    #[test]
    fn test_draw_text_composites_and_truncates() {
        let mut surface = Surface::new(12, 12).unwrap();
        surface.clear(Rgba::WHITE);
        let font = Font::new("any", 10);
        draw_text(
            &mut surface,
            Point::new(6, 6),
            "ab",
            &font,
            Rgba::BLACK,
            None,
            &BlockTextProvider,
        );
        assert_eq!(surface.get_pixel(8, 8), Some(Rgba::BLACK));
        // Cell border stays untouched by the transparent glyph margin.
        assert_eq!(surface.get_pixel(6, 6), Some(Rgba::WHITE));
        assert_eq!(surface.get_pixel(5, 8), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_text_respects_clip() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.clear(Rgba::WHITE);
        let clip = Rect::from_xywh(0, 0, 3, 20);
        draw_text(
            &mut surface,
            Point::ORIGIN,
            "ab",
            &Font::new("any", 10),
            Rgba::RED,
            Some(&clip),
            &BlockTextProvider,
        );
        assert_eq!(surface.get_pixel(2, 5), Some(Rgba::RED));
        assert_eq!(surface.get_pixel(3, 5), Some(Rgba::WHITE));
    }
}
