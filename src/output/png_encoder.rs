//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use crate::error::Result;
use crate::surface::Surface;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for surface snapshots.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a surface to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(surface: &Surface, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        Self::encode(surface, BufWriter::new(file))?;
        log::debug!(
            "wrote {}x{} snapshot to {}",
            surface.width(),
            surface.height(),
            path.display()
        );
        Ok(())
    }

    /// Encode a surface to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(surface: &Surface) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(surface, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(surface: &Surface, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        // Compact pixels drop the row padding and normalize the channel order
        writer.write_image_data(&surface.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ChannelOrder, Rgba};

    const PNG_MAGIC: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    #[test]
    fn test_png_to_bytes() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.clear(Rgba::RED);

        let bytes = PngEncoder::to_bytes(&surface).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_png_of_bgra_surface_without_alpha() {
        let mut surface = Surface::with_format(3, 2, ChannelOrder::BGRA, false).unwrap();
        surface.clear(Rgba::BLUE);
        let bytes = PngEncoder::to_bytes(&surface).unwrap();
        assert_eq!(&bytes[0..8], &PNG_MAGIC);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.png");
        let surface = Surface::new(4, 4).unwrap();

        PngEncoder::write_to_file(&surface, &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        assert_eq!(&written[0..8], &PNG_MAGIC);
    }
}
