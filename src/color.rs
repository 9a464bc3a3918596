//! Color types and pixel channel layouts.
//!
//! [`Rgba`] is the logical color handed to every drawing call. How its four
//! channels land in the bytes of a pixel is decided by the target surface's
//! [`ChannelOrder`]; see [`crate::render::map_color`].

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Raise every color channel by `delta`, saturating at 255. Alpha is kept.
    #[must_use]
    pub const fn lighten(self, delta: u8) -> Self {
        Self::new(
            self.r.saturating_add(delta),
            self.g.saturating_add(delta),
            self.b.saturating_add(delta),
            self.a,
        )
    }

    /// Lower every color channel by `delta`, saturating at 0. Alpha is kept.
    #[must_use]
    pub const fn darken(self, delta: u8) -> Self {
        Self::new(
            self.r.saturating_sub(delta),
            self.g.saturating_sub(delta),
            self.b.saturating_sub(delta),
            self.a,
        )
    }

    /// Flat, opaque color encoding a widget pick id.
    ///
    /// Ids above [`MAX_PICK_ID`] do not fit and alias smaller ones.
    /// The id occupies the low 24 bits: red holds bits 0-7, green 8-15, blue 16-23.
    #[must_use]
    pub const fn from_pick_id(id: u32) -> Self {
        Self::rgb(
            (id & 0xff) as u8,
            ((id >> 8) & 0xff) as u8,
            ((id >> 16) & 0xff) as u8,
        )
    }
}

/// Largest pick id that [`Rgba::from_pick_id`] encodes without aliasing.
pub const MAX_PICK_ID: u32 = 0x00FF_FFFF;

/// Byte position of each channel inside a 4-byte pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelOrder {
    /// Byte index of red.
    pub red: usize,
    /// Byte index of green.
    pub green: usize,
    /// Byte index of blue.
    pub blue: usize,
    /// Byte index of alpha (or of the padding byte on alpha-less surfaces).
    pub alpha: usize,
}

impl ChannelOrder {
    /// `[R, G, B, A]` in memory.
    pub const RGBA: Self = Self::new(0, 1, 2, 3);
    /// `[B, G, R, A]` in memory (little-endian ARGB words).
    pub const BGRA: Self = Self::new(2, 1, 0, 3);
    /// `[A, R, G, B]` in memory.
    pub const ARGB: Self = Self::new(1, 2, 3, 0);

    /// Create a channel order from explicit byte indices.
    ///
    /// The alpha index is derived by callers as the one byte not used by the
    /// color channels; this constructor does not validate it.
    #[must_use]
    pub const fn new(red: usize, green: usize, blue: usize, alpha: usize) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Build an order from the three color indices; alpha takes the remaining byte.
    ///
    /// Returns `None` unless the indices are distinct and all below 4.
    #[must_use]
    pub fn from_color_indices(red: usize, green: usize, blue: usize) -> Option<Self> {
        if red > 3 || green > 3 || blue > 3 || red == green || green == blue || red == blue {
            return None;
        }
        Some(Self::new(red, green, blue, 6 - (red + green + blue)))
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::RGBA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
    }

    #[test]
    fn test_rgba_with_alpha() {
        let semi_red = Rgba::RED.with_alpha(128);
        assert_eq!(semi_red.r, 255);
        assert_eq!(semi_red.a, 128);
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        let arr = color.to_array();
        assert_eq!(arr, [10, 20, 30, 40]);
        assert_eq!(Rgba::from_array(arr), color);
    }

    #[test]
    fn test_lighten_darken_saturate() {
        let c = Rgba::new(10, 220, 128, 77);
        assert_eq!(c.lighten(50), Rgba::new(60, 255, 178, 77));
        assert_eq!(c.darken(50), Rgba::new(0, 170, 78, 77));
    }

    #[test]
    fn test_pick_id_colors_are_distinct() {
        assert_eq!(Rgba::from_pick_id(0), Rgba::BLACK);
        assert_eq!(Rgba::from_pick_id(1), Rgba::rgb(1, 0, 0));
        assert_eq!(Rgba::from_pick_id(0x0102_03), Rgba::rgb(3, 2, 1));
        assert_ne!(Rgba::from_pick_id(256), Rgba::from_pick_id(1));
    }

    #[test]
    fn test_channel_order_from_indices() {
        assert_eq!(ChannelOrder::from_color_indices(2, 1, 0), Some(ChannelOrder::BGRA));
        assert_eq!(ChannelOrder::from_color_indices(1, 2, 3), Some(ChannelOrder::ARGB));
        assert_eq!(ChannelOrder::from_color_indices(0, 0, 1), None);
        assert_eq!(ChannelOrder::from_color_indices(0, 1, 4), None);
    }

    #[test]
    fn test_rgba_yaml_alpha_defaults_to_opaque() {
        let c: Rgba = serde_yaml_ng::from_str("{ r: 1, g: 2, b: 3 }").unwrap();
        assert_eq!(c, Rgba::rgb(1, 2, 3));
    }
}
