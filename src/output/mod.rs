//! Snapshot output.
//!
//! Surfaces are encoded as 8-bit RGBA PNG whatever their channel order; alpha-less
//! surfaces come out opaque.

mod png_encoder;

pub use png_encoder::PngEncoder;
