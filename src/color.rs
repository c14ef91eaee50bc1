//! Floating-point RGBA colour.
//!
//! Colours cross the drawing API as four separate `f64` channels,
//! conventionally in `[0, 1]`, and are quantized to the rasterizer's 8-bit
//! `Rgba8` right before compositing.

use agg_rust::color::{rgba_pre, Rgba, Rgba8};

/// Non-premultiplied RGBA colour with `f64` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque colour.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Quantize to 8 bits per channel. Out-of-range channels are clamped.
    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8::from_rgba(&Rgba::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        ))
    }

    /// The 8-bit RGB triple stored in the pixel buffer for an opaque fill.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.to_rgba8();
        [c.r, c.g, c.b]
    }

    /// RGB channels scaled by alpha, as written by clearing an RGB buffer
    /// with this colour. Translucent colours come out darker.
    pub fn to_rgb8_premultiplied(self) -> [u8; 3] {
        let pre = rgba_pre(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        );
        let c = Rgba8::from_rgba(&pre);
        [c.r, c.g, c.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<[f64; 4]> for Color {
    fn from(c: [f64; 4]) -> Self {
        Color::rgba(c[0], c[1], c[2], c[3])
    }
}
