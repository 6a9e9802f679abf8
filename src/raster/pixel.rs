//! Packed premultiplied pixels and the float color/paint inputs.

use crate::foundation::math::{mul_div255_u8, unit_clamp};

/// Packed 32-bit premultiplied pixel: A in bits 31..24, then R, G, B.
///
/// The premultiplication invariant `r, g, b <= a` is established when a
/// pixel is built from a [`Color`] or decoded straight-alpha data and is
/// preserved by every blend in this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel(u32);

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0);

    /// Pack four channel bytes. Channels must already be premultiplied.
    pub fn pack_argb(a: u32, r: u32, g: u32, b: u32) -> Self {
        debug_assert!(a <= 255 && r <= 255 && g <= 255 && b <= 255);
        Self((a << 24) | (r << 16) | (g << 8) | b)
    }

    /// Alpha channel in `[0, 255]`.
    pub fn a(self) -> u32 {
        (self.0 >> 24) & 0xFF
    }

    /// Premultiplied red channel.
    pub fn r(self) -> u32 {
        (self.0 >> 16) & 0xFF
    }

    /// Premultiplied green channel.
    pub fn g(self) -> u32 {
        (self.0 >> 8) & 0xFF
    }

    /// Premultiplied blue channel.
    pub fn b(self) -> u32 {
        self.0 & 0xFF
    }

    /// The raw packed word.
    pub fn to_bits(self) -> u32 {
        self.0
    }

    /// Reinterpret a packed word as a pixel.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Scale every channel (alpha included) by `alpha` in `[0, 255]`.
    pub(crate) fn scale(self, alpha: u32) -> Self {
        debug_assert!(alpha <= 255);
        let alpha = alpha as u16;
        Self::pack_argb(
            u32::from(mul_div255_u8(self.a() as u16, alpha)),
            u32::from(mul_div255_u8(self.r() as u16, alpha)),
            u32::from(mul_div255_u8(self.g() as u16, alpha)),
            u32::from(mul_div255_u8(self.b() as u16, alpha)),
        )
    }
}

/// Nonpremultiplied float color, each component nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    /// Alpha.
    pub a: f32,
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Color {
    /// Create a color from its components.
    pub const fn new(a: f32, r: f32, g: f32, b: f32) -> Self {
        Self { a, r, g, b }
    }

    /// This color with every component clamped to the unit interval.
    pub fn clamped(self) -> Self {
        Self {
            a: unit_clamp(self.a),
            r: unit_clamp(self.r),
            g: unit_clamp(self.g),
            b: unit_clamp(self.b),
        }
    }

    /// Clamp, premultiply RGB by alpha, and quantize to a packed pixel.
    pub fn to_pixel(self) -> Pixel {
        let c = self.clamped();
        let q = |x: f32| (x * 255.0 + 0.5) as u32;
        Pixel::pack_argb(q(c.a), q(c.r * c.a), q(c.g * c.a), q(c.b * c.a))
    }
}

/// Above this effective alpha, quantization rounds to a fully opaque pixel.
pub(crate) const OPAQUE_ALPHA: f32 = 254.5 / 255.0;

/// Below this effective alpha, quantization rounds to fully transparent.
pub(crate) const TRANSPARENT_ALPHA: f32 = 0.499_999 / 255.0;

/// A color plus a global alpha multiplier applied at use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    color: Color,
    alpha: f32,
}

impl Paint {
    /// Paint with the given color and full alpha.
    pub fn new(color: Color) -> Self {
        Self { color, alpha: 1.0 }
    }

    /// Return this paint with a different global alpha multiplier.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// The paint color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// The global alpha multiplier.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Color alpha scaled by the global multiplier, clamped to unit range.
    pub(crate) fn effective_alpha(&self) -> f32 {
        unit_clamp(self.color.a) * unit_clamp(self.alpha)
    }

    /// The paint color with the global multiplier folded into its alpha.
    pub(crate) fn effective_color(&self) -> Color {
        Color {
            a: self.effective_alpha(),
            ..self.color
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/pixel.rs"]
mod tests;
