//! Porter-Duff blends over premultiplied pixels.

use crate::foundation::math::mul_div255_u8;
use crate::raster::pixel::Pixel;

/// The closed set of blend modes. A blitter picks one at construction so
/// the row loops stay specialized per mode: `Src` spans are plain stores,
/// `SrcOver` spans composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlendMode {
    /// Overwrite the destination.
    Src,
    /// Standard compositing: source plus destination scaled by the
    /// source's remaining coverage.
    SrcOver,
}

/// `src-over` blend on premultiplied pixels.
///
/// Opaque sources short-circuit to a copy; otherwise every channel,
/// alpha included, is `src.c + (dst.c * (255 - src.a) + 127) / 255`.
pub(crate) fn src_over(dst: Pixel, src: Pixel) -> Pixel {
    let src_a = src.a();
    if src_a == 255 {
        return src;
    }
    let inv = (255 - src_a) as u16;
    Pixel::pack_argb(
        src.a() + u32::from(mul_div255_u8(dst.a() as u16, inv)),
        src.r() + u32::from(mul_div255_u8(dst.r() as u16, inv)),
        src.g() + u32::from(mul_div255_u8(dst.g() as u16, inv)),
        src.b() + u32::from(mul_div255_u8(dst.b() as u16, inv)),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
