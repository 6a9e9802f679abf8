//! Row blitters: the inner loops behind every draw path.
//!
//! The geometry layer (rect filler, edge walker) only ever produces
//! horizontal spans; a blitter turns one span into pixels. Geometry code is
//! generic over [`Blitter`], so each draw call monomorphizes its inner loop
//! and the blitter itself lives on the caller's stack for the duration of
//! the call.

use crate::geom::Rect;
use crate::raster::blend::{BlendMode, src_over};
use crate::raster::pixel::Pixel;
use crate::raster::surface::{BitmapMut, BitmapRef};
use crate::transform::linear::{Matrix3, Vec3};

/// Writes pixels for `x in [start_x, end_x)` of destination row `y`.
///
/// Callers must clamp the span and `y` to the destination bounds first.
pub(crate) trait Blitter {
    /// Blit one horizontal span.
    fn blit_row(&self, dst: &mut BitmapMut<'_>, start_x: i32, end_x: i32, y: i32);
}

/// Constant-color span with an explicit blend mode.
pub(crate) struct ConstBlitter {
    pixel: Pixel,
    mode: BlendMode,
}

impl ConstBlitter {
    pub(crate) fn new(pixel: Pixel, mode: BlendMode) -> Self {
        Self { pixel, mode }
    }
}

impl Blitter for ConstBlitter {
    fn blit_row(&self, dst: &mut BitmapMut<'_>, start_x: i32, end_x: i32, y: i32) {
        debug_assert!(start_x <= end_x && end_x <= dst.width());
        let span = &mut dst.row_mut(y)[start_x as usize..end_x as usize];
        match self.mode {
            BlendMode::Src => span.fill(self.pixel),
            BlendMode::SrcOver => {
                for px in span {
                    *px = src_over(*px, self.pixel);
                }
            }
        }
    }
}

/// Constant-color span specialized for opaque fills: plain stores.
pub(crate) struct OpaqueBlitter {
    pixel: Pixel,
}

impl OpaqueBlitter {
    pub(crate) fn new(pixel: Pixel) -> Self {
        Self { pixel }
    }
}

impl Blitter for OpaqueBlitter {
    fn blit_row(&self, dst: &mut BitmapMut<'_>, start_x: i32, end_x: i32, y: i32) {
        debug_assert!(start_x <= end_x && end_x <= dst.width());
        dst.row_mut(y)[start_x as usize..end_x as usize].fill(self.pixel);
    }
}

/// Map a destination pixel center through the inverse CTM into source
/// space. The inverse of an affine matrix is affine, so no `w` divide.
fn source_point(inverse: &Matrix3, x: i32, y: i32) -> (f32, f32) {
    let v = *inverse * Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 1.0);
    (v.x, v.y)
}

/// Narrow `[start_x, end_x)` to the sub-span whose mapped centers fall
/// inside `src_bounds`.
///
/// Both source coordinates are linear in `x`, so the contained set is an
/// interval; scanning the same containment predicate inward from both ends
/// finds exactly that interval, and the inner loops can skip per-pixel
/// bounds checks.
fn narrow_to_source(
    inverse: &Matrix3,
    src_bounds: Rect,
    start_x: i32,
    end_x: i32,
    y: i32,
) -> (i32, i32) {
    let mut sx = start_x;
    let mut ex = end_x;

    let mut contained = false;
    while sx < ex && !contained {
        let (u, v) = source_point(inverse, sx, y);
        contained = src_bounds.contains(u, v);
        sx += 1;
    }
    if contained {
        sx -= 1;
    }

    contained = false;
    while sx < ex && !contained {
        let (u, v) = source_point(inverse, ex - 1, y);
        contained = src_bounds.contains(u, v);
        ex -= 1;
    }
    if contained {
        ex += 1;
    }

    (sx, ex)
}

/// Transformed-bitmap span with a per-channel alpha scale.
pub(crate) struct BitmapBlitter<'a> {
    inverse: Matrix3,
    src: BitmapRef<'a>,
    alpha: u32,
}

impl<'a> BitmapBlitter<'a> {
    pub(crate) fn new(inverse: Matrix3, src: BitmapRef<'a>, alpha: f32) -> Self {
        Self {
            inverse,
            src,
            alpha: (alpha * 255.0 + 0.5) as u32,
        }
    }
}

impl Blitter for BitmapBlitter<'_> {
    fn blit_row(&self, dst: &mut BitmapMut<'_>, start_x: i32, end_x: i32, y: i32) {
        let src_bounds = Rect::from(self.src.bounds());
        let (sx, ex) = narrow_to_source(&self.inverse, src_bounds, start_x, end_x, y);

        let row = dst.row_mut(y);
        for x in sx..ex {
            let (u, v) = source_point(&self.inverse, x, y);
            let sample = self.src.pixel(u as i32, v as i32).scale(self.alpha);
            let slot = &mut row[x as usize];
            *slot = src_over(*slot, sample);
        }
    }
}

/// Transformed-bitmap span without the alpha scale.
pub(crate) struct OpaqueBitmapBlitter<'a> {
    inverse: Matrix3,
    src: BitmapRef<'a>,
}

impl<'a> OpaqueBitmapBlitter<'a> {
    pub(crate) fn new(inverse: Matrix3, src: BitmapRef<'a>) -> Self {
        Self { inverse, src }
    }
}

impl Blitter for OpaqueBitmapBlitter<'_> {
    fn blit_row(&self, dst: &mut BitmapMut<'_>, start_x: i32, end_x: i32, y: i32) {
        let src_bounds = Rect::from(self.src.bounds());
        let (sx, ex) = narrow_to_source(&self.inverse, src_bounds, start_x, end_x, y);

        let row = dst.row_mut(y);
        for x in sx..ex {
            let (u, v) = source_point(&self.inverse, x, y);
            let sample = self.src.pixel(u as i32, v as i32);
            let slot = &mut row[x as usize];
            *slot = src_over(*slot, sample);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blit.rs"]
mod tests;
