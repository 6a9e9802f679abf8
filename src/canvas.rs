//! The drawing context: transform stack, draw operations, edge walker.
//!
//! A [`Canvas`] owns (or mutably borrows) a destination surface and a
//! current transform matrix with its cached inverse. Draw calls transform
//! logical geometry into device space, clip against the surface, and hand
//! horizontal spans to a blitter chosen per call. Everything runs to
//! completion on the calling thread; a canvas is not meant to be shared.

use smallvec::SmallVec;

use crate::foundation::error::RastelResult;
use crate::geom::{Point, Rect};
use crate::raster::blend::{BlendMode, src_over};
use crate::raster::blit::{
    BitmapBlitter, Blitter, ConstBlitter, OpaqueBitmapBlitter, OpaqueBlitter,
};
use crate::raster::pixel::{Color, OPAQUE_ALPHA, Paint, TRANSPARENT_ALPHA};
use crate::raster::surface::{Bitmap, BitmapMut, BitmapRef};
use crate::transform::linear::Matrix3;

/// Destination pixels, either allocated by the canvas or borrowed from the
/// caller for the canvas lifetime.
enum Target<'a> {
    Owned(Bitmap),
    Borrowed(BitmapMut<'a>),
}

impl Target<'_> {
    fn view(&self) -> BitmapRef<'_> {
        match self {
            Target::Owned(bm) => bm.as_ref(),
            Target::Borrowed(bm) => bm.as_ref(),
        }
    }

    fn view_mut(&mut self) -> BitmapMut<'_> {
        match self {
            Target::Owned(bm) => bm.as_mut(),
            Target::Borrowed(bm) => bm.reborrow(),
        }
    }
}

/// A 2D drawing context over a premultiplied ARGB surface.
pub struct Canvas<'a> {
    target: Target<'a>,
    ctm: Matrix3,
    /// Cached inverse of the CTM; `None` while the CTM is singular.
    inverse: Option<Matrix3>,
    stack: SmallVec<[Matrix3; 8]>,
}

impl Canvas<'static> {
    /// Create a canvas over a freshly allocated transparent surface.
    pub fn with_size(width: i32, height: i32) -> RastelResult<Self> {
        Ok(Self::from_target(Target::Owned(Bitmap::new(width, height)?)))
    }
}

impl<'a> Canvas<'a> {
    /// Create a canvas drawing into caller-owned pixels.
    ///
    /// Descriptor validation happens when the [`BitmapMut`] is built; the
    /// caller must not touch the pixels again until the canvas is dropped,
    /// which the borrow enforces.
    pub fn from_bitmap(target: BitmapMut<'a>) -> Self {
        Self::from_target(Target::Borrowed(target))
    }

    fn from_target(target: Target<'a>) -> Self {
        Self {
            target,
            ctm: Matrix3::IDENTITY,
            inverse: Some(Matrix3::IDENTITY),
            stack: SmallVec::new(),
        }
    }

    /// Destination width in pixels.
    pub fn width(&self) -> i32 {
        self.target.view().width()
    }

    /// Destination height in pixels.
    pub fn height(&self) -> i32 {
        self.target.view().height()
    }

    /// Read access to the destination surface.
    pub fn bitmap(&self) -> BitmapRef<'_> {
        self.target.view()
    }

    /// The current transform matrix.
    pub fn ctm(&self) -> Matrix3 {
        self.ctm
    }

    /// Fill the whole surface with `color` using `src` semantics.
    ///
    /// Ignores the CTM. Surfaces with tight rows are filled in one pass.
    pub fn clear(&mut self, color: Color) {
        self.target.view_mut().fill(color.to_pixel());
    }

    /// Push a copy of the CTM onto the save stack.
    pub fn save(&mut self) {
        self.stack.push(self.ctm);
    }

    /// Pop the save stack back into the CTM.
    ///
    /// # Panics
    ///
    /// Panics when there is no matching [`Canvas::save`].
    pub fn restore(&mut self) {
        match self.stack.pop() {
            Some(m) => self.set_ctm(m),
            None => panic!("restore without matching save"),
        }
    }

    /// Post-multiply the CTM by a translation.
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat(Matrix3::translation(tx, ty));
    }

    /// Post-multiply the CTM by a scale.
    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.concat(Matrix3::scaling(sx, sy));
    }

    /// Post-multiply the CTM by a rotation of `radians`.
    pub fn rotate(&mut self, radians: f32) {
        self.concat(Matrix3::rotation(radians));
    }

    fn concat(&mut self, m: Matrix3) {
        self.set_ctm(self.ctm * m);
    }

    fn set_ctm(&mut self, m: Matrix3) {
        self.ctm = m;
        self.inverse = m.inverse();
    }

    /// Fill `rect` (logical coordinates) with `paint`.
    pub fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        let alpha = paint.effective_alpha();
        if alpha <= TRANSPARENT_ALPHA {
            return;
        }
        let pixel = paint.effective_color().to_pixel();
        let ctm = self.ctm;
        let mut dst = self.target.view_mut();
        if alpha > OPAQUE_ALPHA {
            draw_rect_with(&mut dst, ctm, rect, &OpaqueBlitter::new(pixel));
        } else {
            let blitter = ConstBlitter::new(pixel, BlendMode::SrcOver);
            draw_rect_with(&mut dst, ctm, rect, &blitter);
        }
    }

    /// Composite `src` with its top-left corner at logical `(x, y)`.
    ///
    /// Skipped entirely while the CTM is singular: the draw needs the
    /// inverse mapping and there is nothing sensible to produce.
    pub fn draw_bitmap(&mut self, src: BitmapRef<'_>, x: f32, y: f32, paint: &Paint) {
        let alpha = paint.effective_alpha();
        if alpha <= TRANSPARENT_ALPHA {
            return;
        }

        self.save();
        self.translate(x, y);
        if let Some(inverse) = self.inverse {
            let ctm = self.ctm;
            let mut dst = self.target.view_mut();
            if ctm.has_skew() {
                let src_rect = Rect::from_wh(src.width() as f32, src.height() as f32);
                let device = transform_rect_bounds(&ctm, src_rect);
                if alpha > OPAQUE_ALPHA {
                    fill_device_rect(&mut dst, device, &OpaqueBitmapBlitter::new(inverse, src));
                } else {
                    fill_device_rect(&mut dst, device, &BitmapBlitter::new(inverse, src, alpha));
                }
            } else {
                blit_bitmap_axis_aligned(&mut dst, &ctm, &inverse, src, alpha);
            }
        }
        self.restore();
    }

    /// Fill the triangle spanned by `vertices` (logical coordinates).
    pub fn draw_triangle(&mut self, vertices: [Point; 3], paint: &Paint) {
        let alpha = paint.effective_alpha();
        if alpha <= TRANSPARENT_ALPHA {
            return;
        }
        let pixel = paint.effective_color().to_pixel();
        let ctm = self.ctm;
        let mut dst = self.target.view_mut();
        if alpha > OPAQUE_ALPHA {
            raster_triangle(&mut dst, ctm, vertices, &OpaqueBlitter::new(pixel));
        } else {
            let blitter = ConstBlitter::new(pixel, BlendMode::SrcOver);
            raster_triangle(&mut dst, ctm, vertices, &blitter);
        }
    }
}

/// Device-space bounding box of a rect's transformed corner quad.
fn transform_rect_bounds(ctm: &Matrix3, rect: Rect) -> Rect {
    let quad = rect.to_quad().map(|p| ctm.transform_point(p));
    let mut out = Rect::from_ltrb(quad[0].x, quad[0].y, quad[0].x, quad[0].y);
    for p in &quad[1..] {
        out.left = out.left.min(p.x);
        out.top = out.top.min(p.y);
        out.right = out.right.max(p.x);
        out.bottom = out.bottom.max(p.y);
    }
    out
}

/// Clip a device-space rect to the surface, round, and blit row spans.
fn fill_device_rect<B: Blitter>(dst: &mut BitmapMut<'_>, device: Rect, blitter: &B) {
    let bounds = Rect::from(dst.bounds());
    let Some(clipped) = Rect::intersect(bounds, device) else {
        return;
    };
    let r = clipped.round();
    if r.is_empty() {
        return;
    }
    for y in r.top..r.bottom {
        blitter.blit_row(dst, r.left, r.right, y);
    }
}

/// Rect path dispatch: forward-mapped fill when the CTM has no skew,
/// otherwise two edge-walked triangles.
fn draw_rect_with<B: Blitter>(dst: &mut BitmapMut<'_>, ctm: Matrix3, rect: Rect, blitter: &B) {
    if !ctm.has_skew() {
        let device = transform_rect_bounds(&ctm, rect);
        fill_device_rect(dst, device, blitter);
        return;
    }
    // Skewed CTM: split into two triangles sharing the TL-BR diagonal and
    // let the edge walker handle the general quad.
    let [tl, tr, br, bl] = rect.to_quad();
    raster_triangle(dst, ctm, [tl, tr, br], blitter);
    raster_triangle(dst, ctm, [tl, br, bl], blitter);
}

/// Slope/intercept of the line through `a` and `b`, or `None` when the
/// line is vertical.
fn edge_line(a: Point, b: Point) -> Option<(f32, f32)> {
    let dx = b.x - a.x;
    if dx == 0.0 {
        return None;
    }
    let m = (b.y - a.y) / dx;
    Some((m, a.y - m * a.x))
}

/// Walk two edges that share top and bottom scanlines and emit the span
/// between them on every row.
///
/// `e1` and `e2` are (upper, lower) point pairs. Spans are half-open in x
/// and rows are top-inclusive/bottom-exclusive, so triangles sharing an
/// edge cover each interior pixel exactly once.
fn walk_edges<B: Blitter>(
    dst: &mut BitmapMut<'_>,
    e1: (Point, Point),
    e2: (Point, Point),
    blitter: &B,
) {
    let w = dst.width();
    let h = dst.height();

    debug_assert!(e1.0.y == e2.0.y && e1.1.y == e2.1.y);
    let start_y = ((e1.0.y + 0.5) as i32).clamp(0, h);
    let end_y = ((e1.1.y + 0.5) as i32).clamp(0, h);
    if start_y == end_y {
        return;
    }

    let line1 = edge_line(e1.0, e1.1);
    let line2 = edge_line(e2.0, e2.1);

    // A horizontal sub-edge cannot bound rows; this also drops degenerate
    // slivers whose clamped rows would be empty anyway.
    if matches!(line1, Some((m, _)) if m == 0.0) || matches!(line2, Some((m, _)) if m == 0.0) {
        return;
    }

    // Identical edges enclose no area.
    match (line1, line2) {
        (None, None) if e1.0.x == e2.0.x => return,
        (Some(l1), Some(l2)) if l1 == l2 => return,
        _ => {}
    }

    let step1 = line1.map_or(0.0, |(m, _)| 1.0 / m);
    let step2 = line2.map_or(0.0, |(m, _)| 1.0 / m);

    // X positions where each edge crosses the first row's center.
    let sy = start_y as f32 + 0.5;
    let x_at = |edge: (Point, Point), line: Option<(f32, f32)>| match line {
        None => edge.0.x,
        Some((m, b)) => (sy - b) / m,
    };
    let x1 = x_at(e1, line1);
    let x2 = x_at(e2, line2);

    // Keep edge 1 on the left so the row loop needs no min/max.
    let (mut x1, mut x2, step1, step2) = if x1 > x2 {
        (x2, x1, step2, step1)
    } else {
        (x1, x2, step1, step2)
    };

    // Absorb the round-to-span +0.5 into the running positions.
    x1 += 0.5;
    x2 += 0.5;
    for y in start_y..end_y {
        let sx = (x1 as i32).clamp(0, w);
        let ex = (x2 as i32).clamp(0, w);
        if sx < ex {
            blitter.blit_row(dst, sx, ex, y);
        }
        x1 += step1;
        x2 += step2;
    }
}

/// Edge-walking triangle rasterizer over device-space vertices.
fn raster_triangle<B: Blitter>(
    dst: &mut BitmapMut<'_>,
    ctm: Matrix3,
    vertices: [Point; 3],
    blitter: &B,
) {
    let mut pts = vertices.map(|p| ctm.transform_point(p));
    for i in 0..3 {
        for j in (i + 1)..3 {
            if pts[i].y > pts[j].y {
                pts.swap(i, j);
            }
        }
    }

    // The long edge runs from the top vertex to the bottom one. With the
    // points sorted by y, a horizontal long edge means all three are
    // collinear on one scanline.
    let long = edge_line(pts[0], pts[2]);
    if matches!(long, Some((m, _)) if m == 0.0) {
        return;
    }

    // Split the triangle at the middle vertex's scanline.
    let split_x = match long {
        None => pts[0].x,
        Some((m, b)) => (pts[1].y - b) / m,
    };
    let split = Point::new(split_x, pts[1].y);

    walk_edges(dst, (pts[0], pts[1]), (pts[0], split), blitter);
    walk_edges(dst, (pts[1], pts[2]), (split, pts[2]), blitter);
}

/// Bitmap draw for skew-free CTMs.
///
/// Source coordinates decouple per axis, so each destination row maps to a
/// single source row and x advances by a constant source step. Containment
/// stays the per-pixel-center half-open test the general path uses.
fn blit_bitmap_axis_aligned(
    dst: &mut BitmapMut<'_>,
    ctm: &Matrix3,
    inverse: &Matrix3,
    src: BitmapRef<'_>,
    alpha: f32,
) {
    let src_w = src.width() as f32;
    let src_h = src.height() as f32;
    let device = transform_rect_bounds(ctm, Rect::from_wh(src_w, src_h));
    let bounds = Rect::from(dst.bounds());
    let Some(clipped) = Rect::intersect(bounds, device) else {
        return;
    };
    let r = clipped.round();
    if r.is_empty() {
        return;
    }

    let step_u = inverse.at(0, 0);
    let step_v = inverse.at(1, 1);
    let u0 = step_u * (r.left as f32 + 0.5) + inverse.at(0, 2);

    if alpha > OPAQUE_ALPHA {
        for y in r.top..r.bottom {
            let v = step_v * (y as f32 + 0.5) + inverse.at(1, 2);
            if !(0.0 <= v && v < src_h) {
                continue;
            }
            let src_row = src.row(v as i32);
            let dst_row = dst.row_mut(y);
            let mut u = u0;
            for x in r.left..r.right {
                if 0.0 <= u && u < src_w {
                    let slot = &mut dst_row[x as usize];
                    *slot = src_over(*slot, src_row[u as usize]);
                }
                u += step_u;
            }
        }
    } else {
        let alpha_byte = (alpha * 255.0 + 0.5) as u32;
        for y in r.top..r.bottom {
            let v = step_v * (y as f32 + 0.5) + inverse.at(1, 2);
            if !(0.0 <= v && v < src_h) {
                continue;
            }
            let src_row = src.row(v as i32);
            let dst_row = dst.row_mut(y);
            let mut u = u0;
            for x in r.left..r.right {
                if 0.0 <= u && u < src_w {
                    let sample = src_row[u as usize].scale(alpha_byte);
                    let slot = &mut dst_row[x as usize];
                    *slot = src_over(*slot, sample);
                }
                u += step_u;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/canvas.rs"]
mod tests;
