use super::*;

use crate::raster::pixel::Pixel;

fn opaque(r: f32, g: f32, b: f32) -> Paint {
    Paint::new(Color::new(1.0, r, g, b))
}

#[test]
fn save_restore_roundtrips_ctm_exactly() {
    let mut canvas = Canvas::with_size(4, 4).unwrap();
    canvas.translate(1.5, 2.5);
    let before = canvas.ctm();
    canvas.save();
    canvas.rotate(0.37);
    canvas.scale(3.0, -2.0);
    canvas.translate(-8.0, 4.0);
    canvas.restore();
    assert_eq!(canvas.ctm(), before);
}

#[test]
#[should_panic(expected = "restore without matching save")]
fn restore_without_save_panics() {
    let mut canvas = Canvas::with_size(2, 2).unwrap();
    canvas.restore();
}

#[test]
fn clear_ignores_ctm() {
    let mut canvas = Canvas::with_size(3, 3).unwrap();
    canvas.translate(50.0, 50.0);
    canvas.clear(Color::new(1.0, 0.0, 1.0, 0.0));
    let green = Pixel::pack_argb(255, 0, 255, 0);
    for y in 0..3 {
        for x in 0..3 {
            assert_eq!(canvas.bitmap().pixel(x, y), green);
        }
    }
}

#[test]
fn identity_rect_fills_exact_rounded_intersection() {
    let mut canvas = Canvas::with_size(8, 8).unwrap();
    canvas.clear(Color::new(1.0, 0.0, 0.0, 0.0));
    canvas.draw_rect(Rect::from_ltrb(2.0, 2.0, 6.0, 6.0), &opaque(1.0, 0.0, 0.0));
    let red = Pixel::pack_argb(255, 255, 0, 0);
    let black = Pixel::pack_argb(255, 0, 0, 0);
    for y in 0..8 {
        for x in 0..8 {
            let inside = (2..6).contains(&x) && (2..6).contains(&y);
            let expect = if inside { red } else { black };
            assert_eq!(canvas.bitmap().pixel(x, y), expect, "({x}, {y})");
        }
    }
}

#[test]
fn transparent_paint_leaves_surface_unchanged() {
    let mut canvas = Canvas::with_size(4, 4).unwrap();
    canvas.clear(Color::new(1.0, 0.3, 0.6, 0.9));
    let before: Vec<Pixel> = (0..4).flat_map(|y| canvas.bitmap().row(y).to_vec()).collect();

    let ghost = Paint::new(Color::new(1.0, 1.0, 1.0, 1.0)).with_alpha(0.0001);
    canvas.draw_rect(Rect::from_wh(4.0, 4.0), &ghost);
    canvas.draw_triangle(
        [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        ],
        &ghost,
    );
    let stamp = Bitmap::new(2, 2).unwrap();
    canvas.draw_bitmap(stamp.as_ref(), 0.0, 0.0, &ghost);

    let after: Vec<Pixel> = (0..4).flat_map(|y| canvas.bitmap().row(y).to_vec()).collect();
    assert_eq!(before, after);
}

#[test]
fn skewed_rect_blends_each_covered_pixel_once() {
    let mut canvas = Canvas::with_size(16, 16).unwrap();
    canvas.clear(Color::new(1.0, 0.0, 0.0, 0.0));
    canvas.translate(8.0, 2.0);
    canvas.rotate(std::f32::consts::FRAC_PI_4);
    let half = Paint::new(Color::new(0.5, 1.0, 1.0, 1.0));
    canvas.draw_rect(Rect::from_wh(8.0, 8.0), &half);

    // Every covered pixel must be the single-blend value; a double blend
    // along the shared diagonal would read brighter.
    let background = Pixel::pack_argb(255, 0, 0, 0);
    let blended_once = Pixel::pack_argb(255, 128, 128, 128);
    let mut covered = 0;
    for y in 0..16 {
        for x in 0..16 {
            let px = canvas.bitmap().pixel(x, y);
            assert!(
                px == background || px == blended_once,
                "({x}, {y}) = {:08X}",
                px.to_bits()
            );
            if px == blended_once {
                covered += 1;
            }
        }
    }
    assert!(covered > 0);
}

#[test]
fn singular_ctm_skips_bitmap_draw() {
    let mut canvas = Canvas::with_size(4, 4).unwrap();
    canvas.clear(Color::new(1.0, 0.0, 0.0, 0.0));
    let before: Vec<Pixel> = (0..4).flat_map(|y| canvas.bitmap().row(y).to_vec()).collect();

    let mut stamp = Bitmap::new(2, 2).unwrap();
    stamp.as_mut().fill(Pixel::pack_argb(255, 255, 255, 255));
    canvas.scale(0.0, 2.0);
    canvas.draw_bitmap(stamp.as_ref(), 0.0, 0.0, &opaque(1.0, 1.0, 1.0));

    let after: Vec<Pixel> = (0..4).flat_map(|y| canvas.bitmap().row(y).to_vec()).collect();
    assert_eq!(before, after);
}

#[test]
fn singular_ctm_still_draws_nothing_for_degenerate_rect() {
    let mut canvas = Canvas::with_size(4, 4).unwrap();
    canvas.clear(Color::new(1.0, 0.0, 0.0, 0.0));
    canvas.scale(0.0, 1.0);
    // Forward-mapped: the rect collapses to a zero-width line and clips out.
    canvas.draw_rect(Rect::from_wh(4.0, 4.0), &opaque(1.0, 1.0, 1.0));
    let black = Pixel::pack_argb(255, 0, 0, 0);
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(canvas.bitmap().pixel(x, y), black);
        }
    }
}

#[test]
fn draw_bitmap_restores_ctm() {
    let mut canvas = Canvas::with_size(4, 4).unwrap();
    canvas.translate(1.0, 1.0);
    let before = canvas.ctm();
    let stamp = Bitmap::new(2, 2).unwrap();
    canvas.draw_bitmap(stamp.as_ref(), 2.0, 3.0, &opaque(1.0, 1.0, 1.0));
    assert_eq!(canvas.ctm(), before);
}

#[test]
fn axis_aligned_and_general_bitmap_paths_agree() {
    // A scale plus translation stays on the fast path; force the general
    // path with a full-turn rotation sandwich that keeps the same mapping
    // up to float noise, and compare against an integer-exact transform.
    let mut stamp = Bitmap::new(4, 4).unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let v = (x * 60 + y * 3) as u32;
            stamp.as_mut().row_mut(y)[x as usize] = Pixel::pack_argb(255, v, 255 - v, 128);
        }
    }

    // Fast path: scale(2) translate(1,1).
    let mut fast = Canvas::with_size(12, 12).unwrap();
    fast.clear(Color::new(1.0, 0.0, 0.0, 0.0));
    fast.scale(2.0, 2.0);
    fast.draw_bitmap(stamp.as_ref(), 1.0, 1.0, &opaque(1.0, 1.0, 1.0));

    // General path: a vanishing rotation keeps the same sampled pixels
    // (every source coordinate sits 0.25 from the nearest boundary, far
    // beyond the 1e-4 skew) but trips the skew check.
    let mut general = Canvas::with_size(12, 12).unwrap();
    general.clear(Color::new(1.0, 0.0, 0.0, 0.0));
    general.scale(2.0, 2.0);
    general.rotate(1e-4);
    general.draw_bitmap(stamp.as_ref(), 1.0, 1.0, &opaque(1.0, 1.0, 1.0));

    for y in 0..12 {
        for x in 0..12 {
            assert_eq!(
                fast.bitmap().pixel(x, y),
                general.bitmap().pixel(x, y),
                "({x}, {y})"
            );
        }
    }
}
