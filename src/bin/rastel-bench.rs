//! Micro-benchmark for the rastel drawing core.
//!
//! Draws frames of random rects, triangles, and bitmap stamps under random
//! transforms and reports wall time per pass. Not part of the library.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rastel::{Bitmap, BitmapRef, Canvas, Color, Paint, Point, Random, Rect};

#[derive(Clone, Debug)]
struct BenchArgs {
    width: i32,
    height: i32,
    frames: u32,
    ops_per_frame: u32,
    seed: u32,
    out: Option<PathBuf>,
}

impl Default for BenchArgs {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            frames: 120,
            ops_per_frame: 64,
            seed: 1,
            out: None,
        }
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;
    if args.width <= 0 || args.height <= 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.frames == 0 || args.ops_per_frame == 0 {
        anyhow::bail!("--frames/--ops must be > 0");
    }

    let stamp = checker_stamp(32)?;
    let mut canvas = Canvas::with_size(args.width, args.height)?;
    let mut rng = Random::new(args.seed);

    let mut rects = Duration::ZERO;
    let mut triangles = Duration::ZERO;
    let mut bitmaps = Duration::ZERO;

    for _ in 0..args.frames {
        canvas.clear(Color::new(1.0, 0.1, 0.1, 0.1));

        let t = Instant::now();
        for _ in 0..args.ops_per_frame {
            draw_random_rect(&mut canvas, &mut rng);
        }
        rects += t.elapsed();

        let t = Instant::now();
        for _ in 0..args.ops_per_frame {
            draw_random_triangle(&mut canvas, &mut rng);
        }
        triangles += t.elapsed();

        let t = Instant::now();
        for _ in 0..args.ops_per_frame {
            draw_random_stamp(&mut canvas, &mut rng, stamp.as_ref());
        }
        bitmaps += t.elapsed();
    }

    let total_ops = u64::from(args.frames) * u64::from(args.ops_per_frame);
    report("rects", rects, total_ops);
    report("triangles", triangles, total_ops);
    report("bitmaps", bitmaps, total_ops);

    if let Some(path) = &args.out {
        let png = rastel::encode_png(canvas.bitmap())?;
        std::fs::write(path, png)?;
        eprintln!("wrote {}", path.display());
    }

    Ok(())
}

fn report(label: &str, elapsed: Duration, ops: u64) {
    let per_op = elapsed.as_secs_f64() / ops as f64;
    println!("{label:>10}: {elapsed:>10.2?} total, {:.2} us/op", per_op * 1e6);
}

fn random_color(rng: &mut Random) -> Color {
    Color::new(
        rng.next_f32(),
        rng.next_f32(),
        rng.next_f32(),
        rng.next_f32(),
    )
}

fn draw_random_rect(canvas: &mut Canvas<'_>, rng: &mut Random) {
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    let rect = Rect::from_xywh(
        rng.next_f32() * w,
        rng.next_f32() * h,
        rng.next_f32() * w * 0.5,
        rng.next_f32() * h * 0.5,
    );
    canvas.save();
    canvas.rotate(rng.next_signed_f32() * 0.5);
    canvas.draw_rect(rect, &Paint::new(random_color(rng)));
    canvas.restore();
}

fn draw_random_triangle(canvas: &mut Canvas<'_>, rng: &mut Random) {
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    let vertex = |rng: &mut Random| Point::new(rng.next_f32() * w, rng.next_f32() * h);
    let vertices = [vertex(rng), vertex(rng), vertex(rng)];
    canvas.draw_triangle(vertices, &Paint::new(random_color(rng)));
}

fn draw_random_stamp(canvas: &mut Canvas<'_>, rng: &mut Random, stamp: BitmapRef<'_>) {
    let w = canvas.width() as f32;
    let h = canvas.height() as f32;
    canvas.save();
    canvas.scale(0.5 + rng.next_f32() * 2.0, 0.5 + rng.next_f32() * 2.0);
    canvas.rotate(rng.next_signed_f32() * std::f32::consts::PI);
    canvas.draw_bitmap(
        stamp,
        rng.next_f32() * w,
        rng.next_f32() * h,
        &Paint::new(Color::new(1.0, 1.0, 1.0, 1.0)).with_alpha(0.25 + rng.next_f32() * 0.75),
    );
    canvas.restore();
}

fn checker_stamp(size: i32) -> anyhow::Result<Bitmap> {
    let mut bm = Bitmap::new(size, size)?;
    let mut canvas = Canvas::from_bitmap(bm.as_mut());
    canvas.clear(Color::new(1.0, 0.9, 0.9, 0.9));
    let paint = Paint::new(Color::new(1.0, 0.2, 0.3, 0.8));
    for y in 0..size / 8 {
        for x in 0..size / 8 {
            if (x + y) % 2 == 0 {
                let rect = Rect::from_xywh((x * 8) as f32, (y * 8) as f32, 8.0, 8.0);
                canvas.draw_rect(rect, &paint);
            }
        }
    }
    drop(canvas);
    Ok(bm)
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = BenchArgs::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let mut value = |name: &str| {
            it.next()
                .ok_or_else(|| anyhow::anyhow!("{name} requires a value"))
        };
        match flag.as_str() {
            "--width" => args.width = value("--width")?.parse()?,
            "--height" => args.height = value("--height")?.parse()?,
            "--frames" => args.frames = value("--frames")?.parse()?,
            "--ops" => args.ops_per_frame = value("--ops")?.parse()?,
            "--seed" => args.seed = value("--seed")?.parse()?,
            "--out" => args.out = Some(PathBuf::from(value("--out")?)),
            "--help" | "-h" => {
                eprintln!(
                    "usage: rastel-bench [--width N] [--height N] [--frames N] [--ops N] [--seed N] [--out frame.png]"
                );
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown flag '{other}'"),
        }
    }
    Ok(args)
}
