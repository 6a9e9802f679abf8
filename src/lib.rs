//! Rastel is a CPU 2D raster drawing engine.
//!
//! A [`Canvas`] composites primitives into a pixel surface under an affine
//! transform stack with standard Porter-Duff compositing:
//!
//! - **Surfaces** are premultiplied 32-bit ARGB, either allocated by the
//!   canvas or borrowed from the caller ([`Bitmap`], [`BitmapMut`]).
//! - **Transforms** are a 3x3 affine CTM with `save`/`restore`,
//!   `translate`/`scale`/`rotate`, and a cached inverse.
//! - **Primitives** are `clear`, filled rects, affine-mapped bitmaps, and
//!   filled triangles rasterized by an edge walker.
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No antialiasing**: fill rules are half-open in x and y, so shapes
//!   sharing an edge cover each pixel exactly once.
//! - **Single-threaded**: a canvas runs draw calls to completion in call
//!   order and is not meant to be shared across threads.
//! - **Silent clipping**: out-of-bounds and degenerate geometry draw
//!   nothing; only construction and the PNG codec return errors.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod canvas;
mod codec;
mod foundation;
mod geom;
mod raster;
mod transform;

pub use canvas::Canvas;
pub use codec::png::{decode_png, encode_png};
pub use foundation::error::{RastelError, RastelResult};
pub use foundation::random::Random;
pub use geom::{IRect, Point, Rect};
pub use raster::pixel::{Color, Paint, Pixel};
pub use raster::surface::{Bitmap, BitmapMut, BitmapRef};
pub use transform::linear::{Matrix3, Vec2, Vec3};
