//! PNG decode/encode for [`Bitmap`] surfaces.
//!
//! Files store straight-alpha RGBA; surfaces store premultiplied ARGB.
//! Decoding premultiplies with the same `(c*a + 127)/255` reduction used
//! everywhere else, encoding unpremultiplies with rounding.

use std::io::Cursor;

use anyhow::Context;

use crate::foundation::error::{RastelError, RastelResult};
use crate::raster::pixel::Pixel;
use crate::raster::surface::{Bitmap, BitmapRef};

/// Decode PNG bytes into an owned premultiplied surface.
#[tracing::instrument(skip(bytes))]
pub fn decode_png(bytes: &[u8]) -> RastelResult<Bitmap> {
    let dyn_img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .context("decode png from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(RastelError::codec("png has zero dimension"));
    }

    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            premultiply_rgba(r, g, b, a)
        })
        .collect();
    Bitmap::from_pixels(width as i32, height as i32, pixels)
}

/// Encode a surface as PNG bytes.
#[tracing::instrument(skip(bitmap))]
pub fn encode_png(bitmap: BitmapRef<'_>) -> RastelResult<Vec<u8>> {
    let width = bitmap.width() as u32;
    let height = bitmap.height() as u32;
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..bitmap.height() {
        for &px in bitmap.row(y) {
            let [r, g, b, a] = unpremultiply_pixel(px);
            rgba.extend_from_slice(&[r, g, b, a]);
        }
    }

    let img: image::RgbaImage = image::ImageBuffer::from_raw(width, height, rgba)
        .ok_or_else(|| RastelError::codec("surface dimensions do not match pixel data"))?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode png to memory")?;
    Ok(out.into_inner())
}

fn premultiply_rgba(r: u8, g: u8, b: u8, a: u8) -> Pixel {
    if a == 0 {
        return Pixel::TRANSPARENT;
    }
    let premul = |c: u8| (u32::from(c) * u32::from(a) + 127) / 255;
    Pixel::pack_argb(u32::from(a), premul(r), premul(g), premul(b))
}

fn unpremultiply_pixel(px: Pixel) -> [u8; 4] {
    let a = px.a();
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let straight = |c: u32| ((c * 255 + a / 2) / a).min(255) as u8;
    [straight(px.r()), straight(px.g()), straight(px.b()), a as u8]
}

#[cfg(test)]
#[path = "../../tests/unit/codec/png.rs"]
mod tests;
