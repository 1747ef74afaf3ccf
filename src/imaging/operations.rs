//! Pixel operations behind the composition strategies.
//!
//! These functions combine the geometry in [`calculations`](super::calculations)
//! with pixel drawing. They take decoded pixels only; decoding is the
//! backend's job.
//!
//! ## Blending
//!
//! Overlap uses Porter-Duff "over" in 8-bit integer arithmetic with
//! round-to-nearest division by 255. An opaque backdrop stays exactly
//! opaque under any layer, a fully opaque layer replaces what is below it
//! exactly, and a fully transparent layer leaves it untouched.
//! (`imageops::overlay` goes through `f32` and truncates, which turns an
//! opaque backdrop under a translucent edge into alpha 254.)

use super::backend::Dimensions;
use super::calculations::{horizontal_layout, overlap_canvas};
use image::{Rgba, RgbaImage, imageops};

/// Stack layers at the origin, alpha-blending each one over the previous.
///
/// The canvas starts fully transparent and is sized by
/// [`overlap_canvas`]. Later layers end up on top.
pub fn stack_layers(layers: &[RgbaImage]) -> RgbaImage {
    let dims: Vec<Dimensions> = layers.iter().map(Dimensions::of).collect();
    let canvas_dims = overlap_canvas(&dims);
    let mut canvas = RgbaImage::new(canvas_dims.width, canvas_dims.height);
    for layer in layers {
        for (x, y, top) in layer.enumerate_pixels() {
            let below = canvas.get_pixel_mut(x, y);
            *below = blend_over(*below, *top);
        }
    }
    canvas
}

/// Composite `top` over `below` (straight, non-premultiplied alpha).
pub fn blend_over(below: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let ta = u32::from(top[3]);
    let ba = u32::from(below[3]);
    // Backdrop alpha scaled by the part of it the top layer lets through.
    let through = div255(ba * (255 - ta));
    let out_a = ta + through;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        // Premultiplied sum at scale 255, divided back by the output alpha.
        let premul = u32::from(top[c]) * ta + u32::from(below[c]) * through;
        out[c] = ((premul + out_a / 2) / out_a) as u8;
    }
    out[3] = out_a as u8;
    Rgba(out)
}

/// `x / 255`, rounded to nearest.
fn div255(x: u32) -> u32 {
    (x + 127) / 255
}

/// Place tiles left to right, copying pixels without blending.
///
/// Returns `None` if the combined width does not fit in `u32`. Columns
/// below a short tile stay transparent.
pub fn tile_horizontally(tiles: &[RgbaImage]) -> Option<RgbaImage> {
    let dims: Vec<Dimensions> = tiles.iter().map(Dimensions::of).collect();
    let layout = horizontal_layout(&dims)?;
    let mut canvas = RgbaImage::new(layout.canvas.width, layout.canvas.height);
    for (tile, &x) in tiles.iter().zip(&layout.offsets) {
        imageops::replace(&mut canvas, tile, i64::from(x), 0);
    }
    Some(canvas)
}
