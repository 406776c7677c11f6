//! Source-over compositing shared by the placement and bake layers.

use image::{Rgba, RgbaImage};

/// Composites a source image onto a destination image at the specified position.
///
/// Offsets may be negative; whatever falls outside `dest` is clipped.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (src_w, src_h) = (src.width() as i64, src.height() as i64);

    // Source rows and columns that land inside `dest`.
    let x0 = (-x).clamp(0, src_w);
    let x1 = (dest.width() as i64 - x).clamp(x0, src_w);
    let y0 = (-y).clamp(0, src_h);
    let y1 = (dest.height() as i64 - y).clamp(y0, src_h);

    for sy in y0..y1 {
        let dy = (y + sy) as u32;
        for sx in x0..x1 {
            let dx = (x + sx) as u32;
            let src_pixel = *src.get_pixel(sx as u32, sy as u32);
            let dst_pixel = *dest.get_pixel(dx, dy);
            dest.put_pixel(dx, dy, alpha_blend(src_pixel, dst_pixel));
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
