//! Barber shop launcher icon: a rounded card with pole stripes and scissors
//!
//! All geometry is derived from the icon size with integer division so every
//! density renders the same design. Boxes are inclusive on both ends and a
//! pixel is covered when its centre falls inside the shape.

use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, Rgba, RgbaImage,
};
use std::io::Write;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const POLE_RED: Rgba<u8> = Rgba([211, 47, 47, 255]);
pub const POLE_BLUE: Rgba<u8> = Rgba([25, 118, 210, 255]);

const POLE_COLORS: [Rgba<u8>; 3] = [POLE_RED, WHITE, POLE_BLUE];

/// Render the barber icon at `size`×`size` pixels
pub fn render_barber_icon(size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, WHITE);

    // Card
    let margin = size / 10;
    let far = size - margin;
    draw_rounded_rect(
        &mut img,
        (margin, margin),
        (far, far),
        size / 8,
        WHITE,
        BLACK,
        (size / 100).max(1),
    );

    // Pole stripes along the left edge of the card
    let stripe_width = size / 15;
    let stripe_x = margin + size / 20;
    for (i, &color) in POLE_COLORS.iter().enumerate() {
        let x = stripe_x + i as u32 * stripe_width;
        if x + stripe_width <= far {
            fill_rect(&mut img, (x, margin), (x + stripe_width, far), color);
        }
    }

    // Scissor handles either side of the centre
    let center = size / 2;
    let scissor = size / 6;
    fill_ellipse(
        &mut img,
        (center - scissor, center - scissor / 2),
        (center - scissor / 2, center + scissor / 2),
        BLACK,
    );
    fill_ellipse(
        &mut img,
        (center + scissor / 2, center - scissor / 2),
        (center + scissor, center + scissor / 2),
        BLACK,
    );

    img
}

/// Render the barber icon and encode it as an RGBA PNG
pub fn encode_barber_icon(size: u32) -> Result<Vec<u8>> {
    let img = render_barber_icon(size);
    let mut buf = Vec::new();
    write_png(img.as_raw(), &mut buf, size)
        .with_context(|| format!("Failed to encode {size}x{size} barber icon"))?;
    Ok(buf)
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, size, size, ColorType::Rgba8)?;
    Ok(())
}

fn fill_rect(img: &mut RgbaImage, top_left: (u32, u32), bottom_right: (u32, u32), color: Rgba<u8>) {
    let (img_w, img_h) = img.dimensions();
    if img_w == 0 || img_h == 0 {
        return;
    }

    for y in top_left.1..=bottom_right.1.min(img_h - 1) {
        for x in top_left.0..=bottom_right.0.min(img_w - 1) {
            img.put_pixel(x, y, color);
        }
    }
}

/// Rounded rectangle with an outline of `width` pixels drawn inside the bounds
fn draw_rounded_rect(
    img: &mut RgbaImage,
    top_left: (u32, u32),
    bottom_right: (u32, u32),
    radius: u32,
    fill: Rgba<u8>,
    outline: Rgba<u8>,
    width: u32,
) {
    let outer_min = (top_left.0 as f32, top_left.1 as f32);
    let outer_max = ((bottom_right.0 + 1) as f32, (bottom_right.1 + 1) as f32);
    let inset = width as f32;
    let inner_min = (outer_min.0 + inset, outer_min.1 + inset);
    let inner_max = (outer_max.0 - inset, outer_max.1 - inset);
    let inner_radius = (radius as f32 - inset).max(0.0);

    let (img_w, img_h) = img.dimensions();
    if img_w == 0 || img_h == 0 {
        return;
    }
    for y in top_left.1..=bottom_right.1.min(img_h - 1) {
        for x in top_left.0..=bottom_right.0.min(img_w - 1) {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if in_rounded_box(px, py, inner_min, inner_max, inner_radius) {
                img.put_pixel(x, y, fill);
            } else if in_rounded_box(px, py, outer_min, outer_max, radius as f32) {
                img.put_pixel(x, y, outline);
            }
        }
    }
}

fn in_rounded_box(px: f32, py: f32, min: (f32, f32), max: (f32, f32), radius: f32) -> bool {
    // Also rejects everything when the box has collapsed (max < min).
    if px < min.0 || px > max.0 || py < min.1 || py > max.1 {
        return false;
    }

    let radius = radius
        .min((max.0 - min.0) / 2.0)
        .min((max.1 - min.1) / 2.0)
        .max(0.0);
    let nearest_x = px.max(min.0 + radius).min(max.0 - radius);
    let nearest_y = py.max(min.1 + radius).min(max.1 - radius);
    let (dx, dy) = (px - nearest_x, py - nearest_y);

    dx * dx + dy * dy <= radius * radius
}

fn fill_ellipse(img: &mut RgbaImage, top_left: (u32, u32), bottom_right: (u32, u32), color: Rgba<u8>) {
    let (left, top) = (top_left.0 as f32, top_left.1 as f32);
    let (right, bottom) = ((bottom_right.0 + 1) as f32, (bottom_right.1 + 1) as f32);
    let (cx, cy) = ((left + right) / 2.0, (top + bottom) / 2.0);
    let (rx, ry) = ((right - left) / 2.0, (bottom - top) / 2.0);

    let (img_w, img_h) = img.dimensions();
    if img_w == 0 || img_h == 0 {
        return;
    }
    for y in top_left.1..=bottom_right.1.min(img_h - 1) {
        for x in top_left.0..=bottom_right.0.min(img_w - 1) {
            let nx = (x as f32 + 0.5 - cx) / rx;
            let ny = (y as f32 + 0.5 - cy) / ry;
            if nx * nx + ny * ny <= 1.0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}
