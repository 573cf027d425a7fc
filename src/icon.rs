//! Clock icon rasterization
//!
//! Draws a simple clock face (dark disc, two hands, red center pin) at
//! 256/64/32 px, encodes each size as PNG, and assembles a multi-entry ICO
//! container. Modern ICO readers accept PNG-compressed entries, which keeps
//! the container a plain header + directory + payloads.

use image::codecs::png::PngEncoder;
use image::{ColorType, Rgba, RgbaImage};
use std::path::Path;

use crate::error::{Result, TableroError};

/// Resolutions embedded in the icon, largest first
pub const SIZES: [u32; 3] = [256, 64, 32];

const FACE: Rgba<u8> = Rgba([30, 30, 30, 255]);
const HANDS: Rgba<u8> = Rgba([245, 245, 245, 255]);
const PIN: Rgba<u8> = Rgba([200, 30, 30, 255]);

/// Render one clock face on a transparent canvas
#[must_use]
pub fn render_clock(size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));

    let s = size as i64;
    let c = s / 2;
    let r = (s as f64 * 0.42) as i64;

    fill_disc(&mut img, c, c, s / 2, FACE);

    // minute hand: vertical, pointing up
    let minute_w = (s / 16).max(1);
    fill_rect(
        &mut img,
        c - minute_w / 2,
        c - (r as f64 * 0.8) as i64,
        c + (minute_w + 1) / 2,
        c,
        HANDS,
    );

    // hour hand: horizontal, pointing right
    let hour_w = (s / 12).max(1);
    fill_rect(
        &mut img,
        c,
        c - hour_w / 2,
        c + (r as f64 * 0.5) as i64,
        c + (hour_w + 1) / 2,
        HANDS,
    );

    fill_disc(&mut img, c, c, (s / 30).max(1), PIN);

    img
}

fn fill_disc(img: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    let r2 = radius * radius;
    for y in (cy - radius).max(0)..(cy + radius).min(h) {
        for x in (cx - radius).max(0)..(cx + radius).min(w) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

fn fill_rect(img: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    let (w, h) = (img.width() as i64, img.height() as i64);
    for y in y0.max(0)..y1.min(h) {
        for x in x0.max(0)..x1.min(w) {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Encode an RGBA frame as PNG bytes
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .encode(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
        .map_err(|e| TableroError::Icon(format!("PNG encoding failed: {e}")))?;
    Ok(buf)
}

/// Assemble a multi-image ICO container from PNG-encoded frames.
///
/// ICO layout: 6-byte header, one 16-byte directory entry per image,
/// then the image payloads back to back. Width/height bytes use 0 to
/// mean 256.
#[must_use]
pub fn encode_ico(frames: &[(u32, Vec<u8>)]) -> Vec<u8> {
    let count = frames.len() as u32;
    let dir_end = 6 + 16 * count;

    let mut ico = Vec::new();
    ico.extend_from_slice(&[0, 0]); // reserved
    ico.extend_from_slice(&[1, 0]); // type: ICO
    ico.extend_from_slice(&(count as u16).to_le_bytes());

    let mut offset = dir_end;
    for (size, png) in frames {
        let dim = if *size >= 256 { 0u8 } else { *size as u8 };
        ico.push(dim); // width
        ico.push(dim); // height
        ico.push(0); // no palette
        ico.push(0); // reserved
        ico.extend_from_slice(&[1, 0]); // color planes
        ico.extend_from_slice(&[32, 0]); // bits per pixel
        ico.extend_from_slice(&(png.len() as u32).to_le_bytes());
        ico.extend_from_slice(&offset.to_le_bytes());
        offset += png.len() as u32;
    }

    for (_, png) in frames {
        ico.extend_from_slice(png);
    }

    ico
}

/// Render all sizes and write the ICO file
pub fn write_clock_icon(path: &Path) -> Result<()> {
    let mut frames = Vec::with_capacity(SIZES.len());
    for size in SIZES {
        frames.push((size, encode_png(&render_clock(size))?));
    }
    std::fs::write(path, encode_ico(&frames))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4e, 0x47];

    #[test]
    fn test_render_clock_paints_face_and_pin() {
        let img = render_clock(32);
        // corners stay transparent, center is the red pin
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(*img.get_pixel(16, 16), PIN);
        // a point inside the disc but off the hands is face-colored
        assert_eq!(*img.get_pixel(8, 24), FACE);
    }

    #[test]
    fn test_render_clock_minute_hand_vertical() {
        let img = render_clock(64);
        // above center: minute hand
        assert_eq!(*img.get_pixel(32, 16), HANDS);
        // right of center: hour hand
        assert_eq!(*img.get_pixel(42, 32), HANDS);
    }

    #[test]
    fn test_ico_header_and_directory() {
        let frames = vec![
            (256u32, vec![1u8; 10]),
            (64u32, vec![2u8; 20]),
            (32u32, vec![3u8; 30]),
        ];
        let ico = encode_ico(&frames);

        assert_eq!(&ico[0..4], &[0, 0, 1, 0]);
        assert_eq!(u16::from_le_bytes([ico[4], ico[5]]), 3);

        // 256 is encoded as 0 in the directory
        assert_eq!(ico[6], 0);
        assert_eq!(ico[22], 64);
        assert_eq!(ico[38], 32);

        // first payload starts right after the directory
        let first_offset = u32::from_le_bytes([ico[18], ico[19], ico[20], ico[21]]);
        assert_eq!(first_offset, 6 + 16 * 3);
        assert_eq!(ico[first_offset as usize], 1);

        // offsets chain through the payload sizes
        let second_offset = u32::from_le_bytes([ico[34], ico[35], ico[36], ico[37]]);
        assert_eq!(second_offset, first_offset + 10);
        assert_eq!(ico.len(), (6 + 16 * 3 + 10 + 20 + 30) as usize);
    }

    #[test]
    fn test_write_clock_icon_produces_png_entries() {
        let path = std::env::temp_dir().join(format!(
            "tablero_icon_test_{}.ico",
            std::process::id()
        ));
        write_clock_icon(&path).unwrap();

        let data = std::fs::read(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(u16::from_le_bytes([data[4], data[5]]), SIZES.len() as u16);
        for i in 0..SIZES.len() {
            let entry = 6 + 16 * i;
            let offset =
                u32::from_le_bytes(data[entry + 12..entry + 16].try_into().unwrap()) as usize;
            assert_eq!(&data[offset..offset + 4], &PNG_MAGIC);
        }
    }
}
