// The tool palette graphic: five icons, one per slot, in `ToolKind::SLOTS` order.
// Loaded once at startup and never modified afterwards.

use std::path::Path;

use image::imageops::{self, FilterType};

use crate::draw::{draw_circle, draw_line, draw_rect, fill_circle};
use crate::error::Error;
use crate::tool::{PaletteGeometry, ToolKind};
use crate::types::{rgb, FrameBuffer, Point};

const BACKGROUND: u32 = 0x00_20_20_20;
const DIVIDER: u32 = 0x00_80_80_80;
const ICON: u32 = 0x00_F0_F0_F0;

/// Decode the palette image, resized to the geometry if it does not already match.
pub fn load(path: &Path, geometry: &PaletteGeometry) -> Result<FrameBuffer, Error> {
    let img = image::open(path)
        .map_err(|e| Error::Palette(format!("`{}`: {e}", path.display())))?
        .to_rgb8();

    let (w, h) = (geometry.width() as u32, geometry.height as u32);
    let img = if img.dimensions() != (w, h) {
        log::warn!(
            "palette `{}` is {}x{}, resizing to {w}x{h}",
            path.display(),
            img.width(),
            img.height()
        );
        imageops::resize(&img, w, h, FilterType::Triangle)
    } else {
        img
    };

    Ok(FrameBuffer {
        width: w as usize,
        height: h as usize,
        pixels: img.pixels().map(|p| rgb(p[0], p[1], p[2])).collect(),
    })
}

/// Draw a palette from scratch when no image is configured.
pub fn builtin(geometry: &PaletteGeometry) -> FrameBuffer {
    let (sw, h) = (geometry.slot_width, geometry.height);
    let mut fb = FrameBuffer::filled(geometry.width() as usize, h as usize, BACKGROUND);
    let pad = (sw.min(h) / 5).max(1);

    for (i, tool) in ToolKind::SLOTS.iter().enumerate() {
        let x0 = i as i32 * sw;
        if i > 0 {
            draw_line(&mut fb, Point::new(x0, 0), Point::new(x0, h - 1), 1, DIVIDER);
        }
        let tl = Point::new(x0 + pad, pad);
        let br = Point::new(x0 + sw - 1 - pad, h - 1 - pad);
        let center = Point::new(x0 + sw / 2, h / 2);
        match tool {
            ToolKind::Line => draw_line(&mut fb, Point::new(tl.x, br.y), Point::new(br.x, tl.y), 2, ICON),
            ToolKind::Rectangle => draw_rect(&mut fb, tl, br, 2, ICON),
            ToolKind::FreeDraw => {
                let mid = (br.x - tl.x) / 3;
                let pts = [
                    Point::new(tl.x, center.y),
                    Point::new(tl.x + mid, tl.y),
                    Point::new(tl.x + 2 * mid, br.y),
                    Point::new(br.x, center.y),
                ];
                for seg in pts.windows(2) {
                    draw_line(&mut fb, seg[0], seg[1], 2, ICON);
                }
            }
            ToolKind::Circle => draw_circle(&mut fb, center, (br.y - tl.y) / 2, 2, ICON),
            ToolKind::Eraser => fill_circle(&mut fb, center, (br.y - tl.y) / 2, ICON),
            ToolKind::SelectPending => {}
        }
    }
    fb
}
