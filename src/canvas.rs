// The persistent ink layer and the per-frame compositor.
// Ink lives in a one-byte-per-pixel stencil that survives across frames; every frame the
// stencil is pressed onto the fresh camera image, then the palette and tool label go on top.

use crate::draw::{draw_text_5x7_scaled, Plot};
use crate::tool::{PaletteGeometry, ToolKind};
use crate::types::{channels, rgb, FrameBuffer, Point};

pub const UNTOUCHED: u8 = 255;
pub const TOUCHED: u8 = 0;

/// Label color (red) and its scale.
const LABEL_COLOR: u32 = 0x00_FF_00_00;
const LABEL_SCALE: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    cells: Vec<u8>,
}

impl Canvas {
    /// A blank canvas; only done once, at startup.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![UNTOUCHED; width * height] }
    }

    #[cfg(test)]
    pub fn is_touched(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x] != UNTOUCHED
    }

    #[cfg(test)]
    pub fn touched_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != UNTOUCHED).count()
    }
}

impl Plot for Canvas {
    type Pixel = u8;

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set(&mut self, idx: usize, value: u8) {
        self.cells[idx] = value;
    }
}

/// Zero red and green wherever the canvas carries ink, leaving blue; ink reads as dark.
pub fn composite_ink(frame: &mut FrameBuffer, canvas: &Canvas) {
    debug_assert_eq!((frame.width, frame.height), (canvas.width, canvas.height));
    for (px, &cell) in frame.pixels.iter_mut().zip(&canvas.cells) {
        if cell != UNTOUCHED {
            *px &= 0x00_00_00_FF;
        }
    }
}

/// Blend `palette` into the frame's top strip at `alpha` (palette weight), clipped to the frame.
pub fn blend_palette(frame: &mut FrameBuffer, palette: &FrameBuffer, geometry: &PaletteGeometry, alpha: f32) {
    let x0 = geometry.margin_left.max(0) as usize;
    let skip = (x0 as i32 - geometry.margin_left) as usize;
    if x0 >= frame.width || skip >= palette.width {
        return;
    }
    let w = (palette.width - skip).min(frame.width - x0);
    let h = palette.height.min(frame.height);
    let beta = 1.0 - alpha;

    let mix = |a: u8, b: u8| -> u8 { (a as f32 * alpha + b as f32 * beta).round().clamp(0.0, 255.0) as u8 };

    for y in 0..h {
        let src = &palette.pixels[y * palette.width + skip..][..w];
        let dst = &mut frame.pixels[y * frame.width + x0..][..w];
        for (d, &s) in dst.iter_mut().zip(src) {
            let (pr, pg, pb) = channels(s);
            let (fr, fg, fb) = channels(*d);
            *d = rgb(mix(pr, fr), mix(pg, fg), mix(pb, fb));
        }
    }
}

/// Current tool's name, to the right of the palette.
pub fn draw_label(frame: &mut FrameBuffer, tool: ToolKind, at: Point) {
    draw_text_5x7_scaled(frame, at.x, at.y, tool.label(), LABEL_SCALE, LABEL_COLOR);
}
