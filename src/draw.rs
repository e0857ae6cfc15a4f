// Window + software drawing utilities.
// 1) A window that shows the composed frame.
// 2) Raster primitives (line, box, circle, disk) that work on any pixel target:
//    the camera frame for live previews, the canvas for committed ink.
// 3) A tiny 5x7 bitmap font for the tool label.

use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen. Also polls input.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// The exit signal.
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }
}

/* ---------- Pixel targets ---------- */

/// Anything the primitives can write pixels into.
pub trait Plot {
    type Pixel: Copy;

    /// (width, height) in pixels.
    fn size(&self) -> (usize, usize);

    /// Write one pixel; `idx` is `y * width + x` and always in range.
    fn set(&mut self, idx: usize, value: Self::Pixel);
}

impl Plot for FrameBuffer {
    type Pixel = u32;

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn set(&mut self, idx: usize, value: u32) {
        self.pixels[idx] = value;
    }
}

/// Put a pixel on the target if (x,y) is inside bounds.
#[inline]
pub fn put_pixel<P: Plot>(target: &mut P, x: i32, y: i32, value: P::Pixel) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    let (w, h) = target.size();
    if x >= w || y >= h {
        return;
    }
    target.set(y * w + x, value);
}

/// Square brush of `thickness` pixels anchored at (x,y).
#[inline]
fn stamp<P: Plot>(target: &mut P, x: i32, y: i32, thickness: i32, value: P::Pixel) {
    let t = thickness.max(1);
    let lo = -(t - 1) / 2;
    let hi = t / 2;
    for dy in lo..=hi {
        for dx in lo..=hi {
            put_pixel(target, x + dx, y + dy, value);
        }
    }
}

/// Straight segment from `a` to `b` (Bresenham), inclusive of both ends.
pub fn draw_line<P: Plot>(target: &mut P, a: Point, b: Point, thickness: i32, value: P::Pixel) {
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(target, x0, y0, thickness, value);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Axis-aligned box outline with `a` and `b` as opposite corners.
pub fn draw_rect<P: Plot>(target: &mut P, a: Point, b: Point, thickness: i32, value: P::Pixel) {
    let tr = Point::new(b.x, a.y);
    let bl = Point::new(a.x, b.y);
    draw_line(target, a, tr, thickness, value);
    draw_line(target, tr, b, thickness, value);
    draw_line(target, b, bl, thickness, value);
    draw_line(target, bl, a, thickness, value);
}

/// Circle outline (midpoint algorithm).
pub fn draw_circle<P: Plot>(target: &mut P, center: Point, radius: i32, thickness: i32, value: P::Pixel) {
    if radius <= 0 {
        stamp(target, center.x, center.y, thickness, value);
        return;
    }
    let (cx, cy) = (center.x, center.y);
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (x, y), (y, x), (-y, x), (-x, y),
            (-x, -y), (-y, -x), (y, -x), (x, -y),
        ] {
            stamp(target, cx + px, cy + py, thickness, value);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Filled disk: every pixel within `radius` of `center`.
pub fn fill_circle<P: Plot>(target: &mut P, center: Point, radius: i32, value: P::Pixel) {
    let r = radius.max(0);
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                put_pixel(target, center.x + dx, center.y + dy, value);
            }
        }
    }
}

/* ---------- 5x7 bitmap font (upper-case ASCII) ---------- */

/// Return a 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw one glyph with every bit blown up to a `scale`x`scale` block.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let px = x + rx * scale;
            let py = y + ry as i32 * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, px + sx, py + sy, color);
                }
            }
        }
    }
}

/// Draw a text string at `scale`, with a 1-block black shadow for contrast.
pub fn draw_text_5x7_scaled(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, scale: i32, color: u32) {
    let scale = scale.max(1);
    let advance = 6 * scale; // 5 pixel glyph + 1 pixel spacing
    let mut cx = x;
    for ch in text.chars() {
        draw_char_5x7(fb, cx + scale, y + scale, ch, scale, 0x00_00_00_00);
        cx += advance;
    }
    let mut cx = x;
    for ch in text.chars() {
        draw_char_5x7(fb, cx, y, ch, scale, color);
        cx += advance;
    }
}
