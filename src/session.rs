// Everything that persists between frames, and the per-frame pipeline over it:
// pointer -> tool selector -> drawing engine -> compositor.

use std::time::{Duration, Instant};

use crate::canvas::{blend_palette, composite_ink, draw_label, Canvas};
use crate::config::Config;
use crate::draw::draw_circle;
use crate::engine::DrawingEngine;
use crate::landmarks::{draw_hand, KeypointSet};
use crate::pointer::classify;
use crate::selector::ToolSelector;
use crate::tool::{PaletteGeometry, ToolKind};
use crate::types::{FrameBuffer, Point};

const RING_COLOR: u32 = 0x00_FF_FF_00;
/// Label sits this far right of the palette's left margin.
const LABEL_OFFSET_X: i32 = 270;
const LABEL_Y: i32 = 8;

pub struct Session {
    geometry: PaletteGeometry,
    palette: FrameBuffer,
    palette_alpha: f32,
    pen_threshold: i32,
    show_landmarks: bool,
    current_tool: ToolKind,
    selector: ToolSelector,
    engine: DrawingEngine,
    canvas: Canvas,
}

impl Session {
    /// A blank session for frames of `width` x `height`.
    pub fn new(config: &Config, palette: FrameBuffer, width: usize, height: usize) -> Self {
        let geometry = geometry(config);
        Self {
            geometry,
            palette,
            palette_alpha: config.palette.alpha,
            pen_threshold: config.gesture.pen_threshold,
            show_landmarks: config.show_landmarks,
            current_tool: ToolKind::default(),
            selector: ToolSelector::new(
                geometry,
                Duration::from_secs_f32(config.gesture.dwell_secs),
                config.gesture.ring_max,
                config.gesture.ring_min,
            ),
            engine: DrawingEngine::new(config.ink.thickness, config.ink.eraser_radius),
            canvas: Canvas::new(width, height),
        }
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Run one frame. `frame` comes in as the camera image and leaves ready for display.
    pub fn process_frame(&mut self, frame: &mut FrameBuffer, hand: Option<&KeypointSet>, now: Instant) {
        if let Some(hand) = hand.filter(|_| self.show_landmarks) {
            draw_hand(frame, hand);
        }
        let pointer = hand.map(|h| classify(h, self.pen_threshold));

        // The engine keeps using the tool this frame started with.
        let active = self.current_tool;

        let selection = self.selector.update(pointer.map(|p| p.fingertip), now);
        if let Some((center, radius)) = selection.ring {
            draw_circle(frame, center, radius, 1, RING_COLOR);
        }
        if let Some(tool) = selection.committed {
            log::info!("selected tool: {}", tool.label());
            self.current_tool = tool;
        }

        self.engine.step(active, pointer, frame, &mut self.canvas);

        composite_ink(frame, &self.canvas);
        blend_palette(frame, &self.palette, &self.geometry, self.palette_alpha);
        let label_at = Point::new(self.geometry.margin_left + LABEL_OFFSET_X, LABEL_Y);
        draw_label(frame, self.current_tool, label_at);
    }
}

pub fn geometry(config: &Config) -> PaletteGeometry {
    PaletteGeometry {
        margin_left: config.palette.margin_left,
        slot_width: config.palette.slot_width,
        height: config.palette.height,
    }
}
