// Per-tool drawing state machine.
// Line, Rectangle and Circle are rubber-band tools: while the pen is down the shape is
// previewed on the camera frame only, and lifting the pen commits it to the canvas once.
// FreeDraw inks the canvas live, segment by segment. Eraser clears a disk of the canvas.

use crate::canvas::{Canvas, TOUCHED, UNTOUCHED};
use crate::draw::{draw_circle, draw_line, draw_rect, fill_circle, Plot};
use crate::pointer::Pointer;
use crate::tool::ToolKind;
use crate::types::{FrameBuffer, Point};

const LINE_PREVIEW: u32 = 0x00_FF_98_32; // amber
const RECT_PREVIEW: u32 = 0x00_FF_FF_00; // yellow
const CIRCLE_PREVIEW: u32 = 0x00_00_FF_FF; // cyan
const ERASER_CURSOR: u32 = 0x00_00_00_00;

/// Progress of the shape being drawn with the live tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawState {
    /// Where the current shape or stroke began; `Some` exactly while one is in progress.
    anchor: Option<Point>,
    last_point: Option<Point>,
}

impl DrawState {
    pub fn in_progress(&self) -> bool {
        self.anchor.is_some()
    }

    #[cfg(test)]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    #[cfg(test)]
    pub fn last_point(&self) -> Option<Point> {
        self.last_point
    }
}

pub struct DrawingEngine {
    tool: ToolKind,
    state: DrawState,
    thickness: i32,
    eraser_radius: i32,
}

impl DrawingEngine {
    pub fn new(thickness: i32, eraser_radius: i32) -> Self {
        Self {
            tool: ToolKind::default(),
            state: DrawState::default(),
            thickness,
            eraser_radius,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Run one frame for `tool`. Previews go to `frame`; only commits, FreeDraw and
    /// Eraser touch `canvas`. No pointer means nothing advances.
    pub fn step(&mut self, tool: ToolKind, pointer: Option<Pointer>, frame: &mut FrameBuffer, canvas: &mut Canvas) {
        if tool != self.tool {
            if self.state.in_progress() {
                log::debug!("abandoning unfinished {:?} for {:?}", self.tool, tool);
            }
            self.tool = tool;
            self.state = DrawState::default();
        }

        let Some(p) = pointer else { return };

        match tool {
            ToolKind::SelectPending => {}
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle => self.rubber_band(tool, p, frame, canvas),
            ToolKind::FreeDraw => self.free_draw(p, canvas),
            ToolKind::Eraser => {
                if p.pen_down {
                    fill_circle(frame, p.middle_tip, self.eraser_radius, ERASER_CURSOR);
                    fill_circle(canvas, p.middle_tip, self.eraser_radius, UNTOUCHED);
                }
            }
        }
    }

    fn rubber_band(&mut self, tool: ToolKind, p: Pointer, frame: &mut FrameBuffer, canvas: &mut Canvas) {
        let tip = p.fingertip;
        if p.pen_down {
            let anchor = *self.state.anchor.get_or_insert(tip);
            self.state.last_point = Some(tip);
            let color = match tool {
                ToolKind::Line => LINE_PREVIEW,
                ToolKind::Rectangle => RECT_PREVIEW,
                _ => CIRCLE_PREVIEW,
            };
            shape(frame, tool, anchor, tip, self.thickness, color);
        } else if let Some(anchor) = self.state.anchor.take() {
            shape(canvas, tool, anchor, tip, self.thickness, TOUCHED);
            self.state.last_point = Some(tip);
            log::debug!("committed {tool:?} {anchor:?} -> {tip:?}");
        }
    }

    fn free_draw(&mut self, p: Pointer, canvas: &mut Canvas) {
        let tip = p.fingertip;
        if p.pen_down {
            match (self.state.anchor, self.state.last_point) {
                (Some(_), Some(last)) => draw_line(canvas, last, tip, self.thickness, TOUCHED),
                // First point of a new stroke: nothing to connect to yet.
                _ => self.state.anchor = Some(tip),
            }
        } else {
            self.state.anchor = None;
        }
        self.state.last_point = Some(tip);
    }
}

fn shape<P: Plot>(target: &mut P, tool: ToolKind, anchor: Point, tip: Point, thickness: i32, value: P::Pixel) {
    match tool {
        ToolKind::Line => draw_line(target, anchor, tip, thickness, value),
        ToolKind::Rectangle => draw_rect(target, anchor, tip, thickness, value),
        ToolKind::Circle => draw_circle(target, anchor, anchor.distance_to(tip), thickness, value),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: usize = 640;
    const H: usize = 480;

    struct Rig {
        engine: DrawingEngine,
        canvas: Canvas,
        frame: FrameBuffer,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                engine: DrawingEngine::new(2, 70),
                canvas: Canvas::new(W, H),
                frame: FrameBuffer::filled(W, H, 0x00_40_40_40),
            }
        }

        /// One frame with a fresh camera image.
        fn frame(&mut self, tool: ToolKind, x: i32, y: i32, pen_down: bool) {
            self.frame = FrameBuffer::filled(W, H, 0x00_40_40_40);
            let p = Pointer { fingertip: Point::new(x, y), middle_tip: Point::new(x, y), pen_down };
            self.engine.step(tool, Some(p), &mut self.frame, &mut self.canvas);
        }

        fn no_hand(&mut self, tool: ToolKind) {
            self.frame = FrameBuffer::filled(W, H, 0x00_40_40_40);
            self.engine.step(tool, None, &mut self.frame, &mut self.canvas);
        }
    }

    #[test]
    fn rubber_band_previews_without_touching_canvas() {
        for tool in [ToolKind::Line, ToolKind::Rectangle, ToolKind::Circle] {
            let mut rig = Rig::new();
            rig.frame(tool, 100, 100, true);
            rig.frame(tool, 150, 140, true);
            rig.frame(tool, 200, 180, true);
            assert_eq!(rig.canvas, Canvas::new(W, H), "{tool:?}");
            assert!(rig.frame.pixels.iter().any(|&p| p != 0x00_40_40_40), "{tool:?} preview");
            assert_eq!(rig.engine.state().anchor(), Some(Point::new(100, 100)));
        }
    }

    #[test]
    fn lifting_the_pen_commits_once() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::Line, 100, 100, true);
        rig.frame(ToolKind::Line, 200, 100, true);
        rig.frame(ToolKind::Line, 200, 100, false);
        assert!(!rig.engine.state().in_progress());
        let committed = rig.canvas.clone();
        assert!(committed.is_touched(100, 100));
        assert!(committed.is_touched(150, 100));
        assert!(committed.is_touched(200, 100));
        assert!(!committed.is_touched(150, 120));

        // Further pen-up frames are no-ops.
        rig.frame(ToolKind::Line, 300, 300, false);
        rig.frame(ToolKind::Line, 310, 300, false);
        assert_eq!(rig.canvas, committed);
    }

    #[test]
    fn rectangle_commits_outline_only() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::Rectangle, 100, 100, true);
        rig.frame(ToolKind::Rectangle, 200, 160, false);
        for (x, y) in [(100, 100), (200, 100), (200, 160), (100, 160), (150, 100), (100, 130)] {
            assert!(rig.canvas.is_touched(x, y), "({x},{y})");
        }
        assert!(!rig.canvas.is_touched(150, 130));
    }

    #[test]
    fn circle_radius_is_anchor_to_tip_distance() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::Circle, 300, 200, true);
        rig.frame(ToolKind::Circle, 330, 240, false);
        // radius 50
        assert!(rig.canvas.is_touched(350, 200));
        assert!(rig.canvas.is_touched(300, 250));
        assert!(!rig.canvas.is_touched(300, 200));
    }

    #[test]
    fn switching_tools_abandons_the_shape() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::Rectangle, 100, 100, true);
        rig.frame(ToolKind::Rectangle, 200, 200, true);
        rig.frame(ToolKind::Line, 200, 200, true);
        assert_eq!(rig.engine.state().anchor(), Some(Point::new(200, 200)));
        rig.frame(ToolKind::Circle, 220, 220, false);
        assert_eq!(rig.canvas, Canvas::new(W, H));
    }

    #[test]
    fn stale_anchor_does_not_leak_into_new_tool() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::Line, 10, 10, true);
        // Selecting another tool while the pen is up.
        rig.frame(ToolKind::Circle, 300, 300, false);
        assert_eq!(rig.canvas, Canvas::new(W, H));
        assert!(!rig.engine.state().in_progress());
    }

    #[test]
    fn missing_hand_freezes_state() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::Line, 100, 100, true);
        let before = *rig.engine.state();
        rig.no_hand(ToolKind::Line);
        assert_eq!(*rig.engine.state(), before);
        assert_eq!(rig.canvas, Canvas::new(W, H));
        rig.frame(ToolKind::Line, 140, 100, false);
        assert!(rig.canvas.is_touched(120, 100));
    }

    #[test]
    fn free_draw_inks_each_segment_live() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::FreeDraw, 300, 300, true);
        assert_eq!(rig.canvas.touched_count(), 0);
        rig.frame(ToolKind::FreeDraw, 320, 300, true);
        rig.frame(ToolKind::FreeDraw, 320, 340, true);
        for x in 300..=320 {
            assert!(rig.canvas.is_touched(x, 300));
        }
        for y in 300..=340 {
            assert!(rig.canvas.is_touched(320, y));
        }
    }

    #[test]
    fn free_draw_strokes_are_not_joined() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::FreeDraw, 100, 100, true);
        rig.frame(ToolKind::FreeDraw, 120, 100, true);
        rig.frame(ToolKind::FreeDraw, 120, 100, false);
        rig.frame(ToolKind::FreeDraw, 200, 300, false);
        assert!(!rig.engine.state().in_progress());
        assert_eq!(rig.engine.state().last_point(), Some(Point::new(200, 300)));
        rig.frame(ToolKind::FreeDraw, 210, 300, true);
        rig.frame(ToolKind::FreeDraw, 230, 300, true);
        assert!(rig.canvas.is_touched(110, 100));
        assert!(rig.canvas.is_touched(220, 300));
        // Nothing between the end of stroke A and the start of stroke B.
        assert!(!rig.canvas.is_touched(160, 200));
        assert!(!rig.canvas.is_touched(205, 300));
    }

    #[test]
    fn eraser_clears_disk_idempotently() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::FreeDraw, 100, 200, true);
        rig.frame(ToolKind::FreeDraw, 500, 200, true);

        rig.frame(ToolKind::Eraser, 300, 200, true);
        assert!(!rig.canvas.is_touched(300, 200));
        assert!(!rig.canvas.is_touched(369, 200));
        assert!(rig.canvas.is_touched(372, 200));
        assert_eq!(rig.frame.get(300, 200), 0);
        let once = rig.canvas.clone();

        rig.frame(ToolKind::Eraser, 300, 200, true);
        assert_eq!(rig.canvas, once);
    }

    #[test]
    fn eraser_with_pen_up_does_nothing() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::FreeDraw, 100, 200, true);
        rig.frame(ToolKind::FreeDraw, 500, 200, true);
        let inked = rig.canvas.clone();
        rig.frame(ToolKind::Eraser, 300, 200, false);
        assert_eq!(rig.canvas, inked);
        assert_eq!(rig.frame.get(300, 200), 0x00_40_40_40);
    }

    #[test]
    fn select_pending_never_draws() {
        let mut rig = Rig::new();
        rig.frame(ToolKind::SelectPending, 100, 100, true);
        rig.frame(ToolKind::SelectPending, 200, 100, false);
        assert_eq!(rig.canvas, Canvas::new(W, H));
    }
}
