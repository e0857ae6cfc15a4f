// Hand keypoints in frame pixel space.
// The detector reports 21 MediaPipe landmarks in normalized [0,1] coordinates; this
// module turns them into integer pixel positions and refuses anything that is not a
// complete hand.

use serde::Deserialize;

use crate::draw::{draw_line, fill_circle};
use crate::types::{FrameBuffer, Point};

/// Hand landmark indices (MediaPipe hand landmark model convention)
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

pub const LANDMARK_COUNT: usize = 21;

/// Normalized coordinates are clamped to this range; a landmark can sit a little off-frame
/// but never arbitrarily far from it.
const NORMALIZED_RANGE: (f32, f32) = (-1.0, 2.0);

/// Bones of the hand skeleton, as pairs of landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

/// One landmark as reported by the detector, normalized to the image size.
/// Extra fields the detector sends (z, visibility) are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

/// All 21 keypoints of one hand, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct KeypointSet {
    points: [Point; LANDMARK_COUNT],
}

impl KeypointSet {
    #[cfg(test)]
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Scale detector output to pixels. Anything but exactly 21 points is "no hand".
    /// Wild coordinates are clamped to `NORMALIZED_RANGE` first.
    pub fn from_normalized(points: &[NormalizedPoint], width: usize, height: usize) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            log::warn!("expected {LANDMARK_COUNT} landmarks, got {}; ignoring hand", points.len());
            return None;
        }
        let mut out = [Point::default(); LANDMARK_COUNT];
        let (lo, hi) = NORMALIZED_RANGE;
        for (dst, p) in out.iter_mut().zip(points) {
            let (x, y) = (p.x.clamp(lo, hi), p.y.clamp(lo, hi));
            *dst = Point::new((x * width as f32) as i32, (y * height as f32) as i32);
        }
        Some(Self { points: out })
    }

    #[inline]
    pub fn get(&self, landmark: usize) -> Point {
        self.points[landmark]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }
}

/// Overlay the hand skeleton: white bones, red joints.
pub fn draw_hand(fb: &mut FrameBuffer, hand: &KeypointSet) {
    for &(a, b) in HAND_CONNECTIONS.iter() {
        draw_line(fb, hand.get(a), hand.get(b), 2, 0x00_FF_FF_FF);
    }
    for &p in hand.points() {
        fill_circle(fb, p, 3, 0x00_FF_00_00);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(n: usize) -> Vec<NormalizedPoint> {
        (0..n).map(|i| NormalizedPoint { x: i as f32 / 40.0, y: 0.5 }).collect()
    }

    #[test]
    fn scales_to_pixels() {
        let hand = KeypointSet::from_normalized(&normalized(21), 640, 480).unwrap();
        assert_eq!(hand.get(index::WRIST), Point::new(0, 240));
        assert_eq!(hand.get(index::INDEX_FINGER_TIP), Point::new(128, 240));
        assert_eq!(hand.get(index::PINKY_TIP), Point::new(320, 240));
    }

    #[test]
    fn wrong_count_is_no_hand() {
        assert!(KeypointSet::from_normalized(&normalized(0), 640, 480).is_none());
        assert!(KeypointSet::from_normalized(&normalized(20), 640, 480).is_none());
        assert!(KeypointSet::from_normalized(&normalized(22), 640, 480).is_none());
    }

    #[test]
    fn runaway_coordinates_are_clamped_near_the_frame() {
        let mut pts = normalized(21);
        pts[index::INDEX_FINGER_TIP] = NormalizedPoint { x: 1e6, y: -1e6 };
        pts[index::WRIST] = NormalizedPoint { x: f32::INFINITY, y: 2.5 };
        let hand = KeypointSet::from_normalized(&pts, 640, 480).unwrap();
        assert_eq!(hand.get(index::INDEX_FINGER_TIP), Point::new(1280, -480));
        assert_eq!(hand.get(index::WRIST), Point::new(1280, 960));
        // In-range points are untouched.
        assert_eq!(hand.get(index::PINKY_TIP), Point::new(320, 240));
    }

    #[test]
    fn skeleton_touches_every_landmark() {
        let mut fb = FrameBuffer::filled(640, 480, 0);
        let hand = KeypointSet::from_normalized(&normalized(21), 640, 480).unwrap();
        draw_hand(&mut fb, &hand);
        for p in hand.points() {
            assert_ne!(fb.get(p.x as usize, p.y as usize), 0);
        }
    }
}
