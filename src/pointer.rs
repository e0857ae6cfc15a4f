// Turns one hand's keypoints into a pen: where it points and whether it is down.

use crate::landmarks::{index, KeypointSet};
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pointer {
    /// Index fingertip; the pen nib.
    pub fingertip: Point,
    /// Middle fingertip; the eraser is centered here.
    pub middle_tip: Point,
    pub pen_down: bool,
}

/// Pen is down while the middle fingertip sits more than `threshold` pixels above
/// its MCP joint. A fixed pixel distance, so it is resolution dependent.
pub fn classify(hand: &KeypointSet, threshold: i32) -> Pointer {
    let tip = hand.get(index::MIDDLE_FINGER_TIP);
    let joint = hand.get(index::MIDDLE_FINGER_MCP);
    Pointer {
        fingertip: hand.get(index::INDEX_FINGER_TIP),
        middle_tip: tip,
        pen_down: joint.y - tip.y > threshold,
    }
}
