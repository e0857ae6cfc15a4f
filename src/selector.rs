// Dwell-to-select: hovering the fingertip over a palette slot long enough picks that tool.
// While hovering, a ring around the fingertip shrinks one pixel per frame as feedback.

use std::time::{Duration, Instant};

use crate::tool::{PaletteGeometry, ToolKind};
use crate::types::Point;

/// Hover timer. Inactive means no start time and the ring at full size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionTimer {
    start: Option<Instant>,
    shrink_radius: i32,
}

impl SelectionTimer {
    fn idle(ring_max: i32) -> Self {
        Self { start: None, shrink_radius: ring_max }
    }

    #[cfg(test)]
    pub fn active(&self) -> bool {
        self.start.is_some()
    }

    #[cfg(test)]
    pub fn shrink_radius(&self) -> i32 {
        self.shrink_radius
    }
}

/// What the selector did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    /// Progress ring to draw: (center, radius).
    pub ring: Option<(Point, i32)>,
    /// Tool picked on this frame.
    pub committed: Option<ToolKind>,
}

pub struct ToolSelector {
    geometry: PaletteGeometry,
    dwell: Duration,
    ring_max: i32,
    ring_min: i32,
    timer: SelectionTimer,
}

impl ToolSelector {
    pub fn new(geometry: PaletteGeometry, dwell: Duration, ring_max: i32, ring_min: i32) -> Self {
        Self {
            geometry,
            dwell,
            ring_max,
            ring_min,
            timer: SelectionTimer::idle(ring_max),
        }
    }

    #[cfg(test)]
    pub fn timer(&self) -> &SelectionTimer {
        &self.timer
    }

    /// Advance one frame. `fingertip` is `None` when no hand was seen.
    pub fn update(&mut self, fingertip: Option<Point>, now: Instant) -> Selection {
        let tip = match fingertip {
            Some(p) if self.geometry.contains(p) => p,
            _ => {
                self.timer = SelectionTimer::idle(self.ring_max);
                return Selection::default();
            }
        };

        let start = *self.timer.start.get_or_insert(now);
        let ring = Some((tip, self.timer.shrink_radius));
        self.timer.shrink_radius = (self.timer.shrink_radius - 1).max(self.ring_min);

        let mut committed = None;
        if now.saturating_duration_since(start) > self.dwell {
            // The slot under the finger *now*, not where the hover began.
            committed = self.geometry.tool_at(tip.x);
            self.timer = SelectionTimer::idle(self.ring_max);
        }

        Selection { ring, committed }
    }
}
