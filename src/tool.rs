// Drawing tools and the palette strip they are picked from.

use crate::types::Point;

/// What the pen does. `SelectPending` is the state before any tool was picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToolKind {
    #[default]
    SelectPending,
    Line,
    Rectangle,
    FreeDraw,
    Circle,
    Eraser,
}

impl ToolKind {
    /// Palette slots, left to right.
    pub const SLOTS: [ToolKind; 5] = [
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::FreeDraw,
        ToolKind::Circle,
        ToolKind::Eraser,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::SelectPending => "SELECT TOOL",
            ToolKind::Line => "LINE",
            ToolKind::Rectangle => "RECTANGLE",
            ToolKind::FreeDraw => "DRAW",
            ToolKind::Circle => "CIRCLE",
            ToolKind::Eraser => "ERASER",
        }
    }
}

/// Where the palette sits on screen: a row of equal slots along the top edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteGeometry {
    pub margin_left: i32,
    pub slot_width: i32,
    pub height: i32,
}

impl PaletteGeometry {
    pub fn width(&self) -> i32 {
        self.slot_width * ToolKind::SLOTS.len() as i32
    }

    /// Inside `[ml, ml + width) x [0, height)`.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.margin_left
            && p.x < self.margin_left + self.width()
            && p.y >= 0
            && p.y < self.height
    }

    /// Tool under column `x`; slots are half-open `[ml + k*w, ml + (k+1)*w)`.
    pub fn tool_at(&self, x: i32) -> Option<ToolKind> {
        let rel = x - self.margin_left;
        if rel < 0 {
            return None;
        }
        ToolKind::SLOTS.get((rel / self.slot_width) as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEO: PaletteGeometry = PaletteGeometry { margin_left: 150, slot_width: 50, height: 50 };

    #[test]
    fn slots_partition_the_palette_in_order() {
        assert_eq!(GEO.tool_at(150), Some(ToolKind::Line));
        assert_eq!(GEO.tool_at(199), Some(ToolKind::Line));
        assert_eq!(GEO.tool_at(200), Some(ToolKind::Rectangle));
        assert_eq!(GEO.tool_at(250), Some(ToolKind::FreeDraw));
        assert_eq!(GEO.tool_at(299), Some(ToolKind::FreeDraw));
        assert_eq!(GEO.tool_at(300), Some(ToolKind::Circle));
        assert_eq!(GEO.tool_at(399), Some(ToolKind::Eraser));
        assert_eq!(GEO.tool_at(400), None);
        assert_eq!(GEO.tool_at(149), None);
    }

    #[test]
    fn every_column_inside_maps_to_a_tool() {
        for x in 150..400 {
            assert!(GEO.contains(Point::new(x, 10)));
            assert!(GEO.tool_at(x).is_some());
        }
    }

    #[test]
    fn contains_is_half_open() {
        assert!(GEO.contains(Point::new(150, 0)));
        assert!(GEO.contains(Point::new(399, 49)));
        assert!(!GEO.contains(Point::new(400, 10)));
        assert!(!GEO.contains(Point::new(200, 50)));
        assert!(!GEO.contains(Point::new(200, -1)));
    }

    #[test]
    fn labels() {
        assert_eq!(ToolKind::default().label(), "SELECT TOOL");
        assert_eq!(ToolKind::FreeDraw.label(), "DRAW");
    }
}
