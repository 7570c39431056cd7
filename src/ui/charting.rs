use ratatui::layout::Rect;

use crate::geometry::{PlotGeometry, Point};

/// Tick counts that keep axis labels from colliding in the given chart area
pub fn tick_counts(chart: Rect) -> (usize, usize) {
    let x = (chart.width / 8).clamp(2, 10);
    let y = (chart.height / 3).clamp(2, 10);
    (x as usize, y as usize)
}

/// Maps terminal cells onto the logical canvas and back.
///
/// The whole canvas is stretched over `area`; cell `(area.x, area.y)` is the
/// canvas origin and the last column/row is its far edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(area: Rect, geometry: &PlotGeometry) -> Self {
        Self {
            area,
            width: geometry.width,
            height: geometry.height,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn span(cells: u16) -> f64 {
        f64::from(cells.saturating_sub(1).max(1))
    }

    /// Logical units covered by one cell, horizontally and vertically
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.width / Self::span(self.area.width),
            self.height / Self::span(self.area.height),
        )
    }

    /// Canvas position of a terminal cell, or `None` outside the area
    pub fn to_canvas(&self, column: u16, row: u16) -> Option<Point> {
        let inside = column >= self.area.x
            && column < self.area.right()
            && row >= self.area.y
            && row < self.area.bottom();
        if !inside || self.area.is_empty() {
            return None;
        }
        Some(Point::new(
            f64::from(column - self.area.x) / Self::span(self.area.width) * self.width,
            f64::from(row - self.area.y) / Self::span(self.area.height) * self.height,
        ))
    }

    /// Terminal cell nearest to a canvas position, clamped into the area
    pub fn to_cell(&self, p: Point) -> (u16, u16) {
        let col = (p.x / self.width * Self::span(self.area.width)).round();
        let row = (p.y / self.height * Self::span(self.area.height)).round();
        let max_col = f64::from(self.area.width.saturating_sub(1));
        let max_row = f64::from(self.area.height.saturating_sub(1));
        (
            self.area.x + col.clamp(0.0, max_col) as u16,
            self.area.y + row.clamp(0.0, max_row) as u16,
        )
    }

    /// How far from a marker center the pointer may be and still hit it.
    /// A cell is much coarser than a marker, so half a cell is added on top
    /// of the marker radius.
    pub fn hit_tolerance(&self, radius: f64) -> (f64, f64) {
        let (cw, ch) = self.cell_size();
        (radius + cw / 2.0, radius + ch / 2.0)
    }
}
