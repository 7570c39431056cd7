/// A position on the logical canvas. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: f64) -> Self {
        Self {
            x: self.x + by,
            y: self.y + by,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 100.0,
            right: 20.0,
            bottom: 30.0,
            left: 60.0,
        }
    }
}

/// Fixed dimensions of the drawing surface, in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub dot_radius: f64,
    /// Distance between the pointer and the tooltip's top-left corner
    pub tooltip_offset: f64,
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            margin: Margin::default(),
            dot_radius: 6.0,
            tooltip_offset: 28.0,
        }
    }
}

impl PlotGeometry {
    /// Horizontal pixel range the year scale maps onto
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.width - self.margin.left - self.margin.right)
    }

    /// Vertical pixel range the time scale maps onto: bottom first, so the
    /// domain start lands at the bottom of the plot
    pub fn y_range(&self) -> (f64, f64) {
        (
            self.height - self.margin.top - self.margin.bottom,
            self.margin.top,
        )
    }

    /// Canvas x of the plot origin; scale output is shifted by this much
    pub fn plot_left(&self) -> f64 {
        self.margin.left
    }

    /// Canvas y of the x-axis baseline
    pub fn baseline(&self) -> f64 {
        self.y_range().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let g = PlotGeometry::default();
        assert_eq!(g.x_range(), (0.0, 820.0));
        assert_eq!(g.y_range(), (470.0, 100.0));
        assert_eq!(g.baseline(), 470.0);
    }

    #[test]
    fn test_point_offset() {
        assert_eq!(Point::new(10.0, 20.0).offset(28.0), Point::new(38.0, 48.0));
    }
}
