//! Drawing-independent description of the scatterplot: where every marker,
//! tick and legend entry goes on the logical canvas.

use ratatui::style::Color;

use crate::{
    geometry::{PlotGeometry, Point},
    record::{format_time, PlotPoint},
    scale::Scales,
};

pub const X_AXIS_TITLE: &str = "Year";
pub const Y_AXIS_TITLE: &str = "Best Time (minutes)";
pub const DOPING_LABEL: &str = "Bikers with doping allegations";
pub const CLEAN_LABEL: &str = "No doping allegations";

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub center: Point,
    pub fill: Color,
    pub has_doping: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Canvas x for the horizontal axis, canvas y for the vertical one
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisModel {
    pub title: &'static str,
    pub ticks: Vec<Tick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotModel {
    pub markers: Vec<Marker>,
    pub x_axis: AxisModel,
    pub y_axis: AxisModel,
    pub legend: [LegendEntry; 2],
}

impl PlotModel {
    pub fn build(
        points: &[PlotPoint],
        scales: &Scales,
        geometry: &PlotGeometry,
        x_tick_count: usize,
        y_tick_count: usize,
    ) -> Self {
        let left = geometry.plot_left();

        let markers = points
            .iter()
            .enumerate()
            .map(|(index, p)| Marker {
                index,
                center: Point::new(left + scales.x.map(f64::from(p.year)), scales.y.map(p.time)),
                fill: scales.color.color(p.has_doping()),
                has_doping: p.has_doping(),
            })
            .collect();

        // Years are whole numbers; fractional ticks would repeat labels
        let x_ticks = scales
            .x
            .ticks(x_tick_count)
            .into_iter()
            .filter(|t| t.fract() == 0.0)
            .map(|t| Tick {
                position: left + scales.x.map(t),
                label: format!("{}", t as i64),
            })
            .collect();

        let y_ticks = scales
            .y
            .ticks(y_tick_count)
            .into_iter()
            .map(|t| Tick {
                position: scales.y.map(t),
                label: format_time(t),
            })
            .collect();

        Self {
            markers,
            x_axis: AxisModel {
                title: X_AXIS_TITLE,
                ticks: x_ticks,
            },
            y_axis: AxisModel {
                title: Y_AXIS_TITLE,
                ticks: y_ticks,
            },
            legend: [
                LegendEntry {
                    label: DOPING_LABEL,
                    color: scales.color.color(true),
                },
                LegendEntry {
                    label: CLEAN_LABEL,
                    color: scales.color.color(false),
                },
            ],
        }
    }

    /// Index of the marker nearest to `pointer`, if one lies within
    /// `tolerance` (half-width, half-height) of it
    pub fn hit_test(&self, pointer: Point, tolerance: (f64, f64)) -> Option<usize> {
        let (tx, ty) = tolerance;
        self.markers
            .iter()
            .filter_map(|m| {
                let dx = (m.center.x - pointer.x).abs();
                let dy = (m.center.y - pointer.y).abs();
                if dx <= tx && dy <= ty {
                    Some((m.index, (dx / tx).powi(2) + (dy / ty).powi(2)))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
