use tracing::{debug, error, info, warn};

use crate::{
    error::{LoadError, PlotError},
    geometry::{PlotGeometry, Point},
    hover::HoverState,
    plot::PlotModel,
    record::{format_time, transform_all, PlotPoint, RaceResult},
    scale::{compute_scales, Scales},
};

#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum LoadStatus {
    #[strum(serialize = "fetching")]
    Fetching,
    #[strum(serialize = "loaded")]
    Loaded,
    #[strum(serialize = "empty")]
    Empty,
    #[strum(serialize = "failed")]
    Failed(String),
}

/// All state of the single scatterplot view
#[derive(Debug, Clone)]
pub struct PlotView {
    status: LoadStatus,
    points: Vec<PlotPoint>,
    scales: Option<Scales>,
    ready: bool,
    hover: HoverState,
    geometry: PlotGeometry,
}

impl PlotView {
    pub fn new(geometry: PlotGeometry) -> Self {
        Self {
            status: LoadStatus::Fetching,
            points: Vec::new(),
            scales: None,
            ready: false,
            hover: HoverState::Idle,
            geometry,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    pub fn geometry(&self) -> &PlotGeometry {
        &self.geometry
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// True once scales exist; never goes back to false
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Apply the outcome of the one-shot fetch
    pub fn on_load_complete(&mut self, result: Result<Vec<RaceResult>, LoadError>) {
        if self.status != LoadStatus::Fetching {
            warn!(status = %self.status, "ignoring load result, view already settled");
            return;
        }

        match result.map_err(PlotError::from).and_then(|raws| transform_all(&raws)) {
            Err(err) => {
                error!(%err, "could not load race results");
                self.status = LoadStatus::Failed(err.to_string());
            }
            Ok(points) if points.is_empty() => {
                info!("dataset is empty, nothing to plot");
                self.status = LoadStatus::Empty;
            }
            Ok(points) => {
                info!(count = points.len(), "race results loaded");
                self.points = points;
                self.compute_scales_once();
            }
        }
    }

    fn compute_scales_once(&mut self) {
        if self.scales.is_some() {
            return;
        }
        match compute_scales(&self.points, &self.geometry) {
            Ok(scales) => {
                self.scales = Some(scales);
                self.ready = true;
                self.status = LoadStatus::Loaded;
            }
            Err(err) => {
                error!(%err, "could not compute scales");
                self.status = LoadStatus::Failed(err.to_string());
            }
        }
    }

    /// Marker, axis and legend layout; `None` until the view is ready
    pub fn model(&self, x_tick_count: usize, y_tick_count: usize) -> Option<PlotModel> {
        let scales = self.scales.as_ref()?;
        Some(PlotModel::build(
            &self.points,
            scales,
            &self.geometry,
            x_tick_count,
            y_tick_count,
        ))
    }

    pub fn hover_enter(&mut self, index: usize, pointer: Point) {
        if index >= self.points.len() {
            return;
        }
        debug!(index, rider = %self.points[index].name, "hover enter");
        self.hover.enter(index, pointer, self.geometry.tooltip_offset);
    }

    pub fn hover_leave(&mut self) {
        if self.hover.is_hovering() {
            debug!("hover leave");
        }
        self.hover.leave();
    }

    /// Drive the hover state from a pointer position on the canvas.
    /// Returns true when the display needs redrawing.
    pub fn on_pointer_moved(&mut self, pointer: Point, tolerance: (f64, f64)) -> bool {
        let Some(model) = self.model(0, 0) else {
            return false;
        };

        let before = self.hover;
        match (model.hit_test(pointer, tolerance), self.hover.selected()) {
            (Some(hit), Some(current)) if hit == current => {}
            (Some(hit), _) => self.hover_enter(hit, pointer),
            (None, Some(_)) => self.hover_leave(),
            (None, None) => {}
        }
        self.hover != before
    }

    pub fn selected(&self) -> Option<&PlotPoint> {
        self.hover.selected().and_then(|i| self.points.get(i))
    }

    /// Tooltip text for the hovered point
    pub fn tooltip_lines(&self) -> Option<Vec<String>> {
        let p = self.selected()?;
        let mut lines = vec![
            format!("{}: {}", p.name, p.nationality),
            format!("Year: {}, Time: {}", p.year, format_time(p.time)),
        ];
        if p.has_doping() {
            lines.push(p.doping.clone());
        }
        Some(lines)
    }
}
