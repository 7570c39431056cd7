use chrono::Duration;
use itertools::Itertools;
use ratatui::style::Color;
use tracing::debug;

use crate::{error::PlotError, geometry::PlotGeometry, record::PlotPoint};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Candidate spacings for time axis ticks, in seconds
const TIME_INTERVALS: [i64; 9] = [1, 5, 15, 30, 60, 300, 900, 1800, 3600];

/// Linear mapping from a numeric domain onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r0 == r1 {
            return (d0 + d1) / 2.0;
        }
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    /// Roughly `count` round values (1, 2 or 5 × 10ⁿ apart) inside the domain
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = ordered(self.domain);
        if count == 0 {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let (power, factor) = nice_step(lo, hi, count);
        if power < 0 {
            // Divide by an integer inverse to keep fractional ticks exact
            let inv = 10f64.powi(-power) / factor;
            let first = (lo * inv).ceil() as i64;
            let last = (hi * inv).floor() as i64;
            (first..=last).map(|i| i as f64 / inv).collect()
        } else {
            let step = 10f64.powi(power) * factor;
            let first = (lo / step).ceil() as i64;
            let last = (hi / step).floor() as i64;
            (first..=last).map(|i| i as f64 * step).collect()
        }
    }
}

fn ordered((a, b): (f64, f64)) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Decimal power and 1/2/5/10 factor of the tick step
fn nice_step(lo: f64, hi: f64, count: usize) -> (i32, f64) {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor() as i32;
    let error = raw / 10f64.powi(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    (power, factor)
}

/// Mapping from elapsed durations onto a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (Duration, Duration), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(
                (
                    domain.0.num_seconds() as f64,
                    domain.1.num_seconds() as f64,
                ),
                range,
            ),
        }
    }

    pub fn domain(&self) -> (Duration, Duration) {
        let (d0, d1) = self.inner.domain();
        (Duration::seconds(d0 as i64), Duration::seconds(d1 as i64))
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    pub fn map(&self, value: Duration) -> f64 {
        self.inner.map(value.num_seconds() as f64)
    }

    pub fn invert(&self, pixel: f64) -> Duration {
        Duration::seconds(self.inner.invert(pixel).round() as i64)
    }

    /// Multiples of a calendar-friendly interval inside the domain, ascending
    pub fn ticks(&self, count: usize) -> Vec<Duration> {
        let (lo, hi) = ordered(self.inner.domain());
        if count == 0 {
            return Vec::new();
        }
        let interval = time_interval((hi - lo) / count as f64);
        let first = (lo / interval as f64).ceil() as i64;
        let last = (hi / interval as f64).floor() as i64;
        (first..=last)
            .map(|i| Duration::seconds(i * interval))
            .collect()
    }
}

fn time_interval(target: f64) -> i64 {
    match TIME_INTERVALS.iter().position(|&i| i as f64 > target) {
        Some(0) => TIME_INTERVALS[0],
        Some(i) => {
            let (below, above) = (TIME_INTERVALS[i - 1] as f64, TIME_INTERVALS[i] as f64);
            if target / below < above / target {
                TIME_INTERVALS[i - 1]
            } else {
                TIME_INTERVALS[i]
            }
        }
        None => {
            let hours = (target / 3600.0).ceil().max(1.0) as i64;
            hours * 3600
        }
    }
}

/// Two-valued categorical palette keyed by "has a doping allegation"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    clean: Color,
    doping: Color,
}

impl Default for ColorMap {
    fn default() -> Self {
        // First two entries of the category10 scheme
        Self {
            clean: Color::Rgb(0x1f, 0x77, 0xb4),
            doping: Color::Rgb(0xff, 0x7f, 0x0e),
        }
    }
}

impl ColorMap {
    pub fn color(&self, has_doping: bool) -> Color {
        if has_doping {
            self.doping
        } else {
            self.clean
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scales {
    pub x: LinearScale,
    pub y: TimeScale,
    pub color: ColorMap,
}

/// Derive the year and time scales from the extents of `points`
pub fn compute_scales(points: &[PlotPoint], geometry: &PlotGeometry) -> Result<Scales, PlotError> {
    let (min_year, max_year) = points
        .iter()
        .map(|p| p.year)
        .minmax()
        .into_option()
        .ok_or(PlotError::EmptyDataset)?;
    let (min_time, max_time) = points
        .iter()
        .map(|p| p.time)
        .minmax()
        .into_option()
        .ok_or(PlotError::EmptyDataset)?;

    // Pad in f64 so extreme years cannot overflow
    let x = LinearScale::new(
        (f64::from(min_year) - 1.0, f64::from(max_year) + 1.0),
        geometry.x_range(),
    );
    let y = TimeScale::new((max_time, min_time), geometry.y_range());

    debug!(
        min_year,
        max_year,
        fastest = min_time.num_seconds(),
        slowest = max_time.num_seconds(),
        "computed scales"
    );

    Ok(Scales {
        x,
        y,
        color: ColorMap::default(),
    })
}
