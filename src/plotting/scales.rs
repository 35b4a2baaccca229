//! Coordinate mappings between data and chart pixels.
//!
//! Every scale is a plain value: evaluating it never changes it. A
//! [`ScaleRegistry`] bundles the scales one view needs and is rebuilt whenever
//! the dataset or view changes.

use chrono::{DateTime, Duration, Utc};
use plotters::style::RGBColor;
use std::collections::HashMap;

use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::plotting::styles::{interpolate_rgb, DELETIONS_RAMP, INSERTIONS_RAMP};
use crate::types::{LineStats, TimeExtent};

/// Linear mapping from instants to x pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: (DateTime<Utc>, DateTime<Utc>),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new(extent: TimeExtent, range: (f64, f64)) -> Self {
        Self {
            domain: (extent.start, extent.end),
            range,
        }
    }

    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn span_millis(&self) -> f64 {
        (self.domain.1 - self.domain.0).num_milliseconds() as f64
    }

    /// A degenerate domain maps everything to the start of the range.
    pub fn apply(&self, time: DateTime<Utc>) -> f64 {
        let span = self.span_millis();
        if span == 0.0 {
            return self.range.0;
        }
        let t = (time - self.domain.0).num_milliseconds() as f64 / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    pub fn invert(&self, x: f64) -> DateTime<Utc> {
        let width = self.range.1 - self.range.0;
        if width == 0.0 {
            return self.domain.0;
        }
        let millis = (x - self.range.0) / width * self.span_millis();
        self.domain.0 + Duration::milliseconds(millis.round() as i64)
    }

    /// Evenly spaced axis ticks, labelled at a granularity fitting the span.
    pub fn ticks(&self, count: usize) -> Vec<(f64, String)> {
        if count == 0 {
            return Vec::new();
        }
        let days = (self.domain.1 - self.domain.0).num_days();
        let format = if days > 3 * 365 {
            "%Y"
        } else if days > 60 {
            "%b %Y"
        } else {
            "%b %d"
        };
        let step = self.span_millis() / count as f64;
        (0..=count)
            .map(|i| {
                let time = self.domain.0 + Duration::milliseconds((step * i as f64) as i64);
                (self.apply(time), time.format(format).to_string())
            })
            .collect()
    }
}

/// Ordered keys mapped onto equal, contiguous, pixel-rounded bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    keys: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    start: f64,
    step: f64,
}

impl BandScale {
    pub fn new(keys: Vec<String>, range: (f64, f64)) -> Self {
        let mut index = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            index.entry(key.clone()).or_insert(i);
        }
        let mut scale = Self {
            keys,
            index,
            range,
            start: range.0,
            step: 0.0,
        };
        scale.rescale();
        scale
    }

    /// Same keys over a new range.
    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self.rescale();
        self
    }

    fn rescale(&mut self) {
        let n = self.keys.len();
        let (r0, r1) = self.range;
        if n == 0 {
            self.start = r0;
            self.step = 0.0;
            return;
        }
        let step = ((r1 - r0) / n as f64).floor();
        self.start = (r0 + (r1 - r0 - step * n as f64) * 0.5).round();
        self.step = step;
    }

    pub fn bandwidth(&self) -> f64 {
        self.step
    }

    /// Offset of the first band.
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Top (or left) edge of band `i`.
    pub fn position(&self, i: usize) -> f64 {
        self.start + self.step * i as f64
    }

    pub fn apply(&self, key: &str) -> Option<f64> {
        self.index_of(key).map(|i| self.position(i))
    }
}

/// Maps line counts to bar lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl MagnitudeScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    fn interpolate(&self, t: f64) -> f64 {
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// Extrapolates beyond the domain. A degenerate domain maps to the range start.
    pub fn unclamped(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if d1 == d0 {
            return self.range.0;
        }
        self.interpolate((value - d0) / (d1 - d0))
    }

    /// Never leaves the range; this is the length bars are drawn with.
    pub fn clamped(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let t = if value <= d0 {
            0.0
        } else if value >= d1 {
            1.0
        } else {
            (value - d0) / (d1 - d0)
        };
        self.interpolate(t)
    }

    /// Whether clamping shortened the bar for `value`.
    pub fn overflows(&self, value: f64) -> bool {
        self.unclamped(value) > self.clamped(value)
    }
}

/// Color ramp for magnitudes beyond the percentile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowColorScale {
    domain: (f64, f64),
    ramp: (RGBColor, RGBColor),
}

impl OverflowColorScale {
    pub fn new(stats: LineStats, ramp: (RGBColor, RGBColor)) -> Self {
        Self {
            domain: (stats.percentile_value, stats.max),
            ramp,
        }
    }

    pub fn base(&self) -> RGBColor {
        self.ramp.0
    }

    pub fn interpolate(&self, value: f64) -> RGBColor {
        let (d0, d1) = self.domain;
        if d1 == d0 {
            return self.ramp.0;
        }
        interpolate_rgb(self.ramp.0, self.ramp.1, (value - d0) / (d1 - d0))
    }

    /// The base color unless `magnitude` had to clamp `value`.
    pub fn color(&self, magnitude: &MagnitudeScale, value: f64) -> RGBColor {
        if magnitude.overflows(value) {
            self.interpolate(value)
        } else {
            self.base()
        }
    }
}

/// Which side of a commit glyph a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Insertions,
    Deletions,
}

/// The scales of one view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleRegistry {
    pub time: TimeScale,
    pub rows: BandScale,
    pub magnitude: MagnitudeScale,
    pub insertions: OverflowColorScale,
    pub deletions: OverflowColorScale,
}

impl ScaleRegistry {
    /// Author rows, shrunk and centered when there are too few authors.
    pub fn for_commits(dataset: &Dataset, extent: TimeExtent, config: &ChartConfig) -> Self {
        let keys = dataset.authors().iter().map(|a| a.key.clone()).collect();
        let height = config.height();
        let mut rows = BandScale::new(keys, (0.0, height));
        if rows.bandwidth() > height / 3.0 {
            let leftover = (height - 2.0 * height / 3.0) / 2.0;
            rows = rows.with_range((leftover, height - leftover));
        }
        Self::build(extent, rows, dataset.line_stats(), config)
    }

    pub fn for_files(dataset: &Dataset, extent: TimeExtent, config: &ChartConfig) -> Self {
        let keys = dataset.files().iter().map(|f| f.file.clone()).collect();
        let rows = BandScale::new(keys, (0.0, config.height()));
        Self::build(extent, rows, dataset.file_line_stats(), config)
    }

    fn build(extent: TimeExtent, rows: BandScale, stats: LineStats, config: &ChartConfig) -> Self {
        let time = TimeScale::new(extent, (0.0, config.width() - config.author_panel_width));
        let magnitude = MagnitudeScale::new(
            (stats.min, stats.percentile_value),
            (3.0, rows.bandwidth() / 2.0),
        );
        Self {
            time,
            rows,
            magnitude,
            insertions: OverflowColorScale::new(stats, INSERTIONS_RAMP),
            deletions: OverflowColorScale::new(stats, DELETIONS_RAMP),
        }
    }

    pub fn bar_length(&self, value: u64) -> f64 {
        self.magnitude.clamped(value as f64)
    }

    pub fn stat_color(&self, value: u64, change: Change) -> RGBColor {
        let scale = match change {
            Change::Insertions => &self.insertions,
            Change::Deletions => &self.deletions,
        };
        scale.color(&self.magnitude, value as f64)
    }
}
