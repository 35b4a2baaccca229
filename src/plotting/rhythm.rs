//! Radial layout: each author gets a square cell and their commits are
//! wrapped around its center by time of day or day of week.

use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::plotting::scales::ScaleRegistry;
use crate::plotting::scene::{
    Element, ElementKey, Label, Layer, ReconcileStats, Scene, Shape, Transform,
};
use crate::types::RhythmKind;

/// Square cells laid out left to right, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RhythmGrid {
    pub side: f64,
    pub per_row: usize,
    pub count: usize,
}

impl RhythmGrid {
    /// `cells_per_row` cells across the width, unless that leaves no room
    /// for the commits around the inner radius.
    pub fn new(count: usize, bandwidth: f64, config: &ChartConfig) -> Self {
        let width = config.width();
        let per_row = config.cells_per_row.max(1);
        let side = width / per_row as f64;
        if side < bandwidth + config.inner_radius {
            let side = 2.0 * bandwidth + config.inner_radius;
            let per_row = ((width / side).floor() as usize).max(1);
            return Self {
                side,
                per_row,
                count,
            };
        }
        Self {
            side,
            per_row,
            count,
        }
    }

    /// Top-left corner of cell `i`.
    pub fn origin(&self, i: usize) -> (f64, f64) {
        let row = i / self.per_row;
        let col = i % self.per_row;
        (col as f64 * self.side, row as f64 * self.side)
    }

    pub fn center(&self, i: usize) -> (f64, f64) {
        let (x, y) = self.origin(i);
        (x + self.side / 2.0, y + self.side / 2.0)
    }
}

const HOUR_MARKERS: [(Option<&str>, f64); 8] = [
    (Some("midnight"), 0.0),
    (None, 0.0),
    (Some("6am"), -90.0),
    (Some("9am"), 225.0),
    (Some("noon"), 180.0),
    (Some("3pm"), 135.0),
    (Some("6pm"), 90.0),
    (None, 0.0),
];

const WEEK_MARKERS: [(Option<&str>, f64); 7] = [
    (Some("M"), -10.0),
    (Some("Tu"), 270.0),
    (Some("W"), 250.0),
    (Some("Th"), 180.0),
    (Some("F"), 130.0),
    (Some("Sa"), 80.0),
    (Some("Su"), 10.0),
];

/// Fixed label and upright rotation of marker `index`.
pub fn marker_label(kind: RhythmKind, index: usize) -> (Option<&'static str>, f64) {
    let table: &[(Option<&'static str>, f64)] = match kind {
        RhythmKind::HourOfDay => &HOUR_MARKERS,
        RhythmKind::DayOfWeek => &WEEK_MARKERS,
    };
    table.get(index).copied().unwrap_or((None, 0.0))
}

/// Angle of marker `index`. Weekday markers sit between day boundaries.
pub fn marker_angle(kind: RhythmKind, index: usize) -> f64 {
    let n = kind.marker_count() as f64;
    let angle = 360.0 / n * index as f64;
    match kind {
        RhythmKind::HourOfDay => angle,
        RhythmKind::DayOfWeek => angle + 360.0 / (2.0 * n),
    }
}

pub fn commit_angle(minutes: u32, kind: RhythmKind) -> f64 {
    minutes as f64 / kind.period_minutes() * 360.0
}

pub fn commit_elements(
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
    grid: &RhythmGrid,
    kind: RhythmKind,
) -> Vec<(ElementKey, Element)> {
    let bw = scales.rows.bandwidth();
    dataset
        .commits()
        .filter_map(|commit| {
            let row = dataset.author_row_for_commit(commit)?;
            let angle = commit_angle(commit.rhythm_minutes(kind), kind);
            let transform = Transform::radial(grid.center(row), angle, bw / 2.0);
            // bar lengths and colors are the timeline's
            let shape = super::timeline::commit_glyph(
                scales,
                config,
                commit.insertions,
                commit.deletions,
                false,
            );
            Some((ElementKey::Commit(commit.index), Element::new(transform, shape)))
        })
        .collect()
}

pub fn row_elements(dataset: &Dataset, grid: &RhythmGrid) -> Vec<(ElementKey, Element)> {
    dataset
        .authors()
        .iter()
        .enumerate()
        .map(|(i, author)| {
            let (x, y) = grid.origin(i);
            let shape = Shape::Row {
                name: Label {
                    text: author.label(),
                    at: (5.0, 14.0),
                },
                count: None,
                guide: None,
            };
            (
                ElementKey::AuthorRow(author.key.clone()),
                Element::new(Transform::translate(x, y), shape),
            )
        })
        .collect()
}

pub fn marker_elements(
    dataset: &Dataset,
    scales: &ScaleRegistry,
    grid: &RhythmGrid,
    kind: RhythmKind,
) -> Vec<(ElementKey, Element)> {
    let bw = scales.rows.bandwidth();
    let label_offset = grid.side / 2.0 - bw / 2.0 - 10.0;
    let mut markers = Vec::with_capacity(dataset.authors().len() * kind.marker_count());
    for (i, author) in dataset.authors().iter().enumerate() {
        let center = grid.center(i);
        for index in 0..kind.marker_count() {
            let (label, rotation) = marker_label(kind, index);
            let mut element = Element::new(
                Transform::radial(center, marker_angle(kind, index), bw / 2.0),
                Shape::Marker {
                    label,
                    label_transform: Transform {
                        translate: (0.0, label_offset),
                        rotate: rotation,
                        offset: 0.0,
                    },
                },
            );
            element.flags.highlighted = i == 0;
            markers.push((
                ElementKey::RhythmMarker {
                    author: author.key.clone(),
                    index,
                },
                element,
            ));
        }
    }
    markers
}

/// Highlight the markers of one cell, clearing the rest.
pub fn highlight_cell(scene: &mut Scene, author: Option<&str>) {
    scene.update_layer(Layer::Markers, |key, element| {
        if let ElementKey::RhythmMarker { author: owner, .. } = key {
            element.flags.highlighted = Some(owner.as_str()) == author;
        }
    });
}

/// Lay the commits view out as rhythm cells.
pub fn render(
    scene: &mut Scene,
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
    kind: RhythmKind,
) -> (RhythmGrid, ReconcileStats) {
    let grid = RhythmGrid::new(dataset.authors().len(), scales.rows.bandwidth(), config);
    let transition = config.transition();
    let stats = scene.reconcile(
        Layer::Commits,
        commit_elements(dataset, scales, config, &grid, kind),
        transition,
    );
    scene.reconcile(Layer::Rows, row_elements(dataset, &grid), transition);
    scene.reconcile(
        Layer::Markers,
        marker_elements(dataset, scales, &grid, kind),
        std::time::Duration::ZERO,
    );
    super::mount_chrome(scene, config, 0.0);
    log::debug!("Rhythm {:?} grid {:?}", kind, grid);
    (grid, stats)
}

pub fn clear(scene: &mut Scene) {
    scene.remove_layer(Layer::Markers);
}
