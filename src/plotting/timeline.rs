//! Linear-by-date layout: one band per author, commits placed by time.

use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::plotting::scales::{Change, ScaleRegistry};
use crate::plotting::scene::{
    Bar, Element, ElementKey, Guide, Label, Layer, ReconcileStats, Scene, Shape, Transform,
};

/// Number of intervals on the time axis.
pub const AXIS_TICKS: usize = 8;

/// Insertion bar above the band center, deletion bar below it.
///
/// With `skip_zero` a zero count gets a zero-height bar instead of the
/// magnitude scale's minimum length.
pub fn commit_glyph(
    scales: &ScaleRegistry,
    config: &ChartConfig,
    insertions: u64,
    deletions: u64,
    skip_zero: bool,
) -> Shape {
    let half = scales.rows.bandwidth() / 2.0;
    let bar = |value: u64, change: Change| {
        let color = scales.stat_color(value, change);
        if skip_zero && value == 0 {
            return Bar {
                y: 0.0,
                height: 0.0,
                color,
            };
        }
        let length = scales.bar_length(value);
        let y = match change {
            Change::Insertions => half - config.bar_separation - length,
            Change::Deletions => half,
        };
        Bar {
            y,
            height: length,
            color,
        }
    };
    Shape::Commit {
        insertion: bar(insertions, Change::Insertions),
        deletion: bar(deletions, Change::Deletions),
        width: config.commit_bar_width,
    }
}

/// Commit glyphs at `(time(t), rows(author))`. Commits without an author row are skipped.
pub fn commit_elements(
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
) -> Vec<(ElementKey, Element)> {
    dataset
        .commits()
        .filter_map(|commit| {
            let row = dataset.author_row_for_commit(commit)?;
            let transform =
                Transform::translate(scales.time.apply(commit.utc()), scales.rows.position(row));
            let shape = commit_glyph(scales, config, commit.insertions, commit.deletions, false);
            Some((ElementKey::Commit(commit.index), Element::new(transform, shape)))
        })
        .collect()
}

/// Guide line behind a row, spanning the time range to the row's left.
pub fn guide(scales: &ScaleRegistry, config: &ChartConfig) -> Guide {
    let (r0, r1) = scales.time.range();
    Guide {
        x: -(r1 - r0),
        y: scales.rows.bandwidth() / 2.0 - config.bar_separation / 2.0,
        width: r1 - r0,
    }
}

/// The transform of every row label: just past the end of the time range.
pub fn row_transform(scales: &ScaleRegistry, row: usize) -> Transform {
    Transform::translate(scales.time.range().1 + 10.0, scales.rows.position(row))
}

pub fn count_label(row: usize, count: usize) -> String {
    if row == 0 {
        format!("{} commits", count)
    } else {
        count.to_string()
    }
}

pub fn row_elements(
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
) -> Vec<(ElementKey, Element)> {
    let bw = scales.rows.bandwidth();
    dataset
        .authors()
        .iter()
        .enumerate()
        .map(|(i, author)| {
            let shape = Shape::Row {
                name: Label {
                    text: author.label(),
                    at: (0.0, bw / 2.0),
                },
                count: Some(Label {
                    text: count_label(i, author.commit_count()),
                    at: (0.0, bw - 10.0),
                }),
                guide: Some(guide(scales, config)),
            };
            (
                ElementKey::AuthorRow(author.key.clone()),
                Element::new(row_transform(scales, i), shape),
            )
        })
        .collect()
}

pub fn axis_element(scales: &ScaleRegistry, config: &ChartConfig) -> Element {
    let (r0, r1) = scales.time.range();
    Element::new(
        Transform::translate(0.0, config.height()),
        Shape::Axis {
            length: r1 - r0,
            ticks: scales.time.ticks(AXIS_TICKS),
        },
    )
}

/// Lay the commits view out as a timeline.
pub fn render(
    scene: &mut Scene,
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
) -> ReconcileStats {
    let transition = config.transition();
    let stats = scene.reconcile(
        Layer::Commits,
        commit_elements(dataset, scales, config),
        transition,
    );
    scene.reconcile(Layer::Rows, row_elements(dataset, scales, config), transition);
    scene.upsert(ElementKey::Axis, axis_element(scales, config), transition);
    super::mount_chrome(scene, config, 0.0);
    log::debug!(
        "Timeline laid out {} authors, {:?}",
        dataset.authors().len(),
        stats
    );
    stats
}

/// Drop the timeline-only decorations: axis, counts, guides and hover.
pub fn clear(scene: &mut Scene) {
    scene.remove(&ElementKey::Axis);
    scene.update_layer(Layer::Rows, |_, element| {
        element.flags.hovered = false;
        if let Shape::Row { count, guide, .. } = &mut element.shape {
            *count = None;
            *guide = None;
        }
    });
    super::hide_tooltip(scene);
}
