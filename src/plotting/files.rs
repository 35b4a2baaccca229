//! Files view: one band per file plus a strip of the files' top authors.

use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::plotting::scales::{BandScale, ScaleRegistry};
use crate::plotting::scene::{
    Element, ElementKey, Label, Layer, ReconcileStats, Scene, Shape, Transform,
};
use crate::plotting::timeline;
use crate::types::FileAuthor;

/// Height above the chart the strip sits at while no file is focused.
pub const TOP_AUTHORS_Y: f64 = -20.0;

/// The top authors of every file, deduplicated by email in order of first
/// appearance, capped at `max_top_authors`.
pub fn top_authors(dataset: &Dataset, config: &ChartConfig) -> Vec<FileAuthor> {
    let mut authors: Vec<FileAuthor> = Vec::new();
    for file in dataset.files() {
        for author in file.authors.iter().take(config.top_authors_per_file) {
            if !authors.iter().any(|a| a.email == author.email) {
                authors.push(author.clone());
            }
        }
    }
    authors.truncate(config.max_top_authors);
    authors
}

/// Columns of the strip across the full chart width.
pub fn top_author_band(authors: &[FileAuthor], config: &ChartConfig) -> BandScale {
    let keys = authors.iter().map(|a| a.email.clone()).collect();
    BandScale::new(keys, (0.0, config.width()))
}

pub fn top_author_elements(
    authors: &[FileAuthor],
    band: &BandScale,
    y: f64,
) -> Vec<(ElementKey, Element)> {
    let half = band.bandwidth() / 2.0;
    authors
        .iter()
        .enumerate()
        .map(|(i, author)| {
            (
                ElementKey::TopAuthor(author.email.clone()),
                Element::new(
                    Transform::translate(band.position(i) + half, y),
                    Shape::TopAuthor {
                        name: author.name.clone(),
                    },
                ),
            )
        })
        .collect()
}

/// Show `authors` in the strip at height `y`, returning the strip's columns.
pub fn render_top_authors(
    scene: &mut Scene,
    authors: &[FileAuthor],
    y: f64,
    config: &ChartConfig,
) -> BandScale {
    let band = top_author_band(authors, config);
    scene.reconcile(
        Layer::TopAuthors,
        top_author_elements(authors, &band, y),
        std::time::Duration::ZERO,
    );
    band
}

/// Per-file commit glyphs. Zero counts draw zero-height bars.
pub fn commit_elements(
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
) -> Vec<(ElementKey, Element)> {
    let mut elements = Vec::new();
    for (file_index, file) in dataset.files().iter().enumerate() {
        let y = scales.rows.position(file_index);
        for (entry_index, entry) in file.entries.iter().enumerate() {
            let Some(commit) = dataset.commit(entry.commit_index) else {
                continue;
            };
            let transform = Transform::translate(scales.time.apply(commit.utc()), y);
            let shape =
                timeline::commit_glyph(scales, config, entry.insertions, entry.deletions, true);
            elements.push((
                ElementKey::FileCommit {
                    file: file_index,
                    entry: entry_index,
                },
                Element::new(transform, shape),
            ));
        }
    }
    elements
}

pub fn row_elements(
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
) -> Vec<(ElementKey, Element)> {
    let bw = scales.rows.bandwidth();
    dataset
        .files()
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let shape = Shape::Row {
                name: Label {
                    text: file.file.clone(),
                    at: (0.0, bw / 2.0),
                },
                count: Some(Label {
                    text: timeline::count_label(i, file.entries.len()),
                    at: (0.0, bw - 15.0),
                }),
                guide: Some(timeline::guide(scales, config)),
            };
            (
                ElementKey::FileRow(file.file.clone()),
                Element::new(timeline::row_transform(scales, i), shape),
            )
        })
        .collect()
}

/// Lay the files view out. Returns the strip's initial authors and columns.
pub fn render(
    scene: &mut Scene,
    dataset: &Dataset,
    scales: &ScaleRegistry,
    config: &ChartConfig,
) -> (Vec<FileAuthor>, BandScale, ReconcileStats) {
    let transition = config.transition();
    let stats = scene.reconcile(
        Layer::Commits,
        commit_elements(dataset, scales, config),
        transition,
    );
    scene.reconcile(Layer::Rows, row_elements(dataset, scales, config), transition);
    scene.upsert(
        ElementKey::Axis,
        timeline::axis_element(scales, config),
        transition,
    );
    let authors = top_authors(dataset, config);
    let band = render_top_authors(scene, &authors, TOP_AUTHORS_Y, config);
    // the hit surface also covers the strip above the chart
    super::mount_chrome(scene, config, -40.0);
    log::debug!(
        "Files laid out {} files, {} top authors",
        dataset.files().len(),
        authors.len()
    );
    (authors, band, stats)
}
