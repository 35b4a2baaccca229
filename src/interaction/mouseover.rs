use crate::app::nav::ViewId;
use crate::app::state::ChartContext;
use crate::interaction::hit_test::{column_at, in_bounds, nearest_at_x, rhythm_cell_at, row_at};
use crate::plotting::files::{render_top_authors, TOP_AUTHORS_Y};
use crate::plotting::rhythm::highlight_cell;
use crate::plotting::scales::BandScale;
use crate::plotting::scene::{ElementKey, Layer, Scene};
use crate::plotting::{hide_tooltip, show_tooltip};
use crate::types::{Commit, FileAuthor};
use crate::utils::time::format_commit_date;

/// Pixels above a focused file row that still count as that row, so the
/// pointer can reach the author strip.
const STRIP_HEIGHT: f64 = 20.0;

/// Pointer handlers of one sub-view.
///
/// Every handler is a no-op unless the owning view is the active one.
#[derive(Debug, Clone)]
pub struct MouseoverController {
    owner: ViewId,
    files: Option<FilesHover>,
}

/// Focus state of the files view.
#[derive(Debug, Clone)]
struct FilesHover {
    top_authors: Vec<FileAuthor>,
    strip: Vec<FileAuthor>,
    columns: BandScale,
    focused: Option<usize>,
}

impl MouseoverController {
    pub fn new(owner: ViewId) -> Self {
        Self { owner, files: None }
    }

    pub fn for_files(owner: ViewId, top_authors: Vec<FileAuthor>, columns: BandScale) -> Self {
        Self {
            owner,
            files: Some(FilesHover {
                strip: top_authors.clone(),
                top_authors,
                columns,
                focused: None,
            }),
        }
    }

    pub fn owner(&self) -> ViewId {
        self.owner
    }

    /// Focused file row, files view only.
    pub fn focused_file(&self) -> Option<usize> {
        self.files.as_ref().and_then(|files| files.focused)
    }

    pub fn pointer_move(&mut self, active: ViewId, ctx: &mut ChartContext, pos: (f64, f64)) {
        if active != self.owner {
            return;
        }
        match self.owner {
            ViewId::Timeline => timeline_move(ctx, pos),
            ViewId::RhythmHour | ViewId::RhythmWeek => rhythm_move(ctx, pos),
            ViewId::MostCommits => {
                if let Some(files) = self.files.as_mut() {
                    files.pointer_move(ctx, pos);
                }
            }
        }
    }

    pub fn pointer_leave(
        &mut self,
        active: ViewId,
        ctx: &mut ChartContext,
        pos: Option<(f64, f64)>,
    ) {
        if active != self.owner {
            return;
        }
        match self.owner {
            ViewId::Timeline => clear_hover(&mut ctx.scene),
            ViewId::RhythmHour | ViewId::RhythmWeek => reset_rhythm(ctx),
            ViewId::MostCommits => {
                if let Some(files) = self.files.as_mut() {
                    files.pointer_leave(ctx, pos);
                }
            }
        }
    }
}

fn clear_hover(scene: &mut Scene) {
    hide_tooltip(scene);
    scene.set_hovered(Layer::Rows, None);
}

fn show_commit(scene: &mut Scene, commit: &Commit, at: (f64, f64)) {
    show_tooltip(
        scene,
        at,
        commit.message.clone(),
        format!("+ {} - {}", commit.insertions, commit.deletions),
        format_commit_date(&commit.time),
    );
}

fn timeline_move(ctx: &mut ChartContext, (x, y): (f64, f64)) {
    let ChartContext {
        dataset,
        config,
        scales,
        scene,
        ..
    } = ctx;
    let Some(scales) = scales.as_ref() else {
        return;
    };
    if !in_bounds(x, y, scales.time.range().1, config.height()) {
        clear_hover(scene);
        return;
    }
    let Some(row) = row_at(&scales.rows, y) else {
        clear_hover(scene);
        return;
    };
    let author = &dataset.authors()[row];
    let commits: Vec<&Commit> = author
        .commits
        .iter()
        .filter_map(|&i| dataset.commit(i))
        .collect();
    let bw = scales.rows.bandwidth();
    match nearest_at_x(&scales.time, &commits, x, config.hit_tolerance_px, |c| c.utc()) {
        Some(best) => {
            let commit = commits[best];
            let at = (
                scales.time.apply(commit.utc()),
                scales.rows.position(row) + bw / 2.0,
            );
            show_commit(scene, commit, at);
        }
        None => hide_tooltip(scene),
    }
    let key = ElementKey::AuthorRow(author.key.clone());
    scene.set_hovered(Layer::Rows, Some(&key));
}

/// Back to the default highlight on the first cell.
fn reset_rhythm(ctx: &mut ChartContext) {
    let first = ctx.dataset.authors().first().map(|a| a.key.clone());
    highlight_cell(&mut ctx.scene, first.as_deref());
}

fn rhythm_move(ctx: &mut ChartContext, (x, y): (f64, f64)) {
    let Some(grid) = ctx.rhythm else {
        return;
    };
    let cell = in_bounds(x, y, ctx.config.width(), ctx.config.height())
        .then(|| rhythm_cell_at(&grid, x, y))
        .flatten();
    match cell {
        Some(idx) => {
            let key = ctx.dataset.authors()[idx].key.clone();
            highlight_cell(&mut ctx.scene, Some(&key));
        }
        None => reset_rhythm(ctx),
    }
}

impl FilesHover {
    fn pointer_move(&mut self, ctx: &mut ChartContext, pos: (f64, f64)) {
        self.focus_file(ctx, pos);
        self.filter_author(ctx, pos);
        self.tooltip(ctx, pos);
    }

    fn pointer_leave(&mut self, ctx: &mut ChartContext, pos: Option<(f64, f64)>) {
        if let Some((x, y)) = pos {
            // moving between rows leaves the surface without leaving the chart
            if y > 0.0 && y < ctx.config.height() {
                self.pointer_move(ctx, (x, y));
                return;
            }
        }
        self.unfocus(ctx);
        ctx.scene.update_layer(Layer::TopAuthors, |_, element| {
            element.flags.hidden = false;
        });
        clear_hover(&mut ctx.scene);
    }

    fn row_y(ctx: &ChartContext, row: usize) -> f64 {
        ctx.scales
            .as_ref()
            .map_or(0.0, |scales| scales.rows.position(row))
    }

    /// Show every file and commit and put the strip back on top.
    fn unfocus(&mut self, ctx: &mut ChartContext) {
        ctx.scene.update_layer(Layer::Rows, |_, element| element.flags.hidden = false);
        ctx.scene
            .update_layer(Layer::Commits, |_, element| element.flags.hidden = false);
        if self.focused.take().is_some() || self.strip != self.top_authors {
            self.strip = self.top_authors.clone();
            self.columns =
                render_top_authors(&mut ctx.scene, &self.strip, TOP_AUTHORS_Y, &ctx.config);
        }
    }

    fn focus_file(&mut self, ctx: &mut ChartContext, (_, y): (f64, f64)) {
        let Some(scales) = ctx.scales.as_ref() else {
            return;
        };
        if y < 0.0 {
            self.unfocus(ctx);
            return;
        }
        let Some(row) = row_at(&scales.rows, y) else {
            self.unfocus(ctx);
            return;
        };
        if self.focused == Some(row) {
            return;
        }
        if let Some(current) = self.focused {
            let top = scales.rows.position(current);
            if y > top - STRIP_HEIGHT && y < top + scales.rows.bandwidth() {
                return;
            }
        }

        let row_y = scales.rows.position(row);
        let file = &ctx.dataset.files()[row];
        self.focused = Some(row);
        self.strip = file
            .authors
            .iter()
            .take(ctx.config.max_top_authors)
            .cloned()
            .collect();
        self.columns = render_top_authors(&mut ctx.scene, &self.strip, row_y, &ctx.config);

        let path = file.file.clone();
        ctx.scene.update_layer(Layer::Rows, |key, element| {
            element.flags.hidden = !matches!(key, ElementKey::FileRow(p) if *p == path);
        });
        ctx.scene.update_layer(Layer::Commits, |key, element| {
            element.flags.hidden =
                !matches!(key, ElementKey::FileCommit { file, .. } if *file == row);
        });
        log::debug!("Focused {}", path);
    }

    /// Hovering a strip column shows only that author's commits.
    fn filter_author(&mut self, ctx: &mut ChartContext, (x, y): (f64, f64)) {
        let max_y = self.focused.map_or(0.0, |row| Self::row_y(ctx, row));
        let column = column_at(&self.columns, x).filter(|&c| c < self.strip.len());
        let Some(column) = column.filter(|_| y <= max_y) else {
            ctx.scene.update_layer(Layer::TopAuthors, |_, element| {
                element.flags.hidden = false;
            });
            if let Some(row) = self.focused {
                ctx.scene.update_layer(Layer::Commits, |key, element| {
                    if matches!(key, ElementKey::FileCommit { file, .. } if *file == row) {
                        element.flags.hidden = false;
                    }
                });
            }
            return;
        };

        let author = &self.strip[column];
        let focused = self.focused;
        let dataset = &ctx.dataset;
        ctx.scene.update_layer(Layer::Commits, |key, element| {
            if let ElementKey::FileCommit { file, entry } = key {
                let by_author = dataset
                    .files()
                    .get(*file)
                    .and_then(|info| info.entries.get(*entry))
                    .and_then(|entry| dataset.commit(entry.commit_index))
                    .map_or(false, |commit| {
                        commit.email == author.email
                            || commit.name.as_deref() == Some(author.name.as_str())
                    });
                let in_file = focused.map_or(true, |row| row == *file);
                element.flags.hidden = !(by_author && in_file);
            }
        });
        let email = author.email.clone();
        ctx.scene.update_layer(Layer::TopAuthors, |key, element| {
            element.flags.hidden = !matches!(key, ElementKey::TopAuthor(e) if *e == email);
        });
    }

    /// Tooltip for the nearest commit of the focused row.
    fn tooltip(&self, ctx: &mut ChartContext, (x, y): (f64, f64)) {
        let ChartContext {
            dataset,
            config,
            scales,
            scene,
            ..
        } = ctx;
        let Some(scales) = scales.as_ref() else {
            return;
        };
        let hovered = row_at(&scales.rows, y).filter(|&row| Some(row) == self.focused);
        let Some(row) = hovered else {
            clear_hover(scene);
            return;
        };
        let file = &dataset.files()[row];
        let commits: Vec<&Commit> = file
            .by_time
            .iter()
            .filter_map(|&i| file.entries.get(i))
            .filter_map(|entry| dataset.commit(entry.commit_index))
            .collect();
        match nearest_at_x(&scales.time, &commits, x, config.hit_tolerance_px, |c| c.utc()) {
            Some(best) => {
                let commit = commits[best];
                let at = (
                    scales.time.apply(commit.utc()),
                    scales.rows.position(row) + scales.rows.bandwidth() / 2.0,
                );
                show_commit(scene, commit, at);
            }
            None => hide_tooltip(scene),
        }
        let key = ElementKey::FileRow(file.file.clone());
        scene.set_hovered(Layer::Rows, Some(&key));
    }
}
