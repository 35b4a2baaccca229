use crate::app::nav::{SubNav, TopView, ViewId};
use crate::config::ChartConfig;
use crate::dataset::Dataset;
use crate::error::VizResult;
use crate::interaction::MouseoverController;
use crate::plotting::rhythm::{self, RhythmGrid};
use crate::plotting::scene::Scene;
use crate::plotting::{files, hide_tooltip, timeline, Layer, ScaleRegistry};

/// Everything the layouts and pointer handlers work against.
pub struct ChartContext {
    pub dataset: Dataset,
    pub config: ChartConfig,
    /// Scales of the active top-level view; `None` when it has nothing to show
    pub scales: Option<ScaleRegistry>,
    /// Cell grid while a rhythm view is active
    pub rhythm: Option<RhythmGrid>,
    pub scene: Scene,
}

/// The active top-level view and sub-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub top: TopView,
    pub sub: ViewId,
}

/// Interactive chart: the view state machine over a [`ChartContext`].
pub struct Chart {
    ctx: ChartContext,
    state: ViewState,
    sub_nav: SubNav,
    mouseover: Option<MouseoverController>,
}

impl Chart {
    /// Lay out the first view of the commits group.
    pub fn new(dataset: Dataset, config: ChartConfig) -> Self {
        let mut chart = Self {
            ctx: ChartContext {
                dataset,
                config,
                scales: None,
                rhythm: None,
                scene: Scene::new(),
            },
            state: ViewState {
                top: TopView::Commits,
                sub: ViewId::Timeline,
            },
            sub_nav: SubNav::for_view(TopView::Commits),
            mouseover: None,
        };
        chart.enter_top(TopView::Commits);
        chart
    }

    pub fn context(&self) -> &ChartContext {
        &self.ctx
    }

    pub fn scene(&self) -> &Scene {
        &self.ctx.scene
    }

    pub fn view(&self) -> ViewState {
        self.state
    }

    pub fn sub_nav(&self) -> &SubNav {
        &self.sub_nav
    }

    /// Switch between commits and files. Returns false for a self-transition.
    pub fn select_top(&mut self, top: TopView) -> bool {
        if top == self.state.top {
            return false;
        }
        log::info!("Switching to {} view", top.label());
        self.exit_top();
        self.enter_top(top);
        true
    }

    /// Switch sub-view within the active top-level view.
    ///
    /// Selecting the active item, or one from the other view's navigation,
    /// changes nothing and returns false.
    pub fn select_sub(&mut self, id: ViewId) -> bool {
        if id == self.state.sub {
            return false;
        }
        if id.top() != self.state.top {
            log::warn!(
                "Ignoring {}: not part of the {} navigation",
                id.name(),
                self.state.top.label()
            );
            return false;
        }
        self.exit_sub(self.state.sub);
        self.sub_nav.select(id);
        self.state.sub = id;
        self.enter_sub(id);
        true
    }

    /// Show `id`, switching the top-level view first when needed.
    pub fn select(&mut self, id: ViewId) -> bool {
        let switched = self.select_top(id.top());
        self.select_sub(id) || switched
    }

    pub fn pointer_move(&mut self, pos: (f64, f64)) {
        if let Some(controller) = self.mouseover.as_mut() {
            controller.pointer_move(self.state.sub, &mut self.ctx, pos);
        }
    }

    pub fn pointer_leave(&mut self, pos: Option<(f64, f64)>) {
        if let Some(controller) = self.mouseover.as_mut() {
            controller.pointer_leave(self.state.sub, &mut self.ctx, pos);
        }
    }

    /// Jump every animation to its end.
    pub fn settle(&mut self) {
        self.ctx.scene.settle();
    }

    fn top_scales(&self, top: TopView) -> VizResult<ScaleRegistry> {
        let dataset = &self.ctx.dataset;
        let config = &self.ctx.config;
        Ok(match top {
            TopView::Commits => {
                ScaleRegistry::for_commits(dataset, dataset.commits_view_extent()?, config)
            }
            TopView::Files => {
                ScaleRegistry::for_files(dataset, dataset.files_view_extent()?, config)
            }
        })
    }

    fn enter_top(&mut self, top: TopView) {
        self.state = ViewState {
            top,
            sub: top.first(),
        };
        self.sub_nav = SubNav::for_view(top);
        self.ctx.scales = match self.top_scales(top) {
            Ok(scales) => Some(scales),
            Err(e) => {
                log::error!("Cannot render the {} view: {}", top.label(), e);
                None
            }
        };
        self.enter_sub(top.first());
    }

    fn exit_top(&mut self) {
        self.exit_sub(self.state.sub);
        self.ctx.scene.clear();
        self.ctx.scales = None;
    }

    fn enter_sub(&mut self, id: ViewId) {
        let ChartContext {
            dataset,
            config,
            scales,
            rhythm,
            scene,
        } = &mut self.ctx;
        let Some(scales) = scales.as_ref() else {
            log::warn!("Nothing to show for {}", id.name());
            return;
        };
        let controller = match id {
            ViewId::Timeline => {
                timeline::render(scene, dataset, scales, config);
                MouseoverController::new(id)
            }
            ViewId::RhythmHour | ViewId::RhythmWeek => {
                let kind = match id.rhythm() {
                    Some(kind) => kind,
                    None => return,
                };
                let (grid, _) = rhythm::render(scene, dataset, scales, config, kind);
                *rhythm = Some(grid);
                MouseoverController::new(id)
            }
            ViewId::MostCommits => {
                let (authors, columns, _) = files::render(scene, dataset, scales, config);
                MouseoverController::for_files(id, authors, columns)
            }
        };
        self.mouseover = Some(controller);
        log::debug!("Entered {}", id.name());
    }

    fn exit_sub(&mut self, id: ViewId) {
        let scene = &mut self.ctx.scene;
        match id {
            ViewId::Timeline => timeline::clear(scene),
            ViewId::RhythmHour | ViewId::RhythmWeek => {
                rhythm::clear(scene);
                self.ctx.rhythm = None;
            }
            ViewId::MostCommits => {}
        }
        scene.set_hovered(Layer::Rows, None);
        hide_tooltip(scene);
        self.mouseover = None;
        log::debug!("Exited {}", id.name());
    }
}
