//! Navigation: the commits/files switch and each view's sub-navigation.

use crate::types::RhythmKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopView {
    Commits,
    Files,
}

impl TopView {
    pub const ALL: [TopView; 2] = [TopView::Commits, TopView::Files];

    pub fn label(self) -> &'static str {
        match self {
            TopView::Commits => "Commits",
            TopView::Files => "Files",
        }
    }

    /// Sub-views in navigation order. The first is entered by default.
    pub fn items(self) -> &'static [ViewId] {
        match self {
            TopView::Commits => &[ViewId::Timeline, ViewId::RhythmHour, ViewId::RhythmWeek],
            TopView::Files => &[ViewId::MostCommits],
        }
    }

    pub fn first(self) -> ViewId {
        self.items()[0]
    }
}

/// A sub-view; identifies the enter/exit actions to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Timeline,
    RhythmHour,
    RhythmWeek,
    MostCommits,
}

impl ViewId {
    pub fn name(self) -> &'static str {
        match self {
            ViewId::Timeline => "timeline",
            ViewId::RhythmHour => "rhythm-hour",
            ViewId::RhythmWeek => "rhythm-week",
            ViewId::MostCommits => "most-commits",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewId::Timeline => "Timeline",
            ViewId::RhythmHour => "Hourly",
            ViewId::RhythmWeek => "Weekly",
            ViewId::MostCommits => "Most Commits",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ViewId::Timeline => "All commits by top authors",
            ViewId::RhythmHour => "What time of day do authors commit their work?",
            ViewId::RhythmWeek => "What day of the week do authors commit their work?",
            ViewId::MostCommits => "The most committed files",
        }
    }

    pub fn top(self) -> TopView {
        match self {
            ViewId::MostCommits => TopView::Files,
            _ => TopView::Commits,
        }
    }

    pub fn rhythm(self) -> Option<RhythmKind> {
        match self {
            ViewId::RhythmHour => Some(RhythmKind::HourOfDay),
            ViewId::RhythmWeek => Some(RhythmKind::DayOfWeek),
            _ => None,
        }
    }

    /// Parse a CLI view name: `timeline`, `hourly`, `weekly` or `files`.
    pub fn from_cli(name: &str) -> Option<Self> {
        match name {
            "timeline" => Some(ViewId::Timeline),
            "hourly" | "rhythm-hour" => Some(ViewId::RhythmHour),
            "weekly" | "rhythm-week" => Some(ViewId::RhythmWeek),
            "files" | "most-commits" => Some(ViewId::MostCommits),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: ViewId,
    pub label: &'static str,
    pub description: &'static str,
}

impl From<ViewId> for NavItem {
    fn from(id: ViewId) -> Self {
        Self {
            id,
            label: id.label(),
            description: id.description(),
        }
    }
}

/// The sub-navigation of one top-level view, with its selected item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubNav {
    items: Vec<NavItem>,
    selected: usize,
}

impl SubNav {
    pub fn for_view(top: TopView) -> Self {
        Self {
            items: top.items().iter().copied().map(NavItem::from).collect(),
            selected: 0,
        }
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn selected(&self) -> NavItem {
        self.items[self.selected]
    }

    /// Mark `id` as selected. Returns false when it is not in this navigation.
    pub fn select(&mut self, id: ViewId) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    /// Line shown under the navigation, e.g. "→ All commits by top authors".
    pub fn description_line(&self) -> String {
        format!("→ {}", self.selected().description)
    }
}
