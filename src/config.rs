//! # Chart Configuration
//!
//! Viewport metrics and interaction tuning. Everything has a default, so an
//! empty or partial TOML file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{VizError, VizResult};

/// Width of the navigation side panel, outside the drawing area.
pub const SIDE_PANEL_RESERVE: f64 = 200.0;
/// Height of the navigation bar above the drawing area.
pub const NAV_BAR_RESERVE: f64 = 80.0;

/// Space reserved around the plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 40.0,
            right: 30.0,
            bottom: 60.0,
            left: 50.0,
        }
    }
}

/// Chart configuration loaded from `gitviz.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Width of the whole drawing surface
    pub outer_width: f64,
    /// Height of the whole drawing surface
    pub outer_height: f64,
    pub margin: Margin,
    /// Horizontal space kept right of the time axis for row labels
    pub author_panel_width: f64,
    /// Vertical gap between insertion and deletion bars
    pub bar_separation: f64,
    pub commit_bar_width: f64,
    /// Duration of layout-changing animations, in milliseconds
    pub transition_ms: u64,
    /// Maximum horizontal distance between pointer and commit for a tooltip
    pub hit_tolerance_px: f64,
    /// Radius left empty at the center of each rhythm cell
    pub inner_radius: f64,
    pub cells_per_row: usize,
    pub top_authors_per_file: usize,
    pub max_top_authors: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            outer_width: 1560.0,
            outer_height: 800.0,
            margin: Margin::default(),
            author_panel_width: 200.0,
            bar_separation: 0.0,
            commit_bar_width: 1.5,
            transition_ms: 4000,
            hit_tolerance_px: 5.0,
            inner_radius: 30.0,
            cells_per_row: 7,
            top_authors_per_file: 5,
            max_top_authors: 10,
        }
    }
}

impl ChartConfig {
    /// Config with every animation disabled.
    pub fn without_transitions() -> Self {
        Self {
            transition_ms: 0,
            ..Self::default()
        }
    }

    /// Plotting width: the outer width minus the side panel and margins.
    /// The author panel is carved out of this width, not subtracted here.
    pub fn width(&self) -> f64 {
        (self.outer_width - SIDE_PANEL_RESERVE - self.margin.left - self.margin.right).max(0.0)
    }

    /// Plotting height: the outer height minus the nav bar and margins.
    pub fn height(&self) -> f64 {
        (self.outer_height - NAV_BAR_RESERVE - self.margin.top - self.margin.bottom).max(0.0)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn from_toml_str(content: &str) -> VizResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> VizResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| VizError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from an explicit path, else from the user config directory, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> VizResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                log::info!("Loading chart config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `~/.config/gitviz/gitviz.toml` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gitviz").join("gitviz.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_metrics() {
        let config = ChartConfig::default();
        assert_eq!(config.width(), 1280.0);
        assert_eq!(config.height(), 620.0);
        assert_eq!(config.transition(), Duration::from_secs(4));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChartConfig::from_toml_str(
            "transition_ms = 0\n[margin]\nleft = 10.0\n",
        )
        .unwrap();
        assert_eq!(config.transition_ms, 0);
        assert_eq!(config.margin.left, 10.0);
        assert_eq!(config.margin.top, 40.0);
        assert_eq!(config.cells_per_row, 7);
    }

    #[test]
    fn test_invalid_toml() {
        let result = ChartConfig::from_toml_str("transition_ms = \"slow\"");
        assert!(matches!(result, Err(VizError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gitviz.toml");
        std::fs::write(&path, "outer_width = 1000.0\n").unwrap();

        let config = ChartConfig::resolve(Some(&path)).unwrap();
        assert_eq!(config.outer_width, 1000.0);
        assert_eq!(config.width(), 720.0);
    }

    #[test]
    fn test_author_panel_does_not_shrink_plot_width() {
        let config = ChartConfig {
            author_panel_width: 320.0,
            ..ChartConfig::default()
        };
        assert_eq!(
            config.width(),
            config.outer_width - SIDE_PANEL_RESERVE - config.margin.left - config.margin.right
        );
        assert_eq!(config.width(), ChartConfig::default().width());
        assert_eq!(
            config.height(),
            config.outer_height - NAV_BAR_RESERVE - config.margin.top - config.margin.bottom
        );
    }
}
