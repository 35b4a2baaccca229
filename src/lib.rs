//! # Git Repository Activity Charts
//!
//! `gitviz` turns a pre-aggregated repository payload (authors, commits,
//! per-file changes and line-change statistics) into an interactive chart.
//! Commits can be shown on a timeline, wrapped around the hours of the day
//! or the days of the week, or grouped by the files they touched.
//!
//! The chart is a retained [`plotting::Scene`]: layouts reconcile keyed
//! elements into it, pointer handlers toggle hover and visibility flags, and
//! a backend (the egui window or a PNG snapshot) draws it.
//!
//! ## Example
//!
//! ```no_run
//! use gitviz::{Chart, ChartConfig, Dataset, ViewId};
//!
//! let json = std::fs::read_to_string("repo.json")?;
//! let dataset = Dataset::from_json_str(&json)?;
//! let mut chart = Chart::new(dataset, ChartConfig::without_transitions());
//! chart.select(ViewId::RhythmWeek);
//! gitviz::plotting::render_png(chart.scene(), &ChartConfig::default(), "week.png".as_ref())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod app;
pub mod config;
pub mod dataset;
pub mod error;
pub mod interaction;
pub mod plotting;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export main types for convenience
pub use app::{Chart, TopView, ViewId};
pub use config::ChartConfig;
pub use dataset::{load_dataset_async, Dataset};
pub use error::{VizError, VizResult};
