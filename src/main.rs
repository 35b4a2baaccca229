//! Git Activity Charts
//!
//! Opens an interactive chart of a repository payload, or writes a PNG
//! snapshot of one view with `--snapshot`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;

use gitviz::app::{AppWrapper, GitVizApp};
use gitviz::{load_dataset_async, Chart, ChartConfig, ViewId};

#[derive(Parser, Debug)]
#[command(name = "gitviz", version, about = "Interactive charts of Git repository activity")]
struct Args {
    /// Repository payload (JSON)
    payload: PathBuf,

    /// Chart configuration (TOML); defaults to the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to open: timeline, hourly, weekly or files
    #[arg(long, default_value = "timeline")]
    view: String,

    /// Write a PNG of the view instead of opening a window
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let view = ViewId::from_cli(&args.view).ok_or_else(|| {
        anyhow!(
            "unknown view {:?}; expected timeline, hourly, weekly or files",
            args.view
        )
    })?;
    let config = ChartConfig::resolve(args.config.as_deref()).context("loading chart config")?;

    let rt = Runtime::new().context("starting tokio runtime")?;
    let dataset = rt
        .block_on(load_dataset_async(&args.payload))
        .with_context(|| format!("loading {}", args.payload.display()))?;

    if let Some(path) = args.snapshot {
        let mut chart = Chart::new(
            dataset,
            ChartConfig {
                transition_ms: 0,
                ..config.clone()
            },
        );
        chart.select(view);
        gitviz::plotting::render_png(chart.scene(), &config, &path)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    let mut chart = Chart::new(dataset, config.clone());
    chart.select(view);
    let app = Arc::new(Mutex::new(GitVizApp::new(chart)));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                (config.outer_width + 40.0) as f32,
                (config.outer_height + 40.0) as f32,
            ])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Git Activity"),
        ..Default::default()
    };
    eframe::run_native(
        "Git Activity",
        options,
        Box::new(|_cc| Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)),
    )
    .map_err(|e| anyhow!("running window: {}", e))?;
    Ok(())
}
