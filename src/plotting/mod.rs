pub mod files;
pub mod raster;
pub mod rhythm;
pub mod scales;
pub mod scene;
pub mod styles;
pub mod timeline;


pub use raster::render_png;
pub use scales::ScaleRegistry;
pub use scene::{Element, ElementKey, Layer, Scene, Shape, Transform};

use std::time::Duration;

use crate::config::ChartConfig;

/// Ensure the transparent hit surface and the (hidden) tooltip exist.
///
/// `y_offset` extends the surface above the chart.
pub fn mount_chrome(scene: &mut Scene, config: &ChartConfig, y_offset: f64) {
    scene.upsert(
        ElementKey::HitSurface,
        Element::new(
            Transform::default(),
            Shape::HitSurface {
                y: y_offset,
                width: config.width(),
                height: config.height() - y_offset,
            },
        ),
        Duration::ZERO,
    );
    if !scene.contains(&ElementKey::Tooltip) {
        let tooltip = Element::new(
            Transform::default(),
            Shape::Tooltip {
                message: String::new(),
                stats: String::new(),
                date: String::new(),
            },
        )
        .hidden();
        scene.upsert(ElementKey::Tooltip, tooltip, Duration::ZERO);
    }
}

/// Move the tooltip to `at` and show it.
pub fn show_tooltip(
    scene: &mut Scene,
    at: (f64, f64),
    message: String,
    stats: String,
    date: String,
) {
    scene.upsert(
        ElementKey::Tooltip,
        Element::new(
            Transform::translate(at.0, at.1),
            Shape::Tooltip {
                message,
                stats,
                date,
            },
        ),
        Duration::ZERO,
    );
    if let Some(tooltip) = scene.get_mut(&ElementKey::Tooltip) {
        tooltip.flags.hidden = false;
    }
}

pub fn hide_tooltip(scene: &mut Scene) {
    if let Some(tooltip) = scene.get_mut(&ElementKey::Tooltip) {
        tooltip.flags.hidden = true;
    }
}

pub fn tooltip_visible(scene: &Scene) -> bool {
    scene
        .get(&ElementKey::Tooltip)
        .map_or(false, |tooltip| !tooltip.flags.hidden)
}
