//! PNG snapshots of a scene, drawn with plotters.
//!
//! Only geometry is rasterised; labels are left to the interactive window.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use crate::config::ChartConfig;
use crate::error::{VizError, VizResult};
use crate::plotting::scene::{Bar, Element, Scene, Shape, Transform};
use crate::plotting::styles::{ChartStyle, ChartTheme};

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn render_err<E: std::fmt::Display>(e: E) -> VizError {
    VizError::Render(e.to_string())
}

/// Pixel size of a snapshot: the chart plus its margins.
pub fn canvas_size(config: &ChartConfig) -> (u32, u32) {
    let width = config.width() + config.margin.left + config.margin.right;
    let height = config.height() + config.margin.top + config.margin.bottom;
    (width.round().max(1.0) as u32, height.round().max(1.0) as u32)
}

/// Draw `scene` at its final (settled) geometry into a PNG at `path`.
pub fn render_png(scene: &Scene, config: &ChartConfig, path: &Path) -> VizResult<()> {
    let theme = ChartTheme::default();
    let style = ChartStyle::default();
    let root = BitMapBackend::new(path, canvas_size(config)).into_drawing_area();
    root.fill(&theme.background_color).map_err(render_err)?;

    let origin = (config.margin.left, config.margin.top);
    for (_, element) in scene.iter() {
        if element.flags.hidden {
            continue;
        }
        draw_element(&root, origin, element, &theme, &style)?;
    }
    root.present().map_err(render_err)?;
    log::info!("Wrote snapshot {}", path.display());
    Ok(())
}

fn to_pixel(origin: (f64, f64), (x, y): (f64, f64)) -> (i32, i32) {
    ((origin.0 + x).round() as i32, (origin.1 + y).round() as i32)
}

fn draw_element(
    root: &Area,
    origin: (f64, f64),
    element: &Element,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> VizResult<()> {
    let transform = &element.transform;
    match &element.shape {
        Shape::Commit {
            insertion,
            deletion,
            width,
        } => {
            draw_bar(root, origin, transform, insertion, *width)?;
            draw_bar(root, origin, transform, deletion, *width)?;
        }
        Shape::Row { guide, .. } => {
            if let Some(guide) = guide {
                let color = if element.flags.hovered {
                    theme.hover_color
                } else {
                    theme.grid_color
                };
                let points = vec![
                    to_pixel(origin, transform.apply((guide.x, guide.y))),
                    to_pixel(origin, transform.apply((guide.x + guide.width, guide.y))),
                ];
                root.draw(&PathElement::new(points, ShapeStyle::from(&color)))
                    .map_err(render_err)?;
            }
        }
        Shape::Marker { .. } => {
            let color = if element.flags.highlighted {
                theme.axis_color
            } else {
                theme.grid_color
            };
            let points = vec![
                to_pixel(origin, transform.apply((0.0, 0.0))),
                to_pixel(origin, transform.apply((0.0, style.marker_tick))),
            ];
            root.draw(&PathElement::new(points, ShapeStyle::from(&color)))
                .map_err(render_err)?;
        }
        Shape::Axis { length, ticks } => {
            let axis = ShapeStyle::from(&theme.axis_color);
            let line = vec![
                to_pixel(origin, transform.apply((0.0, 0.0))),
                to_pixel(origin, transform.apply((*length, 0.0))),
            ];
            root.draw(&PathElement::new(line, axis)).map_err(render_err)?;
            for (x, _) in ticks {
                let tick = vec![
                    to_pixel(origin, transform.apply((*x, 0.0))),
                    to_pixel(origin, transform.apply((*x, 6.0))),
                ];
                root.draw(&PathElement::new(tick, axis)).map_err(render_err)?;
            }
        }
        Shape::Tooltip { .. } => {
            let (w, h) = style.tooltip_size;
            let top_left = to_pixel(origin, transform.apply((10.0, 10.0)));
            let bottom_right = to_pixel(origin, transform.apply((10.0 + w, 10.0 + h)));
            root.draw(&Rectangle::new(
                [top_left, bottom_right],
                theme.tooltip_background.filled(),
            ))
            .map_err(render_err)?;
        }
        Shape::TopAuthor { .. } | Shape::HitSurface { .. } => {}
    }
    Ok(())
}

/// Bars may be rotated, so they are drawn as polygons.
fn draw_bar(
    root: &Area,
    origin: (f64, f64),
    transform: &Transform,
    bar: &Bar,
    width: f64,
) -> VizResult<()> {
    if bar.height <= 0.0 {
        return Ok(());
    }
    let corners = [
        (0.0, bar.y),
        (width, bar.y),
        (width, bar.y + bar.height),
        (0.0, bar.y + bar.height),
    ];
    let points: Vec<(i32, i32)> = corners
        .iter()
        .map(|&corner| to_pixel(origin, transform.apply(corner)))
        .collect();
    root.draw(&Polygon::new(points, bar.color.filled()))
        .map_err(render_err)?;
    Ok(())
}
