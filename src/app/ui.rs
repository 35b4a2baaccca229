use eframe::App as EApp;
use egui::epaint::TextShape;
use egui::{Align2, Color32, Context, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use plotters::style::{RGBAColor, RGBColor};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::nav::TopView;
use super::state::Chart;
use crate::plotting::scene::{Bar, Element, Shape, Transform};
use crate::plotting::styles::{ChartStyle, ChartTheme};

/// Window state around the interactive chart.
pub struct GitVizApp {
    pub chart: Chart,
    pub theme: ChartTheme,
    pub style: ChartStyle,
    /// Start of the running layout transition
    transition_started: Instant,
    last_pointer: Option<(f64, f64)>,
}

impl GitVizApp {
    pub fn new(chart: Chart) -> Self {
        Self {
            chart,
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
            transition_started: Instant::now(),
            last_pointer: None,
        }
    }

    fn restart_transition(&mut self) {
        self.transition_started = Instant::now();
    }

    /// Time into the running transition; settles the scene once it is over.
    fn transition_elapsed(&mut self) -> Option<Duration> {
        let elapsed = self.transition_started.elapsed();
        if elapsed >= self.chart.context().config.transition() {
            self.chart.settle();
            return None;
        }
        Some(elapsed)
    }
}

/// Thread-safe wrapper around GitVizApp for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<GitVizApp>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            draw_ui(&mut app, ctx);
        } else {
            log::error!("Failed to acquire app lock in update");
        }
    }
}

fn rgb(color: RGBColor) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

fn rgba(color: RGBAColor) -> Color32 {
    let alpha = (color.3.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.0, color.1, color.2, alpha)
}

/// Draw the navigation and the chart, and route pointer events into it.
pub fn draw_ui(app: &mut GitVizApp, ctx: &Context) {
    egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let active = app.chart.view();
            for top in TopView::ALL {
                if ui.selectable_label(active.top == top, top.label()).clicked()
                    && app.chart.select_top(top)
                {
                    app.restart_transition();
                }
            }
        });
        ui.horizontal(|ui| {
            let active = app.chart.view();
            let items = app.chart.sub_nav().items().to_vec();
            for item in items {
                if ui.selectable_label(active.sub == item.id, item.label).clicked()
                    && app.chart.select_sub(item.id)
                {
                    app.restart_transition();
                }
            }
            ui.label(app.chart.sub_nav().description_line());
        });
    });

    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        let dataset = &app.chart.context().dataset;
        ui.label(format!(
            "{} commits · {} authors · {} files · {} data issues",
            dataset.commits().count(),
            dataset.authors().len(),
            dataset.files().len(),
            dataset.issues().len()
        ));
        #[cfg(feature = "dev")]
        ui.label(format!(
            "scene: {} elements, revision {}",
            app.chart.scene().len(),
            app.chart.scene().revision()
        ));
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        let config = app.chart.context().config.clone();
        let size = Vec2::new(
            (config.width() + config.margin.left + config.margin.right) as f32,
            (config.height() + config.margin.top + config.margin.bottom) as f32,
        );
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        painter.rect_filled(response.rect, 0.0, rgba(app.theme.background_color));
        let origin =
            response.rect.min + Vec2::new(config.margin.left as f32, config.margin.top as f32);

        match response.hover_pos() {
            Some(pos) => {
                let local = ((pos.x - origin.x) as f64, (pos.y - origin.y) as f64);
                if app.last_pointer != Some(local) {
                    app.chart.pointer_move(local);
                    app.last_pointer = Some(local);
                }
            }
            None => {
                if let Some(last) = app.last_pointer.take() {
                    app.chart.pointer_leave(Some(last));
                }
            }
        }

        let elapsed = app.transition_elapsed();
        let painter = ScenePainter {
            painter: &painter,
            origin,
            theme: &app.theme,
            style: &app.style,
        };
        for (_, element) in app.chart.scene().iter() {
            if !element.flags.hidden {
                painter.element(element, elapsed);
            }
        }
        if elapsed.is_some() {
            ctx.request_repaint();
        }
    });
}

struct ScenePainter<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    theme: &'a ChartTheme,
    style: &'a ChartStyle,
}

impl ScenePainter<'_> {
    fn at(&self, transform: &Transform, point: (f64, f64)) -> Pos2 {
        let (x, y) = transform.apply(point);
        Pos2::new(self.origin.x + x as f32, self.origin.y + y as f32)
    }

    fn text(&self, pos: Pos2, text: &str, size: f32, color: Color32, angle: f32) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_string(), FontId::proportional(size), color);
        self.painter
            .add(TextShape::new(pos, galley, color).with_angle(angle));
    }

    fn bar(&self, transform: &Transform, bar: &Bar, width: f64) {
        if bar.height <= 0.0 {
            return;
        }
        let points = vec![
            self.at(transform, (0.0, bar.y)),
            self.at(transform, (width, bar.y)),
            self.at(transform, (width, bar.y + bar.height)),
            self.at(transform, (0.0, bar.y + bar.height)),
        ];
        self.painter.add(egui::Shape::convex_polygon(
            points,
            rgb(bar.color),
            Stroke::NONE,
        ));
    }

    fn element(&self, element: &Element, elapsed: Option<Duration>) {
        let transform = match elapsed {
            Some(elapsed) => element.transform_at(elapsed),
            None => element.transform,
        };
        let text_color = rgba(self.theme.text_color);
        match &element.shape {
            Shape::Commit {
                insertion,
                deletion,
                width,
            } => {
                self.bar(&transform, insertion, *width);
                self.bar(&transform, deletion, *width);
            }
            Shape::Row { name, count, guide } => {
                let color = if element.flags.hovered {
                    rgba(self.theme.hover_color)
                } else {
                    text_color
                };
                if let Some(guide) = guide {
                    let stroke = Stroke::new(0.5, color.gamma_multiply(0.4));
                    self.painter.line_segment(
                        [
                            self.at(&transform, (guide.x, guide.y)),
                            self.at(&transform, (guide.x + guide.width, guide.y)),
                        ],
                        stroke,
                    );
                }
                self.painter.text(
                    self.at(&transform, name.at),
                    Align2::LEFT_CENTER,
                    &name.text,
                    FontId::proportional(self.style.font_size),
                    color,
                );
                if let Some(count) = count {
                    self.painter.text(
                        self.at(&transform, count.at),
                        Align2::LEFT_BOTTOM,
                        &count.text,
                        FontId::proportional(self.style.small_font_size),
                        rgba(self.theme.muted_text_color),
                    );
                }
            }
            Shape::Marker {
                label,
                label_transform,
            } => {
                let color = if element.flags.highlighted {
                    rgba(self.theme.axis_color)
                } else {
                    rgba(self.theme.grid_color)
                };
                self.painter.line_segment(
                    [
                        self.at(&transform, (0.0, 0.0)),
                        self.at(&transform, (0.0, self.style.marker_tick)),
                    ],
                    Stroke::new(1.0, color),
                );
                if let (Some(label), true) = (label, element.flags.highlighted) {
                    let anchor = transform.apply(label_transform.translate);
                    let angle = (transform.rotate + label_transform.rotate).to_radians() as f32;
                    let pos = Pos2::new(
                        self.origin.x + anchor.0 as f32,
                        self.origin.y + anchor.1 as f32,
                    );
                    self.text(pos, label, self.style.small_font_size, color, angle);
                }
            }
            Shape::TopAuthor { name } => {
                self.painter.text(
                    self.at(&transform, (0.0, 0.0)),
                    Align2::CENTER_BOTTOM,
                    name,
                    FontId::proportional(self.style.small_font_size),
                    text_color,
                );
            }
            Shape::Axis { length, ticks } => {
                let stroke = Stroke::new(1.0, rgba(self.theme.axis_color));
                self.painter.line_segment(
                    [self.at(&transform, (0.0, 0.0)), self.at(&transform, (*length, 0.0))],
                    stroke,
                );
                for (x, label) in ticks {
                    let top = self.at(&transform, (*x, 0.0));
                    self.painter
                        .line_segment([top, self.at(&transform, (*x, 6.0))], stroke);
                    self.painter.text(
                        self.at(&transform, (*x, 9.0)),
                        Align2::CENTER_TOP,
                        label,
                        FontId::proportional(self.style.small_font_size),
                        text_color,
                    );
                }
            }
            Shape::Tooltip {
                message,
                stats,
                date,
            } => {
                let (w, h) = self.style.tooltip_size;
                let rect = Rect::from_min_max(
                    self.at(&transform, (10.0, 10.0)),
                    self.at(&transform, (10.0 + w, 10.0 + h)),
                );
                self.painter
                    .rect_filled(rect, 2.0, rgba(self.theme.tooltip_background));
                let lines = [(message, 30.0), (stats, 50.0), (date, 63.0)];
                for (line, y) in lines {
                    self.painter.text(
                        self.at(&transform, (16.0, y)),
                        Align2::LEFT_BOTTOM,
                        line,
                        FontId::proportional(self.style.small_font_size),
                        text_color,
                    );
                }
            }
            Shape::HitSurface { .. } => {}
        }
    }
}
