use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Pos2, RichText, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{generate_palette, FIT_LINE, TOMATO_BORDER, TOMATO_FILL};
use crate::report::ScatterView;
use crate::stats::Histogram;

const CHART_HEIGHT: f32 = 220.0;

/// Static bar plot (no panning or zooming) with category labels on x.
fn category_plot(ui: &mut Ui, id: &str, labels: Vec<String>, chart: BarChart) {
    Plot::new(id.to_owned())
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_axis_formatter(category_formatter(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Axis formatter that writes `labels[i]` under integer position `i`.
fn category_formatter(
    labels: Vec<String>,
) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Category charts
// ---------------------------------------------------------------------------

/// Vertical bar chart of category counts.
pub fn bar_chart(ui: &mut Ui, id: &str, title: &str, counts: &[(String, usize)]) {
    ui.strong(title);
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, n))| {
            Bar::new(i as f64, *n as f64)
                .name(label)
                .width(0.8)
                .fill(TOMATO_FILL)
                .stroke(Stroke::new(1.0, TOMATO_BORDER))
        })
        .collect();
    let labels = counts.iter().map(|(label, _)| label.clone()).collect();
    category_plot(ui, id, labels, BarChart::new(bars).name(title));
}

/// Pie chart of category counts with a colour legend underneath.
pub fn pie_chart(ui: &mut Ui, title: &str, counts: &[(String, usize)]) {
    ui.strong(title);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let colors = generate_palette(counts.len());

    let size = egui::vec2(ui.available_width(), CHART_HEIGHT - 40.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let center = response.rect.center();
    let radius = 0.45 * response.rect.height().min(response.rect.width());

    if total > 0 {
        let mut start = -FRAC_PI_2;
        for ((_, n), color) in counts.iter().zip(&colors) {
            let sweep = *n as f32 / total as f32 * TAU;
            for shape in wedge(center, radius, start, sweep, *color) {
                painter.add(shape);
            }
            start += sweep;
        }
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for ((label, n), color) in counts.iter().zip(&colors) {
            let pct = *n as f64 / total.max(1) as f64 * 100.0;
            ui.label(RichText::new(format!("■ {label} ({n}, {pct:.1}%)")).color(*color));
        }
    });
}

/// A pie slice as convex pieces no wider than a quarter turn.
fn wedge(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Vec<Shape> {
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f32;
    (0..pieces)
        .map(|p| {
            let a0 = start + p as f32 * piece_sweep;
            let steps = 12;
            let mut points = vec![center];
            points.extend((0..=steps).map(|s| {
                let a = a0 + piece_sweep * s as f32 / steps as f32;
                center + radius * egui::vec2(a.cos(), a.sin())
            }));
            Shape::convex_polygon(points, color, Stroke::NONE)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Contiguous bars, one per bin, labelled with the bin range.
pub fn histogram_chart(ui: &mut Ui, id: &str, title: &str, histogram: &Histogram) {
    ui.strong(title);
    let bars: Vec<Bar> = histogram
        .bins()
        .enumerate()
        .map(|(i, (label, n))| {
            Bar::new(i as f64, n as f64)
                .name(label)
                .width(1.0)
                .fill(TOMATO_FILL)
                .stroke(Stroke::new(1.0, TOMATO_BORDER))
        })
        .collect();
    let labels = histogram.labels.clone();
    category_plot(ui, id, labels, BarChart::new(bars).name(title));
}

// ---------------------------------------------------------------------------
// Scatter + fitted line
// ---------------------------------------------------------------------------

pub fn scatter_chart(ui: &mut Ui, id: &str, scatter: &ScatterView) {
    let fit = &scatter.fit;
    ui.strong("Weight vs diameter");
    ui.label(format!(
        "weight = {:.3} · diameter + {:.3}   (R² = {:.3}, r = {:.3})",
        fit.slope, fit.intercept, fit.r_squared, fit.r
    ));
    egui::CollapsingHeader::new("Fit measures")
        .id_salt((id, "fit_measures"))
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new((id, "fit_grid"))
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    let rows = [
                        ("n", fit.n.to_string()),
                        ("Sxx", format!("{:.4}", fit.sxx)),
                        ("Syy", format!("{:.4}", fit.syy)),
                        ("Sxy", format!("{:.4}", fit.sxy)),
                        ("SST (total)", format!("{:.4}", fit.sst)),
                        ("SSE (error)", format!("{:.4}", fit.sse)),
                        ("SSR (regression)", format!("{:.4}", fit.ssr)),
                        ("s² (residual variance)", format!("{:.6}", fit.residual_variance)),
                        ("s (residual std. dev.)", format!("{:.6}", fit.residual_std_dev)),
                    ];
                    for (name, value) in rows {
                        ui.label(name);
                        ui.label(value);
                        ui.end_row();
                    }
                });
        });

    let points = Points::new(PlotPoints::from(scatter.points.clone()))
        .name("Data")
        .radius(3.0)
        .color(TOMATO_BORDER);
    let line = Line::new(PlotPoints::from(scatter.line.to_vec()))
        .name("Fitted line")
        .color(FIT_LINE)
        .width(2.0);

    Plot::new(id.to_owned())
        .height(CHART_HEIGHT + 60.0)
        .legend(Legend::default())
        .x_axis_label("Diameter (mm)")
        .y_axis_label("Weight (g)")
        .allow_drag(true)
        .allow_zoom(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(points);
            plot_ui.line(line);
        });
}
