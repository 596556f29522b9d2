use eframe::egui::{self, RichText, Stroke, Ui};
use egui_plot::{Corner, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieSpec, ScatterSpec};
use crate::color::{self, ColorMap};

/// Radians between successive points on a pie wedge arc.
const ARC_STEP: f64 = 0.05;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render the success pie: one wedge per slice, percentage labels on the
/// larger wedges, legend carrying the absolute counts.
pub fn success_pie_chart(ui: &mut Ui, spec: &PieSpec, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&spec.title).heading());
    });

    if spec.is_empty() {
        empty_chart(ui, height, "No launches match the current selection");
        return;
    }

    let total = spec.total();
    let palette = color::generate_palette(spec.slices.len());
    let wedge_stroke = Stroke::new(1.5, ui.visuals().window_fill());

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .show_background(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default().position(Corner::RightTop))
        .show(ui, |plot_ui| {
            // Wedges start at 12 o'clock and run clockwise.
            let mut start = std::f64::consts::FRAC_PI_2;
            for (slice, color) in spec.slices.iter().zip(palette) {
                let fraction = slice.value / total;
                if fraction <= 0.0 {
                    continue;
                }
                let end = start - fraction * std::f64::consts::TAU;

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge_points(start, end)))
                        .fill_color(color)
                        .stroke(wedge_stroke)
                        .name(format!("{} ({:.0})", slice.label, slice.value)),
                );

                // Label wedges that are large enough to hold text.
                if fraction >= 0.04 {
                    let mid = (start + end) / 2.0;
                    plot_ui.text(Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                    ));
                }

                start = end;
            }
        });
}

/// Sample the wedge outline: the pie centre followed by the arc from
/// `start` to `end` (both in radians).
fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = ((start - end).abs() / ARC_STEP).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + (end - start) * (i as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

// ---------------------------------------------------------------------------
// Payload scatter chart
// ---------------------------------------------------------------------------

/// Render the payload-vs-outcome scatter: one point series per booster
/// version category, colored from the startup color map.
pub fn payload_scatter_chart(ui: &mut Ui, spec: &ScatterSpec, color_map: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&spec.title).heading());
    });

    if spec.is_empty() {
        empty_chart(ui, height, "No launches in the selected payload range");
        return;
    }

    Plot::new("payload_scatter")
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Outcome (1 = success)")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for series in &spec.series {
                plot_ui.points(
                    Points::new(PlotPoints::from(series.points.clone()))
                        .name(&series.category)
                        .color(color_map.color_for(&series.category))
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Empty state
// ---------------------------------------------------------------------------

fn empty_chart(ui: &mut Ui, height: f32, message: &str) {
    ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(message);
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_outline_spans_the_requested_arc() {
        let start = std::f64::consts::FRAC_PI_2;
        let end = 0.0;
        let points = wedge_points(start, end);

        assert_eq!(points[0], [0.0, 0.0]);
        let first = points[1];
        let last = points[points.len() - 1];
        assert!((first[0] - start.cos()).abs() < 1e-9);
        assert!((first[1] - start.sin()).abs() < 1e-9);
        assert!((last[0] - end.cos()).abs() < 1e-9);
        assert!((last[1] - end.sin()).abs() < 1e-9);
    }

    #[test]
    fn wedge_outline_stays_on_the_unit_circle() {
        let points = wedge_points(std::f64::consts::FRAC_PI_2, -std::f64::consts::PI);
        for p in &points[1..] {
            let radius = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((radius - 1.0).abs() < 1e-9);
        }
    }
}
