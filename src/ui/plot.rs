use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::data::aggregate::{series_total, Slice};
use crate::data::scatter::ScatterPoint;
use crate::state::AppState;

/// Angular resolution of pie wedges (radians per triangle).
const WEDGE_STEP: f32 = 0.05;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Success proportion chart for the current site selection.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    ui.heading(state.pie_title());

    let total = series_total(&state.pie);
    if total == 0 {
        // Either no launches at all, or an overview where no site succeeded.
        if state.pie.is_empty() {
            ui.label("No launches for this selection.");
        } else {
            ui.label("No successful launches to show.");
        }
        return;
    }

    let colors = generate_palette(state.pie.len());
    let diameter = ui.available_height().min(ui.available_width() * 0.6).max(80.0);

    ui.horizontal(|ui: &mut Ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(diameter), Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = diameter * 0.5 - 4.0;

        // Start at twelve o'clock and go clockwise.
        let mut start = -FRAC_PI_2;
        for (slice, &color) in state.pie.iter().zip(&colors) {
            if slice.value == 0 {
                continue;
            }
            let fraction = slice.value as f32 / total as f32;
            let end = start + fraction * TAU;
            painter.extend(wedge(center, radius, start, end, color));

            let mid = (start + end) * 0.5;
            let at = center + Vec2::angled(mid) * radius * 0.65;
            painter.text(
                at,
                Align2::CENTER_CENTER,
                format!("{:.1}%", fraction * 100.0),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
            start = end;
        }

        ui.vertical(|ui: &mut Ui| {
            for (slice, &color) in state.pie.iter().zip(&colors) {
                legend_row(ui, slice, color);
            }
        });
    });
}

/// A filled circular sector, split into thin triangles so each is convex.
fn wedge(center: Pos2, radius: f32, start: f32, end: f32, color: Color32) -> Vec<Shape> {
    let steps = ((end - start) / WEDGE_STEP).ceil().max(1.0) as usize;
    let step = (end - start) / steps as f32;
    (0..steps)
        .map(|i| {
            let a0 = start + step * i as f32;
            let a1 = a0 + step;
            Shape::convex_polygon(
                vec![
                    center,
                    center + Vec2::angled(a0) * radius,
                    center + Vec2::angled(a1) * radius,
                ],
                color,
                Stroke::NONE,
            )
        })
        .collect()
}

fn legend_row(ui: &mut Ui, slice: &Slice, color: Color32) {
    ui.horizontal(|ui: &mut Ui| {
        let (swatch, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
        ui.painter().rect_filled(swatch, 2.0, color);
        ui.label(format!("{}  ({})", slice.label, slice.value));
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Payload vs. outcome for the current site and payload range.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    ui.heading(state.scatter_title());

    let (lo, hi) = state.payload_bounds;
    let scatter = &state.scatter;

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome (0=Failure, 1=Success)")
        .include_x(lo)
        .include_x(hi)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            match hovered_point(scatter, name, value.x, value.y) {
                Some(p) => format!(
                    "{}\nBooster: {}\nPayload: {:.0} kg\nOutcome: {}",
                    p.site, p.booster_category, p.payload_mass_kg, p.outcome
                ),
                None => format!("{:.0} kg", value.x),
            }
        })
        .show(ui, |plot_ui| {
            // One series per booster category so the legend lists them.
            for category in state.dataset.booster_categories() {
                let points: PlotPoints = scatter
                    .iter()
                    .filter(|p| p.booster_category == *category)
                    .map(ScatterPoint::xy)
                    .collect();
                if points.points().is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}

/// The point under the cursor, matched by series name and coordinates.
fn hovered_point<'a>(
    scatter: &'a [ScatterPoint],
    category: &str,
    x: f64,
    y: f64,
) -> Option<&'a ScatterPoint> {
    scatter.iter().find(|p| {
        let [px, py] = p.xy();
        p.booster_category == category && px == x && py == y
    })
}
