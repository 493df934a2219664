use eframe::egui::{self, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

/// Payload marks shown under the sliders.
const PAYLOAD_MARKS: [f64; 5] = [0.0, 2500.0, 5000.0, 7500.0, 10000.0];

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    site_selector(ui, state);
    ui.add_space(12.0);
    payload_selector(ui, state);
}

fn site_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch site");

    let current = state.selection.site.clone();
    let current_text = match &current {
        SiteSelection::All => "All Sites",
        SiteSelection::Site(s) => s.as_str(),
    };

    ui.add(
        egui::TextEdit::singleline(&mut state.site_search)
            .hint_text("Search sites…")
            .desired_width(ui.available_width()),
    );

    // Owned copies so the state can be mutated from inside the combo.
    let sites: Vec<String> = state
        .matching_sites()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut picked: Option<SiteSelection> = None;

    egui::ComboBox::from_id_salt("site_selector")
        .selected_text(current_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_all(), "All Sites").clicked() {
                picked = Some(SiteSelection::All);
            }
            if sites.is_empty() {
                ui.weak("No matching site");
            }
            for site in &sites {
                let is_current = current.token() == site && !current.is_all();
                if ui.selectable_label(is_current, site).clicked() {
                    picked = Some(SiteSelection::Site(site.clone()));
                }
            }
        });

    if let Some(site) = picked {
        state.set_site(site);
    }
}

fn payload_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (Kg)");

    let (min, max) = state.payload_bounds;
    let PayloadRange { mut lo, mut hi } = state.selection.payload;

    let lo_changed = ui
        .add(
            egui::Slider::new(&mut lo, min..=max)
                .step_by(state.slider_step)
                .text("min"),
        )
        .changed();
    let hi_changed = ui
        .add(
            egui::Slider::new(&mut hi, min..=max)
                .step_by(state.slider_step)
                .text("max"),
        )
        .changed();

    if lo_changed {
        state.set_payload_lo(lo);
    }
    if hi_changed {
        state.set_payload_hi(hi);
    }

    let marks: Vec<String> = PAYLOAD_MARKS
        .iter()
        .filter(|m| (min..=max).contains(*m))
        .map(|m| format!("{m:.0}"))
        .collect();
    if !marks.is_empty() {
        ui.label(RichText::new(marks.join("  ·  ")).small().weak());
    }

    if ui.small_button("Full range").clicked() {
        state.set_payload_range(PayloadRange::new(min, max));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title / status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Launch Records Dashboard");
        ui.separator();
        ui.label(format!(
            "{} launches loaded, {} in scatter",
            state.dataset.len(),
            state.scatter.len()
        ));
    });
}
