use eframe::egui::{self, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::SiteSelection;
use crate::state::{AppState, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP};

// ---------------------------------------------------------------------------
// Top bar – title and record counts
// ---------------------------------------------------------------------------

/// Render the top bar: dashboard title plus loaded/visible counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("SpaceX Launch Records Dashboard");

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.visible_indices.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – the two dashboard controls
// ---------------------------------------------------------------------------

/// Render the controls panel: site dropdown and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // Clone the option list so we can mutate state inside the combo closure.
    let sites = state.dataset.launch_sites.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Launch site selector ----
            ui.strong("Launch Site");
            let current = state.selected_site.clone();
            egui::ComboBox::from_id_salt("site_select")
                .selected_text(current.label().to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(current == SiteSelection::All, "All Sites")
                        .clicked()
                    {
                        state.set_site(SiteSelection::All);
                    }
                    for site in &sites {
                        let option = SiteSelection::Site(site.clone());
                        if ui.selectable_label(current == option, site).clicked() {
                            state.set_site(option);
                        }
                    }
                });
            ui.separator();

            // ---- Payload range ----
            ui.strong("Payload range (kg)");
            let mut low = state.payload_range[0];
            let mut high = state.payload_range[1];

            let low_changed = ui
                .add(
                    Slider::new(&mut low, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                        .step_by(PAYLOAD_SLIDER_STEP)
                        .text("Min"),
                )
                .changed();
            let high_changed = ui
                .add(
                    Slider::new(&mut high, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                        .step_by(PAYLOAD_SLIDER_STEP)
                        .text("Max"),
                )
                .changed();

            if low_changed || high_changed {
                // An inverted range is allowed; the scatter simply empties.
                state.set_payload_range([low, high]);
            }

            ui.horizontal(|ui: &mut Ui| {
                for mark in [2500, 5000, 7500] {
                    ui.small(RichText::new(format!("{mark} kg")).weak());
                }
            });
            ui.add_space(4.0);

            if ui.small_button("Reset").clicked() {
                state.reset();
            }
        });
}
