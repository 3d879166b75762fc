use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – data source and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: data-source controls on top, filters below.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Data source");

    let mut load_requested = false;
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.data_path)
            .hint_text("path to churn CSV")
            .desired_width(f32::INFINITY),
    );
    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        load_requested = true;
    }
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Load").clicked() {
            load_requested = true;
        }
        if ui.button("Browse…").clicked() && pick_data_file(state) {
            load_requested = true;
        }
    });
    if load_requested {
        state.reload();
    }

    ui.separator();
    ui.heading("Filters");

    let Some(dataset) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let contracts = dataset.contract_values.clone();
    let services = dataset.service_values.clone();
    let payments = dataset.payment_values.clone();
    let tenure_extent = dataset.tenure_extent();
    let charge_extent = dataset.charge_extent();

    let mut changed = false;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= category_filter(ui, "Contract type", &contracts, &mut state.criteria.contracts);
            changed |= category_filter(ui, "Internet service", &services, &mut state.criteria.services);
            changed |= category_filter(ui, "Payment method", &payments, &mut state.criteria.payments);

            ui.separator();
            changed |= range_sliders(
                ui,
                "Tenure (months)",
                tenure_extent,
                &mut state.criteria.tenure_range,
            );
            changed |= range_sliders(
                ui,
                "Monthly charges",
                charge_extent,
                &mut state.criteria.charge_range,
            );
        });

    // Recompute the derived views after any control change.
    if changed {
        state.refresh();
    }
}

/// Collapsible checkbox list for one categorical column, with All/None
/// buttons and a selected/total count in the header.
fn category_filter(
    ui: &mut Ui,
    label: &str,
    all_values: &BTreeSet<String>,
    selected: &mut BTreeSet<String>,
) -> bool {
    let mut changed = false;

    let header_text = format!("{label}  ({}/{})", selected.len(), all_values.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(label)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    *selected = all_values.clone();
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for val in all_values {
                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, val).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                    changed = true;
                }
            }
        });

    changed
}

/// Min/max slider pair bounded by the observed extent. Both ends move
/// independently, so min can pass max (which simply matches nothing).
fn range_sliders<T: egui::emath::Numeric>(
    ui: &mut Ui,
    label: &str,
    (lo, hi): (T, T),
    range: &mut (T, T),
) -> bool {
    ui.strong(label);
    let mut changed = false;
    changed |= ui
        .add(egui::Slider::new(&mut range.0, lo..=hi).text("min"))
        .changed();
    changed |= ui
        .add(egui::Slider::new(&mut range.1, lo..=hi).text("max"))
        .changed();
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if pick_data_file(state) {
                    state.reload();
                }
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = &state.table {
            let visible = state.view.as_ref().map_or(0, |v| v.filtered.len());
            ui.label(format!(
                "{} customers loaded, {} in filtered view",
                dataset.len(),
                visible
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Let the user browse for an export; updates the path field on pick.
fn pick_data_file(state: &mut AppState) -> bool {
    let file = rfd::FileDialog::new()
        .set_title("Open churn data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    match file {
        Some(path) => {
            state.data_path = path.display().to_string();
            true
        }
        None => false,
    }
}
