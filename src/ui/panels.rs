use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, Command};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the selection panel: samples, parameter, spectra files.
pub fn side_panel(ui: &mut Ui, state: &AppState, commands: &mut Vec<Command>) {
    ui.heading("Selection");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Parameter selector ----
            ui.strong("Parameter");
            let current = state.parameter.clone().unwrap_or_else(|| "Parameter".to_string());
            egui::ComboBox::from_id_salt("parameter")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for p in &state.parameters {
                        if ui
                            .selectable_label(state.parameter.as_deref() == Some(p.as_str()), p)
                            .clicked()
                        {
                            commands.push(Command::SetParameter(p.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Sample codes from the master inventory ----
            let codes = state.codes();
            multiselect(
                ui,
                "Sample",
                &codes,
                &state.selected_codes,
                commands,
                Command::ToggleSample,
                Command::SetSamples,
            );
            ui.separator();

            // ---- Spectra files from the remote folder ----
            multiselect(
                ui,
                "Spectra",
                &state.entries,
                &state.selected_files,
                commands,
                Command::ToggleSpectrum,
                Command::SetSpectra,
            );
        });
}

/// Collapsible checkbox list with All / None buttons.
fn multiselect(
    ui: &mut Ui,
    title: &str,
    options: &[String],
    selected: &BTreeSet<String>,
    commands: &mut Vec<Command>,
    toggle: fn(String) -> Command,
    set: fn(BTreeSet<String>) -> Command,
) {
    // Show count of selected / total in the header
    let header_text = format!("{title}  ({}/{})", selected.len(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if options.is_empty() {
                ui.label("Nothing available.");
                return;
            }
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    commands.push(set(options.iter().cloned().collect()));
                }
                if ui.small_button("None").clicked() {
                    commands.push(set(BTreeSet::new()));
                }
            });

            for opt in options {
                let mut checked = selected.contains(opt);
                if ui.checkbox(&mut checked, opt).changed() {
                    commands.push(toggle(opt.clone()));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, commands: &mut Vec<Command>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("View", |ui: &mut Ui| {
            let mut normalized = state.plot_normalized;
            if ui.checkbox(&mut normalized, "Normalized intensity").changed() {
                commands.push(Command::SetPlotNormalized(normalized));
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.master {
            Some(m) => ui.label(format!(
                "{} samples in inventory, {} files, {} spectra loaded",
                m.len(),
                state.entries.len(),
                state.samples.len()
            )),
            None => ui.label("No inventory loaded"),
        };

        if let Some(last) = state.warnings.last() {
            ui.separator();
            let text = if state.warnings.len() > 1 {
                format!("{last}  (+{} more)", state.warnings.len() - 1)
            } else {
                last.to_string()
            };
            ui.label(RichText::new(text).color(Color32::RED));
            if ui.small_button("Dismiss").clicked() {
                commands.push(Command::DismissWarnings);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Inventory, per-sample parameter view, spectra and optional extras.
pub fn central_panel(ui: &mut Ui, state: &AppState, commands: &mut Vec<Command>) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(&state.features.title);

            if state.features.show_methodology && !state.features.methodology.is_empty() {
                egui::CollapsingHeader::new("Methodology")
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        ui.label(&state.features.methodology);
                    });
            }

            // ---- Master inventory ----
            ui.separator();
            ui.strong("Master inventory");
            match &state.master {
                Some(master) => table::master_table(ui, "master", master, 260.0),
                None => {
                    ui.label("The master inventory could not be loaded.");
                }
            }

            // ---- Selected samples: table + bar chart ----
            ui.separator();
            ui.strong("Selected samples");
            if state.selection_ready() {
                ui.columns(2, |cols| {
                    if let Some(t) = state.parameter_table() {
                        table::master_table(&mut cols[0], "selected", &t, 300.0);
                    }
                    plot::parameter_chart(&mut cols[1], state);
                });
            } else {
                ui.colored_label(
                    Color32::YELLOW,
                    "Select the samples and a parameter in the side panel.",
                );
            }

            // ---- Spectra ----
            ui.separator();
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Spectra");
                let mut normalized = state.plot_normalized;
                if ui.checkbox(&mut normalized, "Normalized").changed() {
                    commands.push(Command::SetPlotNormalized(normalized));
                }
            });
            plot::spectra_plot(ui, state);

            if !state.samples.is_empty() {
                let shown = state.shown_table.clone().unwrap_or_else(|| "Show table…".to_string());
                egui::ComboBox::from_id_salt("spectrum_table")
                    .selected_text(shown)
                    .show_ui(ui, |ui: &mut Ui| {
                        if ui.selectable_label(state.shown_table.is_none(), "(none)").clicked() {
                            commands.push(Command::ShowTable(None));
                        }
                        for name in state.samples.keys() {
                            let is_shown = state.shown_table.as_deref() == Some(name.as_str());
                            if ui.selectable_label(is_shown, name).clicked() {
                                commands.push(Command::ShowTable(Some(name.clone())));
                            }
                        }
                    });
                if let Some(t) = state.shown_table.as_ref().and_then(|n| state.samples.get(n)) {
                    table::spectrum_table(ui, "spectrum", t, 300.0);
                }
            }

            // ---- Illustrative scatter ----
            if state.features.synthetic_panel {
                ui.separator();
                ui.strong("Synthetic scatter (random data)");
                plot::synthetic_scatter(ui, state);
            }
        });
}
