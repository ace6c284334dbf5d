use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use bcviz::data::model::{MasterTable, SpectrumTable};

// ---------------------------------------------------------------------------
// Tabular views
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// Render an inventory table (full master or a projection of it).
pub fn master_table(ui: &mut Ui, id: &str, table: &MasterTable, max_height: f32) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(60.0), table.columns.len())
            .header(20.0, |mut header| {
                for col in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_string());
                        });
                    }
                });
            });
    });
}

/// Render one spectrum as Wavenumber / Intensity / Normalized Intensity.
pub fn spectrum_table(ui: &mut Ui, id: &str, table: &SpectrumTable, max_height: f32) {
    let columns = table.column_names();
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(max_height)
            .columns(Column::auto().at_least(90.0), columns.len())
            .header(20.0, |mut header| {
                for col in &columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*col);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let i = row.index();
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", table.wavenumber[i]));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.6}", table.intensity[i]));
                    });
                    if let Some(norm) = &table.normalized {
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{:.6}", norm[i]));
                        });
                    }
                });
            });
    });
}
