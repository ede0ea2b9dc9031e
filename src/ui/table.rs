use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Field, TomatoRecord};
use crate::report::one_decimal;

const ROW_HEIGHT: f32 = 18.0;

/// One row per record; diameter and weight shown with one decimal.
pub fn records_table(ui: &mut Ui, id: &str, rows: &[&TomatoRecord], max_height: f32) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(max_height)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(60.0), Field::ALL.len() - 1)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for field in Field::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.strong(field.label());
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let record = rows[row.index()];
                    for field in Field::ALL {
                        row.col(|ui: &mut Ui| cell(ui, record, field));
                    }
                });
            });
    });
}

fn cell(ui: &mut Ui, record: &TomatoRecord, field: Field) {
    match field {
        Field::Id => {
            ui.label(record.id_label());
        }
        Field::DiameterMm | Field::WeightG => {
            let value = record.number(field).unwrap_or(f64::NAN);
            ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                ui.label(one_decimal(value));
            });
        }
        _ => {
            ui.label(record.text(field).unwrap_or_default());
        }
    }
}

/// Collapsible table of the smallest tomatoes.
pub fn smallest_section(ui: &mut Ui, rows: &[&TomatoRecord]) {
    egui::CollapsingHeader::new(format!("{} smallest tomatoes by diameter", rows.len()))
        .id_salt("smallest")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            records_table(ui, "smallest_table", rows, 240.0);
        });
}
