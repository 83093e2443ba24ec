// src/gui/components/data_table.rs
//
// Numeric view of the transformed table, newest month first. Values are
// fractions in the model and shown as percentages here.

use eframe::egui::{self, Align, Layout, RichText};
use egui_extras::{Column, TableBuilder};

use crate::gui::view::PanelView;

pub fn draw(ui: &mut egui::Ui, view: &PanelView) {
    let table = &view.shown;
    if table.is_empty() {
        ui.label("No rows");
        return;
    }
    let months = table.months();
    let cols = table.columns();
    let n = months.len();

    egui::ScrollArea::horizontal()
        .id_salt("data_table_hscroll")
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(Layout::right_to_left(Align::Center))
                .column(Column::exact(70.0))
                .columns(Column::initial(110.0).resizable(true).clip(true).at_least(40.0), cols.len())
                .min_scrolled_height(0.0)
                .header(22.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("month");
                    });
                    for (ci, c) in cols.iter().enumerate() {
                        header.col(|ui| {
                            let text = RichText::new(c.name.as_str());
                            // selected item first
                            if ci == 0 { ui.strong(text); } else { ui.label(text); }
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, n, |mut row| {
                        let ri = n - 1 - row.index();
                        row.col(|ui| {
                            ui.monospace(months[ri].to_string());
                        });
                        for c in cols {
                            row.col(|ui| {
                                match c.values[ri] {
                                    Some(v) => ui.monospace(format!("{:.2}", v * 100.0)),
                                    None => ui.label(""),
                                };
                            });
                        }
                    });
                });
        });
}
