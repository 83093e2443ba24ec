// src/gui/components/load_panel.rs
//
// Shown until a session exists: progress while loading, otherwise the
// failure plus what is needed to try again.

use eframe::egui;

use crate::{config::consts::ESTAT_APP_ID_ENV, gui::{actions, app::App}};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    if app.loading {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.spinner();
            ui.label(app.status_text());
        });
        return;
    }

    if let Some(err) = &app.load_error {
        ui.colored_label(ui.visuals().error_fg_color, err);
        ui.add_space(8.0);
    }

    let src = &mut app.state.options.source;
    egui::Grid::new("load_form").num_columns(2).show(ui, |ui| {
        ui.label("e-Stat app id:");
        let mut id = src.app_id.clone().unwrap_or_default();
        if ui
            .add(egui::TextEdit::singleline(&mut id).password(true).hint_text(format!("${ESTAT_APP_ID_ENV}")))
            .changed()
        {
            src.app_id = Some(id).filter(|s| !s.trim().is_empty());
        }
        ui.end_row();

        ui.label("Weights workbook:");
        let mut path = src.weights_path.as_ref().map(|p| p.to_string_lossy().into_owned()).unwrap_or_default();
        if ui
            .add(egui::TextEdit::singleline(&mut path).hint_text(src.weights_url.as_str()))
            .changed()
        {
            src.weights_path = Some(path.trim().to_string()).filter(|s| !s.is_empty()).map(Into::into);
        }
        ui.end_row();
    });

    ui.add_space(8.0);
    if ui.button("Load").clicked() {
        let ctx = ui.ctx().clone();
        actions::load(app, &ctx);
    }
}
