// src/gui/actions/copy.rs
use eframe::egui;

use crate::{csv::table_to_string, gui::app::App};

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let Some(view) = app.view() else {
        app.status("Nothing to copy");
        return;
    };
    if view.shown.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but the table is empty");
        return;
    }

    let export = &app.state.options.export;
    let txt = table_to_string(&view.shown, export.include_headers, export.delim());
    logf!(
        "Copy: area={} rows={} columns={}",
        app.area(),
        view.shown.len(),
        view.shown.columns().len()
    );

    ui_ctx.copy_text(txt);
    app.status("Copied to clipboard");
}
