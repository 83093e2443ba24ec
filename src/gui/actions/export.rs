// src/gui/actions/export.rs
use crate::{file, gui::app::App};

pub fn export(app: &mut App) {
    // Apply pending edits to the output field
    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        app.out_path_text = app.state.options.export.out_path().to_string_lossy().into_owned();
        app.out_path_dirty = false;
    }

    let Some(view) = app.view() else {
        app.status("Nothing to export");
        return;
    };
    if view.shown.is_empty() {
        app.status("Nothing to export");
        logd!("Export: Clicked, but the table is empty");
        return;
    }

    match file::export_table(&app.state.options.export, &view.shown) {
        Ok(path) => {
            let msg = format!("Exported {} rows → {}", view.shown.len(), path.display());
            app.status(msg);
        }
        Err(e) => {
            loge!("Export: Failed: {}", e);
            app.status(format!("Export failed: {e}"));
        }
    }
}
