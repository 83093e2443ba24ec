// src/gui/components/display_bar.rs
use eframe::egui;

use crate::{config::options::DisplayKind, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let area = app.area();
    let months = app.session.as_ref().map(|s| s.months(area)).unwrap_or_default();
    let latest = months.last().copied();

    let panel = app.state.gui.panel_mut(area);
    let before = panel.display;

    ui.horizontal(|ui| {
        ui.label("表示:");
        for kind in [DisplayKind::YearOverYear, DisplayKind::IndexVsBase] {
            ui.selectable_value(&mut panel.display.kind, kind, kind.label());
        }

        ui.add_enabled_ui(panel.display.kind == DisplayKind::IndexVsBase, |ui| {
            ui.label("基準月:");
            egui::ComboBox::from_id_salt(("base_month", area))
                .selected_text(panel.display.base_month.to_string())
                .height(320.0)
                .show_ui(ui, |ui| {
                    for m in months.iter().rev() {
                        ui.selectable_value(&mut panel.display.base_month, *m, m.to_string());
                    }
                });
        });

        ui.separator();
        ui.checkbox(&mut panel.show_table, "Table");
        ui.checkbox(&mut panel.full_history, "Full history");

        if let Some(m) = latest {
            ui.separator();
            ui.label(format!("Latest: {m}"));
        }
    });

    if panel.display != before {
        logf!("UI: {} display → {:?} base={}", area, panel.display.kind, panel.display.base_month);
        app.refresh(area);
    }
}
