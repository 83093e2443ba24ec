// src/gui/components/area_tabs.rs
//
// One tab per regional index. Each tab keeps its own selection, so a switch
// only changes which view is drawn.

use eframe::egui;

use crate::{config::options::Area, gui::app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.area();
        for area in Area::ALL {
            let selected = area == cur;
            let mut label = egui::RichText::new(area.label());
            if app.views.get(&area).is_some_and(|v| v.error.is_some()) {
                label = label.color(ui.visuals().warn_fg_color);
            }
            if ui.selectable_label(selected, label).clicked() && !selected {
                logf!("UI: Tab switch {} → {}", cur, area);
                app.state.gui.area = area;
                app.refresh(area);
            }
        }
    });
}
