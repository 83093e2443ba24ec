// src/gui/components/item_picker.rs
//
// Combo box chain, one per level. The first is fixed to the root item; each
// later box offers the selectable children of the level before it and may
// be left empty to stop there. Picking at level i drops picks below i.

use eframe::egui;

use crate::{config::consts::ROOT_ITEM, gui::app::App};

const NONE_LABEL: &str = "(なし)";

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let area = app.area();
    let Some(view) = app.view() else { return };

    // (options, current pick) per drill-down level
    let levels: Vec<(Vec<String>, Option<String>)> = view
        .steps
        .iter()
        .filter(|s| !s.is_terminal())
        .enumerate()
        .map(|(i, s)| (s.options.clone(), app.state.gui.panel(area).choices.get(i).cloned()))
        .collect();

    let mut changed: Option<(usize, Option<String>)> = None;

    ui.horizontal_wrapped(|ui| {
        ui.add_enabled_ui(false, |ui| {
            egui::ComboBox::from_id_salt(("item_level", area, 0usize))
                .selected_text(ROOT_ITEM)
                .show_ui(ui, |_| {});
        });

        for (i, (options, current)) in levels.iter().enumerate() {
            ui.label("›");
            let mut pick = current.clone();
            egui::ComboBox::from_id_salt(("item_level", area, i + 1))
                .selected_text(pick.as_deref().unwrap_or(NONE_LABEL))
                .width(180.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut pick, None, NONE_LABEL);
                    for opt in options {
                        ui.selectable_value(&mut pick, Some(opt.clone()), opt.as_str());
                    }
                });
            if pick != *current {
                changed = Some((i, pick));
            }
        }
    });

    if let Some((level, pick)) = changed {
        logf!("UI: {} level {} → {}", area, level + 1, pick.as_deref().unwrap_or("-"));
        let choices = &mut app.state.gui.panel_mut(area).choices;
        choices.truncate(level);
        choices.extend(pick);
        app.refresh(area);
    }
}
