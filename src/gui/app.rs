// src/gui/app.rs
use std::{
    collections::BTreeMap,
    error::Error,
    sync::{Arc, Mutex, PoisonError},
};

use eframe::egui;

use crate::{
    config::{
        consts::DEFAULT_OUT_DIR,
        options::Area,
        state::AppState,
    },
    file::sanitize_item_filename,
    session::Session,
};

use super::{actions, components, fonts, view::PanelView};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "CPI Watch",
        options,
        Box::new(|cc| {
            fonts::install(&cc.egui_ctx);
            Ok(Box::new(App::new(AppState::default(), &cc.egui_ctx)))
        }),
    )?;
    Ok(())
}

/// Finished background load, waiting for the UI thread to pick it up.
pub type PendingLoad = Arc<Mutex<Option<Result<Session, String>>>>;

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // read-only once loaded
    pub session: Option<Arc<Session>>,
    pub views: BTreeMap<Area, PanelView>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub pending: PendingLoad,
    pub loading: bool,
    pub load_error: Option<String>,
}

impl App {
    pub fn new(state: AppState, ctx: &egui::Context) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into_owned();
        let mut app = Self {
            state,
            session: None,
            views: BTreeMap::new(),
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new("Idle".to_string())),
            pending: Arc::new(Mutex::new(None)),
            loading: false,
            load_error: None,
        };
        logf!("Init: start={} areas={}", app.state.options.source.start, Area::ALL.len());
        actions::load(&mut app, ctx);
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn area(&self) -> Area { self.state.gui.area }

    #[inline]
    pub fn view(&self) -> Option<&PanelView> { self.views.get(&self.area()) }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        set_status(&self.status, msg);
    }

    pub fn status_text(&self) -> String {
        self.status.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Rebuild the view for `area` after its selection or display changed.
    pub fn refresh(&mut self, area: Area) {
        let Some(session) = &self.session else { return };
        let panel = self.state.gui.panel_mut(area);
        let view = PanelView::build(session, area, panel);

        if !self.out_path_dirty && area == self.state.gui.area {
            if let Some(step) = view.last() {
                let stem = sanitize_item_filename(&format!("{}_{}", area.label(), step.item()));
                let export = &mut self.state.options.export;
                export.set_path(&format!("{DEFAULT_OUT_DIR}/{stem}"));
                self.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }
        self.views.insert(area, view);
    }
}

/// Status writes from any thread; a poisoned lock still holds a usable string.
pub fn set_status(status: &Mutex<String>, msg: impl Into<String>) {
    *status.lock().unwrap_or_else(PoisonError::into_inner) = msg.into();
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        actions::poll_load(self);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.loading {
                    ui.spinner();
                }
                ui.label(self.status_text());
            });
        });

        if self.session.is_some() {
            egui::TopBottomPanel::bottom("export").show(ctx, |ui| {
                components::export_bar::draw(ui, self);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_none() {
                components::load_panel::draw(ui, self);
                return;
            }

            components::area_tabs::draw(ui, self);
            ui.separator();
            components::item_picker::draw(ui, self);
            components::display_bar::draw(ui, self);
            ui.separator();

            let panel = self.state.gui.panel(self.area());
            let (show_table, full_history) = (panel.show_table, panel.full_history);
            let Some(view) = self.view() else { return };

            if let Some(err) = &view.error {
                ui.colored_label(ui.visuals().error_fg_color, err);
            }
            if show_table {
                let chart_h = (ui.available_height() * 0.55).max(160.0);
                components::chart::draw(ui, view, full_history, chart_h);
                ui.separator();
                components::data_table::draw(ui, view);
            } else {
                let chart_h = ui.available_height().max(160.0);
                components::chart::draw(ui, view, full_history, chart_h);
            }
        });

        if self.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}
