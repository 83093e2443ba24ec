// src/gui/actions/load.rs
//
// Session load runs once on a worker thread; the UI thread polls the
// hand-off slot each frame and takes the result when it lands.

use std::sync::{Arc, PoisonError};
use std::thread;

use eframe::egui;

use crate::{
    config::options::{Area, SourceOptions},
    error::Result,
    fetch::{self, EStatClient},
    gui::{app::App, progress::GuiProgress},
    progress::Progress,
    session::Session,
};

pub fn load(app: &mut App, ctx: &egui::Context) {
    if app.loading {
        return;
    }
    app.loading = true;
    app.load_error = None;

    let opts = app.state.options.source.clone();
    let status = app.status.clone();
    let pending = app.pending.clone();
    let ctx = ctx.clone();

    logf!("Load: Begin {}..={}", opts.start, opts.end_month());
    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        let result = load_session(&opts, &mut prog).map_err(|e| e.to_string());
        *pending.lock().unwrap_or_else(PoisonError::into_inner) = Some(result);
        ctx.request_repaint();
    });
}

fn load_session(opts: &SourceOptions, progress: &mut dyn Progress) -> Result<Session> {
    let api = EStatClient::from_options(opts)?;
    let weights = fetch::weight_source(opts);
    Session::load(opts, &api, weights.as_ref(), &Area::ALL, progress)
}

pub fn poll_load(app: &mut App) {
    let Some(result) = app.pending.lock().unwrap_or_else(PoisonError::into_inner).take() else {
        return;
    };
    app.loading = false;

    match result {
        Ok(session) => {
            logf!("Load: OK weights={}", session.weights().len());
            app.session = Some(Arc::new(session));
            for area in Area::ALL {
                app.refresh(area);
            }
            app.status("Ready");
        }
        Err(e) => {
            loge!("Load: Error: {}", e);
            app.status(format!("Error: {e}"));
            app.load_error = Some(e);
        }
    }
}
