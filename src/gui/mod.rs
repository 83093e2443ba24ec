// src/gui/mod.rs
pub mod app;
pub mod fonts;
pub mod progress;
pub mod view;

mod actions;
mod components;

pub use app::run;
