// src/gui/components/mod.rs
pub mod area_tabs;
pub mod chart;
pub mod data_table;
pub mod display_bar;
pub mod export_bar;
pub mod item_picker;
pub mod load_panel;
