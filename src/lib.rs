// src/lib.rs

#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod csv;
pub mod data;
pub mod fetch;
pub mod file;
pub mod gui;
pub mod navigator;
pub mod progress;
pub mod session;
pub mod table;
pub mod transform;

pub use error::{Error, Result};
