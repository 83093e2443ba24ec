// src/core/mod.rs

pub mod month;
pub mod net;

pub use month::Month;
