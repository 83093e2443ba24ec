// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::core::Month;
use crate::progress::Progress;

use super::app::set_status;

/// Mirrors load progress into the status line the UI thread draws.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    skipped: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, skipped: 0, total: 0 }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.skipped = 0;
    }
    fn log(&mut self, msg: &str) {
        set_status(&self.status, msg);
    }
    fn chunk_done(&mut self, _index: usize, first: Month, last: Month) {
        self.done += 1;
        set_status(
            &self.status,
            format!("Fetched {first}..{last} ({}/{})", self.done + self.skipped, self.total),
        );
    }
    fn chunk_skipped(&mut self, _index: usize, first: Month, last: Month) {
        self.skipped += 1;
        set_status(
            &self.status,
            format!("No data for {first}..{last} ({}/{})", self.done + self.skipped, self.total),
        );
    }
    fn finish(&mut self) {
        if self.skipped == 0 {
            set_status(&self.status, format!("Fetch complete ({}/{})", self.done, self.total));
        } else {
            set_status(
                &self.status,
                format!("Fetch complete ({}/{}, {} without data)", self.done, self.total, self.skipped),
            );
        }
    }
}
