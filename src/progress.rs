// src/progress.rs
use crate::core::Month;

/// Lightweight progress reporting for the chunked CPI download.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of requests about to be made.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One chunk came back with data. `first..=last` is the requested span.
    fn chunk_done(&mut self, _index: usize, _first: Month, _last: Month) {}

    /// One chunk reported "no data" and was skipped.
    fn chunk_skipped(&mut self, _index: usize, _first: Month, _last: Month) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
