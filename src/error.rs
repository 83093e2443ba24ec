// src/error.rs
use crate::config::options::Area;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything the loaders and the navigator can fail with.
///
/// Fetch and schema errors abort a session load. Integrity and selection
/// errors only concern the panel that asked; the rest of the session stays
/// usable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("data unavailable: {0}")]
    Fetch(String),

    #[error("unexpected layout in {origin}: {detail}")]
    Schema { origin: &'static str, detail: String },

    #[error(
        "weights under {item} do not add up ({area}): expected {expected}, children sum to {actual}"
    )]
    Integrity {
        item: String,
        area: Area,
        expected: f64,
        actual: f64,
    },

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("{choice} cannot be selected under {parent}")]
    InvalidSelection { parent: String, choice: String },

    #[error("configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn schema(origin: &'static str, detail: impl Into<String>) -> Self {
        Error::Schema { origin, detail: detail.into() }
    }

    /// True for the failures that leave the rest of a session intact.
    pub fn is_panel_local(&self) -> bool {
        matches!(
            self,
            Error::Integrity { .. } | Error::UnknownItem(_) | Error::InvalidSelection { .. }
        )
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, resp) => {
                Error::Fetch(format!("HTTP {} from {}", code, resp.get_url()))
            }
            ureq::Error::Transport(t) => Error::Fetch(format!("transport error: {}", t)),
        }
    }
}
