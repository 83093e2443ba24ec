// src/config/options.rs
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use super::consts::*;
use crate::core::Month;
use crate::error::{Error, Result};
use crate::transform::DisplayMode;

#[derive(Clone, Debug, Default)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub display: DisplayOptions,
    pub export: ExportOptions,
}

/// Which regional index a panel shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Area {
    National,
    Tokyo,
}

impl Area {
    pub const ALL: [Area; 2] = [Area::National, Area::Tokyo];

    pub fn label(&self) -> &'static str {
        match self {
            Area::National => "全国",
            Area::Tokyo => "東京都区部",
        }
    }

    /// `cdArea` parameter for the statistics API.
    pub fn api_code(&self) -> &'static str {
        match self {
            Area::National => AREA_CODE_NATIONAL,
            Area::Tokyo => AREA_CODE_TOKYO,
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "national" | "jp" | "全国" => Ok(Area::National),
            "tokyo" | "東京都区部" => Ok(Area::Tokyo),
            other => Err(Error::Config(format!("unknown area: {other}"))),
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/* ---------------- Sources ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    /// e-Stat application id; falls back to `$ESTAT_API_ID`.
    pub app_id: Option<String>,
    pub start: Month,
    /// Last month requested; `None` means the current month.
    pub end: Option<Month>,
    /// Read the weight workbook from disk instead of the Statistics Bureau site.
    pub weights_path: Option<PathBuf>,
    pub weights_url: String,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            app_id: None,
            start: Month::parse(DEFAULT_START_MONTH).unwrap_or(Month::current()),
            end: None,
            weights_path: None,
            weights_url: WEIGHTS_URL.to_string(),
        }
    }
}

impl SourceOptions {
    pub fn app_id(&self) -> Result<String> {
        if let Some(id) = self.app_id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            return Ok(id.to_string());
        }
        std::env::var(ESTAT_APP_ID_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!("no e-Stat application id (set ${ESTAT_APP_ID_ENV})"))
            })
    }

    pub fn end_month(&self) -> Month {
        self.end.unwrap_or_else(Month::current)
    }
}

/* ---------------- Display ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayKind {
    IndexVsBase,
    YearOverYear,
}

impl DisplayKind {
    /// The axis label of the mode this kind selects.
    pub fn label(&self) -> &'static str {
        DisplayOptions { kind: *self, ..DisplayOptions::default() }.mode().label()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    pub kind: DisplayKind,
    /// Only read when `kind` is `IndexVsBase`.
    pub base_month: Month,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            kind: DisplayKind::YearOverYear,
            base_month: Month::parse(DEFAULT_BASE_MONTH).unwrap_or(Month::current()),
        }
    }
}

impl DisplayOptions {
    pub fn mode(&self) -> DisplayMode {
        match self.kind {
            DisplayKind::IndexVsBase => DisplayMode::IndexVsBase(self.base_month),
            DisplayKind::YearOverYear => DisplayMode::YearOverYear,
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let mut name = self.out_path.file_stem.clone();
        match &self.out_path.ext {
            Some(ext) => { name.push("."); name.push(ext); }
            None => { name.push("."); name.push(self.format.ext()); }
        }
        path.push(name);
        path
    }

    /// Parse user text into dir + stem. A typed extension sticks; otherwise
    /// the format decides it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p
            .extension()
            .filter(|e| !e.eq_ignore_ascii_case("csv") && !e.eq_ignore_ascii_case("tsv"))
            .map(|e| e.to_os_string());
    }

    pub fn delim(&self) -> char {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString,    // without extension
    ext: Option<OsString>,  // user-typed, non-format extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
