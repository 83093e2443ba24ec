// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    config::options::{AppOptions, Area, DisplayKind, ExportFormat},
    core::Month,
    csv::write_table,
    fetch::{self, EStatClient},
    file,
    navigator::Walk,
    progress::{NullProgress, Progress},
    session::Session,
    transform,
};

/// Drill into the Japanese CPI item hierarchy and print or export the series.
#[derive(Debug, Parser)]
#[command(name = "cli", version, about)]
pub struct Args {
    /// Regional index
    #[arg(long, value_enum, default_value_t = AreaArg::National)]
    pub area: AreaArg,

    /// Item chosen at each level below 総合, in order (repeatable)
    #[arg(long = "item", value_name = "NAME")]
    pub items: Vec<String>,

    /// Display transform
    #[arg(long, value_enum, default_value_t = ModeArg::Yoy)]
    pub mode: ModeArg,

    /// Base month for `--mode base`
    #[arg(long, value_parser = Month::parse)]
    pub base: Option<Month>,

    /// First month requested (YYYY-MM)
    #[arg(long, value_parser = Month::parse)]
    pub start: Option<Month>,

    /// Last month requested (YYYY-MM); defaults to the current month
    #[arg(long, value_parser = Month::parse)]
    pub end: Option<Month>,

    /// e-Stat application id (else $ESTAT_API_ID)
    #[arg(long)]
    pub app_id: Option<String>,

    /// Local copy of the weight workbook
    #[arg(long, value_name = "XLSX")]
    pub weights: Option<PathBuf>,

    /// Print the items selectable below the last choice and exit
    #[arg(long)]
    pub list: bool,

    /// Check weight reconciliation for every class item and exit
    #[arg(long)]
    pub audit: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    #[arg(long)]
    pub include_headers: bool,

    /// No progress on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum AreaArg { National, Tokyo }

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg { Yoy, Base }

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg { Csv, Tsv }

impl From<AreaArg> for Area {
    fn from(a: AreaArg) -> Self {
        match a { AreaArg::National => Area::National, AreaArg::Tokyo => Area::Tokyo }
    }
}

impl Args {
    pub fn area(&self) -> Area { self.area.into() }

    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        let src = &mut opts.source;
        src.app_id = self.app_id.clone();
        if let Some(start) = self.start { src.start = start; }
        src.end = self.end;
        src.weights_path = self.weights.clone();

        let disp = &mut opts.display;
        disp.kind = match self.mode {
            ModeArg::Yoy => DisplayKind::YearOverYear,
            ModeArg::Base => DisplayKind::IndexVsBase,
        };
        if let Some(base) = self.base { disp.base_month = base; }

        let exp = &mut opts.export;
        exp.format = match self.format { FormatArg::Csv => ExportFormat::Csv, FormatArg::Tsv => ExportFormat::Tsv };
        exp.include_headers = self.include_headers;
        if let Some(out) = &self.out {
            exp.set_path(&out.to_string_lossy());
        }
        opts
    }
}

/// Progress lines on stderr.
struct CliProgress {
    total: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) { self.total = total; }

    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }

    fn chunk_done(&mut self, index: usize, first: Month, last: Month) {
        eprintln!("  [{}/{}] {}..{}", index + 1, self.total, first, last);
    }

    fn chunk_skipped(&mut self, index: usize, first: Month, last: Month) {
        eprintln!("  [{}/{}] {}..{} (no data)", index + 1, self.total, first, last);
    }
}

pub fn run() -> color_eyre::Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> color_eyre::Result<()> {
    let opts = args.to_options();
    let area = args.area();

    let api = EStatClient::from_options(&opts.source)?;
    let weights = fetch::weight_source(&opts.source);

    let mut null = NullProgress;
    let mut cli_progress = CliProgress { total: 0 };
    let progress: &mut dyn Progress = if args.quiet { &mut null } else { &mut cli_progress };
    let session = Session::load(&opts.source, &api, weights.as_ref(), &[area], progress)?;
    let nav = session.navigator(area)?;

    if args.audit {
        let failures = nav.audit();
        for e in &failures {
            println!("{e}");
        }
        if !failures.is_empty() {
            return Err(color_eyre::eyre::eyre!("{} item(s) failed reconciliation", failures.len()));
        }
        eprintln!("All class items reconcile ({area}).");
        return Ok(());
    }

    let walk = nav.walk(&args.items)?;
    if args.list {
        print_options(&walk)?;
        return Ok(());
    }

    let step = walk.last();
    let shown = transform::apply(&step.table, opts.display.mode());
    if shown.is_empty() {
        eprintln!("No data for {} ({})", step.item(), opts.display.mode().label());
    }

    if args.out.is_some() {
        let path = file::export_table(&opts.export, &shown)?;
        if !args.quiet {
            eprintln!("Wrote {} rows → {}", shown.len(), path.display());
        }
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        write_table(&mut lock, &shown, opts.export.include_headers, opts.export.delim())?;
        lock.flush()?;
    }
    Ok(())
}

/// Next choices with their share of the current item's weight.
fn print_options(walk: &Walk) -> io::Result<()> {
    let step = walk.last();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "# {}", walk.levels().join(" > "))?;
    for name in &step.options {
        match step.ratios.get(name) {
            Some(r) => writeln!(out, "{}\t{:.4}", name, r)?,
            None => writeln!(out, "{}", name)?,
        }
    }
    Ok(())
}
