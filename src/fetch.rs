// src/fetch.rs
//
// Loaders: pull bytes from the two upstream sources and hand them to the
// specs for shaping. Network access sits behind `StatsApi` / `WeightSource`
// so everything above can run against in-memory fakes.

use std::io::{Cursor, Read, Seek};
use std::path::PathBuf;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};

use crate::{
    config::consts::{CHUNK_MONTHS, ESTAT_ENDPOINT, ESTAT_STATS_DATA_ID, WEIGHTS_SHEET},
    config::options::{Area, SourceOptions},
    core::{Month, net},
    data::{CpiRecord, CpiTable, WeightTable},
    error::{Error, Result},
    progress::Progress,
    specs::{
        estat::{self, ChunkOutcome},
        weights::{self, Cell},
    },
};

/* ---------------- e-Stat ---------------- */

/// One `getStatsData` call for a list of months; returns the raw JSON body.
pub trait StatsApi {
    fn get_stats_data(&self, area: Area, months: &[Month]) -> Result<String>;
}

pub struct EStatClient {
    agent: ureq::Agent,
    app_id: String,
    endpoint: String,
}

impl EStatClient {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            agent: net::agent(),
            app_id: app_id.into(),
            endpoint: ESTAT_ENDPOINT.to_string(),
        }
    }

    pub fn from_options(opts: &SourceOptions) -> Result<Self> {
        Ok(Self::new(opts.app_id()?))
    }
}

impl StatsApi for EStatClient {
    fn get_stats_data(&self, area: Area, months: &[Month]) -> Result<String> {
        let periods = months.iter().map(Month::period_code).collect::<Vec<_>>().join(",");
        let query = [
            ("cdTab", "1"),
            ("appId", self.app_id.as_str()),
            ("lang", "J"),
            ("statsDataId", ESTAT_STATS_DATA_ID),
            ("metaGetFlg", "Y"),
            ("cntGetFlg", "N"),
            ("explanationGetFlg", "Y"),
            ("annotationGetFlg", "Y"),
            ("sectionHeaderFlg", "1"),
            ("replaceSpChars", "0"),
            ("cdArea", area.api_code()),
            ("cdTime", periods.as_str()),
        ];
        net::http_get(&self.agent, &self.endpoint, &query)
    }
}

/// Split `months` into request-sized chunks. Purely a transport limit.
pub fn chunk_months(months: &[Month]) -> Vec<&[Month]> {
    months.chunks(CHUNK_MONTHS).collect()
}

/// Full CPI table for `area` over `start..=end`.
///
/// Any chunk whose envelope is not a normal completion aborts the load;
/// chunks reporting "no data" are skipped.
pub fn collect_cpi(
    api: &dyn StatsApi,
    area: Area,
    start: Month,
    end: Month,
    progress: &mut dyn Progress,
) -> Result<CpiTable> {
    let months = Month::range_inclusive(start, end);
    let chunks = chunk_months(&months);

    logf!("CPI: Begin area={} {}..={} requests={}", area, start, end, chunks.len());
    progress.begin(chunks.len());
    progress.log(&format!("Fetching {} CPI ({} requests)…", area, chunks.len()));

    let result = fetch_chunks(api, area, &chunks, &mut *progress);

    progress.finish();

    let table = CpiTable::new(result?)?;
    logf!("CPI: OK area={} records={} months={}", area, table.len(), table.months().len());
    Ok(table)
}

fn fetch_chunks(
    api: &dyn StatsApi,
    area: Area,
    chunks: &[&[Month]],
    progress: &mut dyn Progress,
) -> Result<Vec<CpiRecord>> {
    let mut all = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let (Some(&first), Some(&last)) = (chunk.first(), chunk.last()) else { continue };

        let body = api.get_stats_data(area, chunk).inspect_err(|e| {
            loge!("CPI: Chunk {} ({}..={}) failed: {}", i, first, last, e);
        })?;

        match estat::parse_response(&body)? {
            ChunkOutcome::Records(mut recs) => {
                logd!("CPI: Chunk {} ({}..={}) records={}", i, first, last, recs.len());
                all.append(&mut recs);
                progress.chunk_done(i, first, last);
            }
            ChunkOutcome::NoData { status, message } => {
                logw!("CPI: Chunk {} ({}..={}) skipped, status={} {}", i, first, last, status, message);
                progress.chunk_skipped(i, first, last);
            }
        }
    }
    Ok(all)
}

/* ---------------- Weight workbook ---------------- */

/// Anything that can hand over the weight sheet as a cell grid.
pub trait WeightSource {
    fn describe(&self) -> String;
    fn sheet(&self) -> Result<Vec<Vec<Cell>>>;
}

/// The workbook as published on the Statistics Bureau site.
pub struct WorkbookUrl {
    agent: ureq::Agent,
    url: String,
}

impl WorkbookUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self { agent: net::agent(), url: url.into() }
    }
}

impl WeightSource for WorkbookUrl {
    fn describe(&self) -> String { self.url.clone() }

    fn sheet(&self) -> Result<Vec<Vec<Cell>>> {
        let bytes = net::http_get_bytes(&self.agent, &self.url, &[])?;
        read_sheet(Cursor::new(bytes))
    }
}

/// A local copy of the workbook.
pub struct WorkbookFile {
    path: PathBuf,
}

impl WorkbookFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WeightSource for WorkbookFile {
    fn describe(&self) -> String { self.path.display().to_string() }

    fn sheet(&self) -> Result<Vec<Vec<Cell>>> {
        let bytes = std::fs::read(&self.path)?;
        read_sheet(Cursor::new(bytes))
    }
}

/// Pick the source the options ask for.
pub fn weight_source(opts: &SourceOptions) -> Box<dyn WeightSource + Send> {
    match &opts.weights_path {
        Some(path) => Box::new(WorkbookFile::new(path.clone())),
        None => Box::new(WorkbookUrl::new(opts.weights_url.clone())),
    }
}

/// Decode the weight sheet into a grid anchored at sheet cell A1.
fn read_sheet<RS: Read + Seek>(reader: RS) -> Result<Vec<Vec<Cell>>> {
    let mut wb: Xlsx<RS> = open_workbook_from_rs(reader)
        .map_err(|e| Error::schema("weight workbook", format!("not an xlsx file: {e}")))?;
    let range = wb
        .worksheet_range(WEIGHTS_SHEET)
        .map_err(|e| Error::schema("weight workbook", format!("sheet {WEIGHTS_SHEET}: {e}")))?;

    // calamine trims leading empty rows/columns; put them back so layout
    // offsets stay absolute.
    let (row0, col0) = range.start().unwrap_or((0, 0));
    let mut grid: Vec<Vec<Cell>> = vec![Vec::new(); row0 as usize];
    for r in range.rows() {
        let mut out = vec![Cell::Empty; col0 as usize];
        out.extend(r.iter().map(to_cell));
        grid.push(out);
    }
    Ok(grid)
}

fn to_cell(d: &Data) -> Cell {
    match d {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

pub fn collect_weights(source: &dyn WeightSource) -> Result<WeightTable> {
    logf!("Weights: Begin source={}", source.describe());
    let grid = source.sheet()?;
    let table = weights::parse_sheet(&grid)?;
    logf!("Weights: OK rows={}", table.len());
    Ok(table)
}
