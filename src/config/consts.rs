// src/config/consts.rs

// e-Stat API
pub const ESTAT_ENDPOINT: &str = "http://api.e-stat.go.jp/rest/3.0/app/json/getStatsData";
pub const ESTAT_STATS_DATA_ID: &str = "0003427113";
pub const ESTAT_APP_ID_ENV: &str = "ESTAT_API_ID";
pub const ESTAT_OK_PREFIX: &str = "正常に終了しました";
pub const ESTAT_CATEGORY_CLASS: &str = "cat01";
pub const AREA_CODE_NATIONAL: &str = "00000";
pub const AREA_CODE_TOKYO: &str = "13A01";

/// The API caps how many periods one request may name.
pub const CHUNK_MONTHS: usize = 10;

// Weight workbook
pub const WEIGHTS_URL: &str = "https://www.stat.go.jp/data/cpi/2020/kaisetsu/zuhyou/4-1.xlsx";
pub const WEIGHTS_SHEET: &str = "品目情報一覧";
pub const WEIGHTS_HEADER_ROW: usize = 2;
pub const WEIGHTS_FIRST_DATA_ROW: usize = 5;
pub const WEIGHTS_ROWS: usize = 728;

// Taxonomy
pub const ROOT_ITEM: &str = "0001 総合";
pub const TOP_LEVEL_PARENT: &str = "0";

// Defaults
pub const DEFAULT_START_MONTH: &str = "2000-01";
pub const DEFAULT_BASE_MONTH: &str = "2020-01";
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

// Chart
pub const CHART_WINDOW_MONTHS: usize = 13;
/// Each end of the visible range widens by this share of its own magnitude.
pub const CHART_Y_MARGIN: f64 = 0.1;

// Net
pub const CONNECT_TIMEOUT_SECS: u64 = 15;
pub const READ_TIMEOUT_SECS: u64 = 60;
pub const USER_AGENT: &str = concat!("cpi_watch/", env!("CARGO_PKG_VERSION"));

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "cpi";
