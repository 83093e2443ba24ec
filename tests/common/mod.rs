// tests/common/mod.rs
//
// Small in-memory taxonomy shared by the integration tests:
//
//   0001 総合            10000 / 10000
//   ├── 0002 食料         6000 /  5000   (class)
//   │   ├── 1001 米       2500 /  2000
//   │   └── 1002 パン     3500 /  3000
//   └── 0003 住居         4000 /  5000   (item)
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use cpi_watch::config::options::Area;
use cpi_watch::core::Month;
use cpi_watch::data::{CpiRecord, CpiTable, WeightRow, WeightTable};
use cpi_watch::fetch::StatsApi;
use cpi_watch::session::Session;

pub const ROOT: &str = "0001 総合";
pub const FOOD: &str = "0002 食料";
pub const HOUSING: &str = "0003 住居";
pub const RICE: &str = "1001 米";
pub const BREAD: &str = "1002 パン";

pub fn m(year: i32, month: u32) -> Month {
    Month::new(year, month).unwrap()
}

pub fn weights() -> WeightTable {
    WeightTable::new(vec![
        WeightRow::new("0001", "総合", Some("0001".into()), 10000.0, 10000.0),
        WeightRow::new("0002", "食料", Some("0002".into()), 6000.0, 5000.0),
        WeightRow::new("1001", "米", None, 2500.0, 2000.0),
        WeightRow::new("1002", "パン", None, 3500.0, 3000.0),
        WeightRow::new("0003", "住居", None, 4000.0, 5000.0),
    ])
    .unwrap()
}

/// (parent, level, name) for every series in the fixture.
pub fn taxonomy() -> Vec<(Option<&'static str>, u32, &'static str)> {
    vec![
        (None, 0, ROOT),
        (Some("0"), 2, FOOD),
        (Some("0"), 2, HOUSING),
        (Some("0002"), 3, RICE),
        (Some("0002"), 3, BREAD),
    ]
}

/// Deterministic, distinct value per series and month.
pub fn value_of(name: &str, month: Month) -> f64 {
    let seed = name.bytes().take(4).map(|b| (b - b'0') as f64).sum::<f64>();
    100.0 + seed + (month.index() % 120) as f64 * 0.1
}

pub fn cpi(months: &[Month]) -> CpiTable {
    let mut recs = Vec::new();
    for &(parent, level, name) in &taxonomy() {
        for &month in months {
            recs.push(CpiRecord {
                parent: parent.map(str::to_string),
                level,
                name: name.to_string(),
                month,
                value: value_of(name, month),
            });
        }
    }
    CpiTable::new(recs).unwrap()
}

pub fn session(months: &[Month]) -> Session {
    let mut tables = BTreeMap::new();
    for area in Area::ALL {
        tables.insert(area, cpi(months));
    }
    Session::from_parts(weights(), tables)
}

/* ---------------- Fake e-Stat ---------------- */

pub fn estat_body(status: i64, message: &str, months: &[Month]) -> String {
    let classes: Vec<serde_json::Value> = taxonomy()
        .iter()
        .map(|(parent, level, name)| {
            let code = &name[..4];
            let mut c = serde_json::json!({ "@code": code, "@name": name, "@level": level.to_string() });
            if let Some(p) = parent.filter(|p| *p != "0") {
                c["@parentCode"] = p.into();
            }
            c
        })
        .collect();

    let mut values = Vec::new();
    for &(_, _, name) in &taxonomy() {
        for &month in months {
            values.push(serde_json::json!({
                "@tab": "1",
                "@cat01": &name[..4],
                "@area": "00000",
                "@time": month.period_code(),
                "@unit": "",
                "$": format!("{:.1}", value_of(name, month)),
            }));
        }
    }

    serde_json::json!({
        "GET_STATS_DATA": {
            "RESULT": { "STATUS": status, "ERROR_MSG": message },
            "STATISTICAL_DATA": {
                "CLASS_INF": { "CLASS_OBJ": [
                    { "@id": "tab", "CLASS": { "@code": "1", "@name": "指数" } },
                    { "@id": "cat01", "CLASS": classes },
                ]},
                "DATA_INF": { "VALUE": values },
            }
        }
    })
    .to_string()
}

pub const OK_MSG: &str = "正常に終了しました。";
pub const NO_DATA_MSG: &str = "正常に終了しましたが、該当データはありませんでした。";

/// Answers every request with the fixture, remembering what was asked for.
/// Chunks listed in `empty_chunks` (by request index) report "no data".
#[derive(Default)]
pub struct FakeApi {
    pub requests: RefCell<Vec<(Area, Vec<Month>)>>,
    pub empty_chunks: Vec<usize>,
    pub refuse: bool,
}

impl StatsApi for FakeApi {
    fn get_stats_data(&self, area: Area, months: &[Month]) -> cpi_watch::Result<String> {
        let mut reqs = self.requests.borrow_mut();
        let ix = reqs.len();
        reqs.push((area, months.to_vec()));

        if self.refuse {
            return Ok(estat_body(100, "認証に失敗しました。", &[]));
        }
        if self.empty_chunks.contains(&ix) {
            return Ok(estat_body(1, NO_DATA_MSG, &[]));
        }
        Ok(estat_body(0, OK_MSG, months))
    }
}
