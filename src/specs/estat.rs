// src/specs/estat.rs
//! Reading *spec* for e-Stat `getStatsData` JSON responses.
//!
//! Purpose:
//! - Validate the response envelope (`RESULT.STATUS` / `RESULT.ERROR_MSG`).
//! - Join category metadata (`CLASS_INF`, class `cat01`) onto each observed
//!   value (`DATA_INF.VALUE`) by category code.
//! - Produce typed [`CpiRecord`]s with the root item normalised.
//!
//! Non-Responsibilities:
//! - **No networking, chunking or sorting** (see `fetch`).
//!
//! The API renders a single element where you would expect a one-element
//! array, so both `CLASS` and `VALUE` accept either shape.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::consts::{ESTAT_CATEGORY_CLASS, ESTAT_OK_PREFIX, ROOT_ITEM, TOP_LEVEL_PARENT};
use crate::core::Month;
use crate::data::CpiRecord;
use crate::error::{Error, Result};

const ORIGIN: &str = "e-Stat response";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(v) => v,
            OneOrMany::One(x) => vec![x],
        }
    }
}

/// Numbers sometimes arrive quoted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumOrText {
    Num(i64),
    Text(String),
}

impl NumOrText {
    fn as_i64(&self) -> Option<i64> {
        match self {
            NumOrText::Num(n) => Some(*n),
            NumOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct Envelope {
    get_stats_data: GetStatsData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct GetStatsData {
    result: ResultHeader,
    statistical_data: Option<StatisticalData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct ResultHeader {
    status: NumOrText,
    error_msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct StatisticalData {
    class_inf: Option<ClassInf>,
    data_inf: Option<DataInf>,
}

#[derive(Debug, Deserialize)]
struct ClassInf {
    #[serde(rename = "CLASS_OBJ")]
    class_obj: OneOrMany<ClassObj>,
}

#[derive(Debug, Deserialize)]
struct ClassObj {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "CLASS")]
    class: OneOrMany<Class>,
}

#[derive(Debug, Deserialize)]
struct Class {
    #[serde(rename = "@code")]
    code: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@level")]
    level: Option<NumOrText>,
    #[serde(rename = "@parentCode")]
    parent_code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DataInf {
    #[serde(rename = "VALUE")]
    value: Option<OneOrMany<Value>>,
}

#[derive(Debug, Deserialize)]
struct Value {
    #[serde(rename = "@cat01")]
    cat01: String,
    #[serde(rename = "@time")]
    time: String,
    #[serde(rename = "$")]
    value: String,
}

/// What one chunk's response amounted to.
#[derive(Debug, PartialEq)]
pub enum ChunkOutcome {
    Records(Vec<CpiRecord>),
    /// Envelope fine, but the source reported a non-zero status.
    NoData { status: i64, message: String },
}

/// Parse one response body.
///
/// A message that does not report normal completion is a fetch failure for
/// the whole load; a non-zero status with a normal message is "no data".
pub fn parse_response(body: &str) -> Result<ChunkOutcome> {
    let env: Envelope = serde_json::from_str(body)
        .map_err(|e| Error::schema(ORIGIN, format!("cannot decode JSON: {e}")))?;
    let data = env.get_stats_data;

    if !data.result.error_msg.starts_with(ESTAT_OK_PREFIX) {
        return Err(Error::Fetch(format!("e-Stat refused the request: {}", data.result.error_msg)));
    }
    let status = data
        .result
        .status
        .as_i64()
        .ok_or_else(|| Error::schema(ORIGIN, "non-numeric STATUS"))?;
    if status != 0 {
        return Ok(ChunkOutcome::NoData { status, message: data.result.error_msg });
    }

    let stats = data
        .statistical_data
        .ok_or_else(|| Error::schema(ORIGIN, "missing STATISTICAL_DATA"))?;
    let classes = stats
        .class_inf
        .ok_or_else(|| Error::schema(ORIGIN, "missing CLASS_INF"))?
        .class_obj
        .into_vec()
        .into_iter()
        .find(|o| o.id == ESTAT_CATEGORY_CLASS)
        .ok_or_else(|| Error::schema(ORIGIN, format!("no {ESTAT_CATEGORY_CLASS} class")))?
        .class
        .into_vec();
    let by_code: HashMap<&str, &Class> = classes.iter().map(|c| (c.code.as_str(), c)).collect();

    let values = stats
        .data_inf
        .and_then(|d| d.value)
        .map(OneOrMany::into_vec)
        .unwrap_or_default();

    let mut out = Vec::with_capacity(values.len());
    for v in values {
        // Annual aggregates share the time axis; keep months only.
        if v.time.ends_with("00") {
            continue;
        }
        let month = Month::from_period_code(&v.time)
            .ok_or_else(|| Error::schema(ORIGIN, format!("bad period code {:?}", v.time)))?;
        let class = by_code
            .get(v.cat01.as_str())
            .ok_or_else(|| Error::schema(ORIGIN, format!("value for unknown category {}", v.cat01)))?;
        let Ok(value) = v.value.trim().parse::<f64>() else {
            logd!("e-Stat: {} {} has no number ({:?}), skipped", class.name, month, v.value);
            continue;
        };
        out.push(normalize(class, month, value)?);
    }
    Ok(ChunkOutcome::Records(out))
}

/// The source encodes the root item inconsistently; pin it to level 0 with
/// no parent. Items without a parent link hang off the top-level sentinel.
fn normalize(class: &Class, month: Month, value: f64) -> Result<CpiRecord> {
    if class.name == ROOT_ITEM {
        return Ok(CpiRecord { parent: None, level: 0, name: class.name.clone(), month, value });
    }
    let level = class
        .level
        .as_ref()
        .and_then(NumOrText::as_i64)
        .and_then(|l| u32::try_from(l).ok())
        .ok_or_else(|| Error::schema(ORIGIN, format!("{} has no level", class.name)))?;
    let parent = class
        .parent_code
        .clone()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| TOP_LEVEL_PARENT.to_string());
    Ok(CpiRecord { parent: Some(parent), level, name: class.name.clone(), month, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
      "GET_STATS_DATA": {
        "RESULT": { "STATUS": 0, "ERROR_MSG": "正常に終了しました。", "DATE": "2024-01-19T10:00:00.000+09:00" },
        "STATISTICAL_DATA": {
          "CLASS_INF": {
            "CLASS_OBJ": [
              { "@id": "tab", "@name": "表章項目", "CLASS": { "@code": "1", "@name": "指数", "@level": "" } },
              { "@id": "cat01", "@name": "類・品目", "CLASS": [
                { "@code": "0001", "@name": "0001 総合", "@level": "1", "@parentCode": "0161" },
                { "@code": "0002", "@name": "0002 食料", "@level": "2" },
                { "@code": "0003", "@name": "0003 穀類", "@level": "3", "@parentCode": "0002" }
              ]}
            ]
          },
          "DATA_INF": {
            "NOTE": { "@char": "-", "$": "該当数値なし" },
            "VALUE": [
              { "@tab": "1", "@cat01": "0001", "@area": "00000", "@time": "2020000101", "@unit": "", "$": "100.1" },
              { "@tab": "1", "@cat01": "0002", "@area": "00000", "@time": "2020000101", "@unit": "", "$": "99.5" },
              { "@tab": "1", "@cat01": "0003", "@area": "00000", "@time": "2020000101", "@unit": "", "$": "-" },
              { "@tab": "1", "@cat01": "0001", "@area": "00000", "@time": "2020000000", "@unit": "", "$": "100.0" }
            ]
          }
        }
      }
    }"#;

    #[test]
    fn joins_classes_and_normalizes_root() {
        let ChunkOutcome::Records(recs) = parse_response(BODY).unwrap() else {
            panic!("expected records");
        };
        assert_eq!(recs.len(), 2);
        let root = &recs[0];
        assert_eq!(root.name, "0001 総合");
        assert_eq!(root.parent, None);
        assert_eq!(root.level, 0);
        assert_eq!(root.month, Month::new(2020, 1).unwrap());

        let food = &recs[1];
        assert_eq!(food.parent.as_deref(), Some(TOP_LEVEL_PARENT));
        assert_eq!(food.level, 2);
        assert_eq!(food.value, 99.5);
    }

    #[test]
    fn nonzero_status_is_no_data() {
        let body = r#"{"GET_STATS_DATA":{"RESULT":{"STATUS":1,"ERROR_MSG":"正常に終了しましたが、該当データはありませんでした。"}}}"#;
        assert!(matches!(parse_response(body).unwrap(), ChunkOutcome::NoData { status: 1, .. }));
    }

    #[test]
    fn error_message_fails_the_load() {
        let body = r#"{"GET_STATS_DATA":{"RESULT":{"STATUS":100,"ERROR_MSG":"認証に失敗しました。"}}}"#;
        assert!(matches!(parse_response(body), Err(Error::Fetch(_))));
    }

    #[test]
    fn unknown_category_is_a_schema_error() {
        let body = BODY.replace(r#""@cat01": "0002""#, r#""@cat01": "9999""#);
        assert!(matches!(parse_response(&body), Err(Error::Schema { .. })));
    }
}
