// tests/export.rs
use std::fs;
use std::path::PathBuf;

mod common;

use common::m;
use cpi_watch::config::options::{AppOptions, ExportFormat};
use cpi_watch::csv::{table_to_string, write_row};
use cpi_watch::file::{export_table, sanitize_item_filename};
use cpi_watch::table::{Column, SeriesTable};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("cpi_watch_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn sample() -> SeriesTable {
    SeriesTable::new(
        vec![m(2020, 1), m(2020, 2)],
        vec![
            Column { name: "0001 総合".into(), values: vec![Some(0.0), Some(0.0125)] },
            Column { name: "a,b".into(), values: vec![Some(-0.5), None] },
        ],
    )
}

#[test]
fn csv_has_header_and_quotes_separators() {
    let txt = table_to_string(&sample(), true, ',');
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines[0], "month,0001 総合,\"a,b\"");
    assert_eq!(lines[1], "2020-01,0.000000,-0.500000");
    assert_eq!(lines[2], "2020-02,0.012500,");
}

#[test]
fn headers_are_optional() {
    let txt = table_to_string(&sample(), false, '\t');
    assert_eq!(txt.lines().count(), 2);
    assert!(txt.starts_with("2020-01\t"));
}

#[test]
fn quotes_are_doubled() {
    let mut buf = Vec::new();
    write_row(&mut buf, &["say \"hi\"".to_string(), "x".to_string()], ',').unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "\"say \"\"hi\"\"\",x\n");
}

#[test]
fn export_creates_directories_and_uses_format_extension() {
    let dir = tmp_dir("fmt");
    let mut opts = AppOptions::default();
    opts.export.format = ExportFormat::Tsv;
    opts.export.set_path(dir.join("nested").join("food").to_str().unwrap());

    let path = export_table(&opts.export, &sample()).unwrap();
    assert!(path.to_string_lossy().ends_with("food.tsv"));

    let body = fs::read_to_string(&path).unwrap();
    assert!(body.starts_with("month\t0001 総合\ta,b\n"));
}

#[test]
fn user_extension_survives_format_change() {
    let dir = tmp_dir("ext");
    let mut opts = AppOptions::default();
    opts.export.set_path(dir.join("hello.txt").to_str().unwrap());
    opts.export.format = ExportFormat::Tsv;

    let path = export_table(&opts.export, &sample()).unwrap();
    assert!(path.to_string_lossy().ends_with("hello.txt"));
    assert!(fs::read_to_string(&path).unwrap().contains('\t'));
}

#[test]
fn item_names_become_file_names() {
    assert_eq!(sanitize_item_filename("0002 食料"), "0002_食料");
    assert_eq!(sanitize_item_filename("全国_1001 うるち米(A)"), "全国_1001_うるち米_A");
    assert_eq!(sanitize_item_filename("///"), "item");
}
