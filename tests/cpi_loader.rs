// tests/cpi_loader.rs
//
// Chunked CPI download against a fake e-Stat.

mod common;

use std::collections::BTreeSet;

use common::{FakeApi, m};
use cpi_watch::config::consts::{CHUNK_MONTHS, TOP_LEVEL_PARENT};
use cpi_watch::config::options::Area;
use cpi_watch::core::Month;
use cpi_watch::error::Error;
use cpi_watch::fetch::{chunk_months, collect_cpi};
use cpi_watch::progress::{NullProgress, Progress};

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<usize>,
    skipped: Vec<usize>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn chunk_done(&mut self, index: usize, _: Month, _: Month) { self.done.push(index); }
    fn chunk_skipped(&mut self, index: usize, _: Month, _: Month) { self.skipped.push(index); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn twenty_five_months_take_three_requests() {
    let api = FakeApi::default();
    let mut rec = Recorder::default();
    let table = collect_cpi(&api, Area::National, m(2020, 1), m(2022, 1), &mut rec).unwrap();

    let sizes: Vec<usize> = api.requests.borrow().iter().map(|(_, ms)| ms.len()).collect();
    assert_eq!(sizes, vec![10, 10, 5]);
    assert!(api.requests.borrow().iter().all(|(a, _)| *a == Area::National));

    let months = table.months();
    assert_eq!(months.len(), 25);
    assert_eq!(months.first(), Some(&m(2020, 1)));
    assert_eq!(months.last(), Some(&m(2022, 1)));

    assert_eq!(rec.total, 3);
    assert_eq!(rec.done, vec![0, 1, 2]);
    assert!(rec.finished);
}

#[test]
fn chunks_cover_the_range_in_order() {
    let months = Month::range_inclusive(m(2019, 11), m(2021, 2));
    let chunks = chunk_months(&months);
    assert!(chunks.iter().all(|c| c.len() <= CHUNK_MONTHS));
    let joined: Vec<Month> = chunks.concat();
    assert_eq!(joined, months);
}

#[test]
fn no_data_chunk_is_skipped_not_fatal() {
    let api = FakeApi { empty_chunks: vec![1], ..FakeApi::default() };
    let mut rec = Recorder::default();
    let table = collect_cpi(&api, Area::Tokyo, m(2020, 1), m(2022, 1), &mut rec).unwrap();

    assert_eq!(table.months().len(), 15);
    assert!(!table.months().contains(&m(2020, 11)));
    assert_eq!(rec.skipped, vec![1]);
    assert_eq!(rec.done, vec![0, 2]);
}

#[test]
fn refused_request_fails_the_load() {
    let api = FakeApi { refuse: true, ..FakeApi::default() };
    let err = collect_cpi(&api, Area::National, m(2020, 1), m(2020, 3), &mut NullProgress).unwrap_err();
    assert!(matches!(err, Error::Fetch(_)), "{err}");
}

#[test]
fn root_and_top_level_are_normalized() {
    let api = FakeApi::default();
    let table = collect_cpi(&api, Area::National, m(2020, 1), m(2020, 2), &mut NullProgress).unwrap();

    let root: Vec<_> = table.records().iter().filter(|r| r.name == common::ROOT).collect();
    assert_eq!(root.len(), 2);
    assert!(root.iter().all(|r| r.parent.is_none() && r.level == 0));

    let top: BTreeSet<&str> =
        table.children_of(TOP_LEVEL_PARENT).iter().map(|r| r.name.as_str()).collect();
    assert_eq!(top, BTreeSet::from([common::FOOD, common::HOUSING]));

    let food: BTreeSet<&str> = table.children_of("0002").iter().map(|r| r.name.as_str()).collect();
    assert_eq!(food, BTreeSet::from([common::RICE, common::BREAD]));
}

#[test]
fn loading_twice_gives_the_same_table() {
    let a = collect_cpi(&FakeApi::default(), Area::National, m(2019, 6), m(2020, 9), &mut NullProgress).unwrap();
    let b = collect_cpi(&FakeApi::default(), Area::National, m(2019, 6), m(2020, 9), &mut NullProgress).unwrap();
    assert_eq!(a, b);
}

#[test]
fn values_survive_the_wire() {
    let api = FakeApi::default();
    let table = collect_cpi(&api, Area::National, m(2020, 1), m(2020, 1), &mut NullProgress).unwrap();
    let s = table.series(common::BREAD);
    let v = s[&m(2020, 1)];
    assert!((v - common::value_of(common::BREAD, m(2020, 1))).abs() < 0.051);
}
