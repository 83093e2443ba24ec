// tests/navigator.rs
//
// Drill-down steps, weight reconciliation and selection rules.

mod common;

use common::{BREAD, FOOD, HOUSING, RICE, ROOT, m};
use cpi_watch::config::consts::TOP_LEVEL_PARENT;
use cpi_watch::config::options::Area;
use cpi_watch::core::Month;
use cpi_watch::data::{WeightRow, WeightTable};
use cpi_watch::error::Error;
use cpi_watch::navigator::{Navigator, weights_match};
use cpi_watch::transform::{self, DisplayMode};

fn months() -> Vec<Month> {
    Month::range_inclusive(m(2019, 1), m(2021, 12))
}

#[test]
fn root_step_splits_weight_between_top_level_items() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    let root = nav.root().unwrap();

    assert_eq!(root.item(), ROOT);
    assert_eq!(root.child_parent, TOP_LEVEL_PARENT);
    assert_eq!(root.children().collect::<Vec<_>>(), vec![FOOD, HOUSING]);
    assert!((root.ratios[FOOD] - 0.6).abs() < 1e-12);
    assert!((root.ratios[HOUSING] - 0.4).abs() < 1e-12);

    // Only class rows can be drilled into.
    assert_eq!(root.options, vec![FOOD.to_string()]);
}

#[test]
fn base_month_row_is_zero() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    let root = nav.root().unwrap();

    let shown = transform::apply(&root.table, DisplayMode::IndexVsBase(m(2020, 1)));
    assert_eq!(shown.len(), 36);
    for c in shown.columns() {
        assert_eq!(shown.value(m(2020, 1), &c.name), Some(0.0));
    }
}

#[test]
fn ratios_follow_the_area() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let root = Navigator::new(&w, &cpi, Area::Tokyo).root().unwrap();
    assert!((root.ratios[FOOD] - 0.5).abs() < 1e-12);
    assert!((root.ratios[HOUSING] - 0.5).abs() < 1e-12);
}

#[test]
fn every_child_hangs_off_the_step_parent() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    let walk = nav.walk(&[FOOD]).unwrap();
    let step = walk.last();

    assert_eq!(walk.levels(), &[ROOT.to_string(), FOOD.to_string()]);
    assert_eq!(step.child_parent, "0002");
    assert_eq!(step.children().collect::<Vec<_>>(), vec![RICE, BREAD]);
    assert!(step.is_terminal());

    for name in step.children() {
        let recs: Vec<_> = cpi.records().iter().filter(|r| r.name == name).collect();
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.parent.as_deref() == Some(step.child_parent.as_str())));
    }
    let sum: f64 = step.ratios.values().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn step_table_reshapes_back_to_records() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    let step = nav.walk(&[FOOD]).unwrap().last().clone();

    let children: Vec<_> = step
        .table
        .to_triples()
        .into_iter()
        .filter(|(name, _, _)| name != FOOD)
        .collect();
    let source = cpi.children_of(&step.child_parent);
    assert_eq!(children.len(), source.len());
    for (name, month, value) in &children {
        let r = source
            .iter()
            .find(|r| &r.name == name && r.month == *month)
            .unwrap();
        assert_eq!(r.value, *value);
    }
}

#[test]
fn walk_accepts_a_leading_root() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    let a = nav.walk(&[ROOT, FOOD]).unwrap();
    let b = nav.walk(&[FOOD]).unwrap();
    assert_eq!(a.levels(), b.levels());
    assert_eq!(a.last().table, b.last().table);

    let empty: [&str; 0] = [];
    assert_eq!(nav.walk(&empty).unwrap().levels(), &[ROOT.to_string()]);
}

#[test]
fn invalid_choices_are_rejected() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    let root = nav.root().unwrap();

    // a grandchild, an item and something unknown
    for bad in [RICE, HOUSING, "9999 謎"] {
        let err = nav.descend(&root, bad).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection { .. }), "{bad}: {err}");
    }
    // past a terminal step
    let err = nav.walk(&[FOOD, RICE]).unwrap_err();
    assert!(matches!(err, Error::InvalidSelection { ref parent, .. } if parent == FOOD));
}

fn broken_weights() -> WeightTable {
    WeightTable::new(vec![
        WeightRow::new("0001", "総合", Some("0001".into()), 10000.0, 10000.0),
        WeightRow::new("0002", "食料", Some("0002".into()), 6000.0, 5000.0),
        WeightRow::new("1001", "米", None, 2400.0, 2000.0),
        WeightRow::new("1002", "パン", None, 3500.0, 3000.0),
        WeightRow::new("0003", "住居", None, 4000.0, 5000.0),
    ])
    .unwrap()
}

#[test]
fn children_that_do_not_add_up_are_an_integrity_error() {
    let (w, cpi) = (broken_weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);

    // Root still fine; the food step is not.
    let root = nav.root().unwrap();
    match nav.descend(&root, FOOD).unwrap_err() {
        Error::Integrity { item, area, expected, actual } => {
            assert_eq!(item, FOOD);
            assert_eq!(area, Area::National);
            assert_eq!(expected, 6000.0);
            assert_eq!(actual, 5900.0);
        }
        other => panic!("expected integrity error, got {other}"),
    }
    assert!(nav.walk(&[FOOD]).unwrap_err().is_panel_local());

    // The other area uses its own weights and is unaffected.
    let tokyo = Navigator::new(&w, &cpi, Area::Tokyo);
    assert!(tokyo.walk(&[FOOD]).is_ok());
}

#[test]
fn audit_lists_every_broken_class() {
    let cpi = common::cpi(&months());

    let ok = common::weights();
    assert!(Navigator::new(&ok, &cpi, Area::National).audit().is_empty());

    let broken = broken_weights();
    let failures = Navigator::new(&broken, &cpi, Area::National).audit();
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0], Error::Integrity { item, .. } if item == FOOD));
}

#[test]
fn tolerance_is_tight() {
    assert!(weights_match(10000.0 + 1e-9, 10000.0));
    assert!(weights_match(0.3 + 0.6, 0.9));
    assert!(!weights_match(10000.1, 10000.0));
    assert!(!weights_match(10000.005, 10000.0));
    assert!(!weights_match(5900.0, 6000.0));
}

#[test]
fn small_weight_gap_is_still_an_integrity_error() {
    let w = WeightTable::new(vec![
        WeightRow::new("0001", "総合", Some("0001".into()), 10000.0, 10000.0),
        WeightRow::new("0002", "食料", Some("0002".into()), 6000.0, 5000.0),
        WeightRow::new("1001", "米", None, 2500.005, 2000.0),
        WeightRow::new("1002", "パン", None, 3500.0, 3000.0),
        WeightRow::new("0003", "住居", None, 4000.0, 5000.0),
    ])
    .unwrap();
    let cpi = common::cpi(&months());
    let nav = Navigator::new(&w, &cpi, Area::National);

    match nav.walk(&[FOOD]).unwrap_err() {
        Error::Integrity { item, expected, actual, .. } => {
            assert_eq!(item, FOOD);
            assert_eq!(expected, 6000.0);
            assert!((actual - 6000.005).abs() < 1e-9);
        }
        other => panic!("expected integrity error, got {other}"),
    }
}

#[test]
fn unknown_item_has_no_locator() {
    let (w, cpi) = (common::weights(), common::cpi(&months()));
    let nav = Navigator::new(&w, &cpi, Area::National);
    assert_eq!(nav.child_locator(ROOT).unwrap(), TOP_LEVEL_PARENT);
    assert_eq!(nav.child_locator(FOOD).unwrap(), "0002");
    assert!(matches!(nav.child_locator("9999 謎"), Err(Error::UnknownItem(_))));
}
