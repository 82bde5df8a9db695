//! Loads the bundled sample of the salary dataset.

use equity_core::{Rank, Sex};
use equity_dataset::{load, load_path, LoadOptions};
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/salaries_sample.csv")
}

#[test]
fn loads_sample_with_row_name_column() {
    let dataset = load_path(fixture()).unwrap();
    assert_eq!(dataset.len(), 24);
    assert!(dataset.numeric_failures.is_empty());

    let tenth = &dataset.records[9];
    assert_eq!(tenth.sex, Sex::Female);
    assert_eq!(tenth.rank, Rank::Prof);
    assert_eq!(tenth.discipline, "B");
    assert_eq!(tenth.salary, Some(129_000));
}

#[test]
fn sample_category_counts() {
    let records = load(&LoadOptions::new(fixture())).unwrap().into_records();
    let female = records.iter().filter(|r| r.sex == Sex::Female).count();
    let discipline_a = records.iter().filter(|r| r.discipline == "A").count();
    let professors = records.iter().filter(|r| r.is_professor()).count();
    assert_eq!(female, 4);
    assert_eq!(discipline_a, 7);
    assert_eq!(professors, 14);
}
