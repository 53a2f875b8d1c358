use std::fs;
use tempfile::TempDir;
use walink_core::domain::Table;
use walink_core::rules::{process_table, NoopObserver};
use walink_store::error::StoreErrorKind;
use walink_store::{CsvDirectory, TableStore};

const EXPORT: &str = "Name,Phone 1 - Value,Website 1 - Value\n\
Ada,09876543211,\n\
Grace,+91 98765 43210 ::: 022 1234,https://example.com\n";

#[test]
fn read_write_cycle_preserves_text_cells() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    fs::write(&path, EXPORT).expect("write export");

    let store = CsvDirectory::new(temp.path(), "csv");
    let table = store.read_table(&path).expect("read");
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0][1], "09876543211");

    store.write_table(&path, &table).expect("write");
    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written, EXPORT);
}

#[test]
fn write_table_replaces_existing_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    fs::write(&path, EXPORT).expect("write export");

    let table = Table::new(
        vec!["Phone 1 - Value".to_string(), "Website 1 - Value".to_string()],
        vec![vec![
            "9876543210".to_string(),
            "https://wa.me/919876543210".to_string(),
        ]],
    );
    walink_store::write_table(&path, &table).expect("write");

    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(
        written,
        "Phone 1 - Value,Website 1 - Value\n9876543210,https://wa.me/919876543210\n"
    );
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name())
        .collect();
    assert_eq!(leftovers.len(), 1, "temp file left behind: {leftovers:?}");
}

#[test]
fn write_table_to_missing_directory_leaves_nothing() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("missing").join("contacts.csv");
    let err = walink_store::write_table(&path, &Table::default()).expect_err("write should fail");
    assert_eq!(err.kind(), StoreErrorKind::Write);
    assert!(!path.exists());
}

#[test]
fn read_table_reports_missing_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("absent.csv");
    let err = walink_store::read_table(&path).expect_err("read should fail");
    assert_eq!(err.kind(), StoreErrorKind::Read);
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn read_table_reports_rows_longer_than_header() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("broken.csv");
    fs::write(&path, "a,b\n1,2,3\n").expect("write");
    let err = walink_store::read_table(&path).expect_err("read should fail");
    assert_eq!(err.kind(), StoreErrorKind::Read);
}

#[test]
fn short_rows_are_processed_with_empty_links() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    fs::write(
        &path,
        "Name,Phone 1 - Value,Website 1 - Value\nAda,+91 98765 43210,\nGrace\n",
    )
    .expect("write export");

    let table = walink_store::read_table(&path).expect("read");
    assert_eq!(table.rows[1], vec!["Grace"]);

    let processed = process_table(table, &mut NoopObserver).expect("process");
    assert_eq!(processed.summary.empty, 1);
    walink_store::write_table(&path, &processed.table).expect("write");

    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "Name,Phone 1 - Value,Website 1 - Value\n\
Ada,+91 98765 43210,https://wa.me/919876543210\n\
Grace,,\n"
    );
}
