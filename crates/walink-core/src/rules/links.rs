use crate::domain::link::whatsapp_link;
use crate::domain::phone::{normalize_phone, NormalizedPhone, PhoneNote};
use crate::domain::table::{set_cell, Table};
use crate::error::CoreError;
use serde::Serialize;

pub const PHONE_COLUMN: &str = "Phone 1 - Value";
pub const WEBSITE_COLUMN: &str = "Website 1 - Value";

#[derive(Debug, Clone, Copy)]
pub struct RowOutcome<'a> {
    pub index: usize,
    pub raw: Option<&'a str>,
    pub phone: &'a NormalizedPhone,
    pub link: &'a str,
}

/// Receives one outcome per processed row.
pub trait RowObserver {
    fn on_row(&mut self, outcome: &RowOutcome<'_>);
}

pub struct NoopObserver;

impl RowObserver for NoopObserver {
    fn on_row(&mut self, _outcome: &RowOutcome<'_>) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub rows: usize,
    pub linked: usize,
    pub empty: usize,
    pub unexpected_length: usize,
}

impl TableSummary {
    fn record(&mut self, phone: &NormalizedPhone, link: &str) {
        self.rows += 1;
        if link.is_empty() {
            self.empty += 1;
        } else {
            self.linked += 1;
        }
        if matches!(phone.note, Some(PhoneNote::UnexpectedLength(_))) {
            self.unexpected_length += 1;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedTable {
    pub table: Table,
    pub summary: TableSummary,
}

/// Replaces the website column of every row with a link derived from the
/// row's phone value.
///
/// Both columns must exist; otherwise nothing is touched and the first
/// missing column is reported. Row issues never fail the table: they end up
/// as an empty link and a note passed to `observer`.
pub fn process_table(
    mut table: Table,
    observer: &mut dyn RowObserver,
) -> Result<ProcessedTable, CoreError> {
    let phone_index = table
        .column_index(PHONE_COLUMN)
        .ok_or_else(|| CoreError::MissingColumn(PHONE_COLUMN.to_string()))?;
    let website_index = table
        .column_index(WEBSITE_COLUMN)
        .ok_or_else(|| CoreError::MissingColumn(WEBSITE_COLUMN.to_string()))?;

    let mut summary = TableSummary::default();
    for (index, row) in table.rows.iter_mut().enumerate() {
        let raw = row.get(phone_index).map(String::as_str);
        let phone = normalize_phone(raw);
        let link = whatsapp_link(&phone.digits);

        observer.on_row(&RowOutcome {
            index,
            raw,
            phone: &phone,
            link: &link,
        });
        summary.record(&phone, &link);
        set_cell(row, website_index, link);
    }

    Ok(ProcessedTable { table, summary })
}
