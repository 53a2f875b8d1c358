use std::path::Path;
use tracing::{debug, warn};
use walink_core::domain::{PhoneNote, PhoneRule};
use walink_core::rules::{RowObserver, RowOutcome};

/// Logs per-row normalization outcomes for one input file.
pub struct TracingObserver<'a> {
    path: &'a Path,
}

impl<'a> TracingObserver<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }
}

impl RowObserver for TracingObserver<'_> {
    fn on_row(&mut self, outcome: &RowOutcome<'_>) {
        let file = self.path.display();
        let raw = outcome.raw.unwrap_or_default();
        let phone = outcome.phone;

        if phone.rule == Some(PhoneRule::LastTen) {
            warn!(%file, row = outcome.index, raw, "long number, keeping last 10 digits");
        }
        if let Some(PhoneNote::UnexpectedLength(len)) = phone.note {
            warn!(
                %file,
                row = outcome.index,
                raw,
                digits = %phone.digits,
                len,
                "unexpected normalized length"
            );
        }
        debug!(
            %file,
            row = outcome.index,
            raw,
            digits = %phone.digits,
            link = outcome.link,
            note = %phone.note_text(),
            "row processed"
        );
    }
}
