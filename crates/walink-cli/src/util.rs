use chrono::Utc;
use std::path::Path;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}
