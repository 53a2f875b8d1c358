use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("column '{0}' not found")]
    MissingColumn(String),
}
