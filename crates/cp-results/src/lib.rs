//! cp-results: trajectory CSV export and run summaries.

pub mod csv;
pub mod types;

pub use csv::{double_pole_csv, single_pole_csv, write_csv};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot summarise an empty record")]
    EmptyRecord,
}
