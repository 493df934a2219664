use thiserror::Error;

/// Schema or value problems found while turning a source file into records.
///
/// Rows are zero-based data rows (the header is not counted).
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' has unreadable value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: payload mass must be a non-negative number, got {value}")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: i64 },

    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },
}
