use thiserror::Error;

/// Errors surfaced by core operations.
///
/// Numeric edge cases (zero weight, negative grams, unparseable input) are
/// never errors; they degrade to degenerate numeric results instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user input on a mutating operation; no state was changed.
    #[error("{0}")]
    Validation(String),

    /// Malformed CSV on import; the whole import is rejected.
    #[error("invalid CSV: {0}")]
    Import(String),

    /// A snapshot store read or write failed.
    #[error("storage: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
