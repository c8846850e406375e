use thiserror::Error;

/// Domain errors surfaced by the core crate.
///
/// Missing references on read paths (a history or summary row pointing at a
/// worker that no longer resolves) are deliberately NOT errors: they render
/// through the unknown-worker sentinel instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A norm with the same article already exists (exact, case-sensitive).
    #[error("norm article '{0}' already exists")]
    DuplicateArticle(String),

    /// Import data that does not match the exchange format: unparseable
    /// input, a top level that is not a JSON array, or a malformed record.
    /// At the top level this is reported before any write happens.
    #[error("malformed import data: {0}")]
    ImportFormat(String),

    /// A quantity failed explicit numeric validation.
    #[error("invalid quantity '{0}': expected a non-negative whole number")]
    InvalidQuantity(String),

    #[error("worker '{0}' not found")]
    WorkerNotFound(String),

    #[error("production entry '{0}' not found")]
    EntryNotFound(String),

    #[error("norm '{0}' not found")]
    NormNotFound(String),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
