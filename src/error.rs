// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

/// Fatal header problems. Any of these aborts the current table build before
/// a single row is inserted; malformed *data* rows are not errors (the parser
/// skips them and keeps going).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid separator line {0:?}: expected exactly one character")]
    BadSeparator(String),
    #[error("invalid field count {0:?}: expected a positive integer")]
    BadFieldCount(String),
    #[error("input ended while still waiting for {expected}")]
    TruncatedHeader { expected: &'static str },
    #[error("line {0:?} fed to a finished parser")]
    UnexpectedLine(String),
}

/// Unknown hash-strategy selector on the command line.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown hash strategy {0:?} (expected poly31, djb2, xxh64 or 1, 2, 3)")]
pub struct StrategyError(pub String);

/// Everything that can go wrong while loading or saving a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
