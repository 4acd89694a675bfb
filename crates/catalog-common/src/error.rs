/// Error types shared across the catalog server crates.
///
/// Snapshot loading failures are common to every server; application-specific
/// errors are defined in each server crate and wrap `CommonError` via
/// `#[from]`. Cache failures never surface as errors at all, the Redis layer
/// degrades to no-ops instead.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("snapshot parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}
