use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// A field is a nested record in one snapshot and a scalar in the other.
    #[error("SHAPE_MISMATCH: {path}")]
    ShapeMismatch { path: String },

    #[error("DEPTH_LIMIT_EXCEEDED: {path} (limit {limit})")]
    DepthLimitExceeded { path: String, limit: usize },

    /// A snapshot root that is neither an object nor null.
    #[error("NOT_A_RECORD: {path}")]
    NotARecord { path: String },

    #[error("Unknown operation mode: {0}")]
    UnknownMode(String),
}

/// Formats a key path as `/a/b`; the root renders as `/`.
pub(crate) fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for step in path {
        out.push('/');
        out.push_str(step);
    }
    out
}
