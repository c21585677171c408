//! Error types for edgetree

use thiserror::Error;

/// Result type alias for edgetree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or rendering a tree
///
/// The first five variants form the structural taxonomy `E1`..`E5`. When
/// several apply to the same input, the lowest code is the one reported.
#[derive(Error, Debug)]
pub enum Error {
    /// E1: malformed token or out-of-range symbol
    #[error("Malformed input: {reason}")]
    Format { reason: String },

    /// E2: the same child was added twice to the same parent
    #[error("Duplicate edge: ({parent},{child})")]
    DuplicateEdge { parent: char, child: char },

    /// E3: a node received a third distinct child
    #[error("A node has more than two children")]
    OverCapacity,

    /// E4: more than one node has no parent
    #[error("Multiple roots")]
    MultipleRoots,

    /// E5: no root, a cycle, or a component unreachable from the root
    #[error("No root or cycle detected")]
    NoRootOrCycle,

    /// A node id that does not belong to the table it was used with
    #[error("Invalid node id: {0}")]
    InvalidNode(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Error::Format {
            reason: reason.into(),
        }
    }

    /// Numeric code of a structural error (`1..=5`), `None` otherwise
    pub fn code(&self) -> Option<u8> {
        match self {
            Error::Format { .. } => Some(1),
            Error::DuplicateEdge { .. } => Some(2),
            Error::OverCapacity => Some(3),
            Error::MultipleRoots => Some(4),
            Error::NoRootOrCycle => Some(5),
            Error::InvalidNode(_) | Error::Io(_) | Error::Json(_) | Error::Config(_) => None,
        }
    }

    /// Short identifier such as `E2`, `None` for non-structural errors
    pub fn label(&self) -> Option<String> {
        self.code().map(|code| format!("E{}", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_precedence() {
        let errors = [
            Error::format("bad"),
            Error::DuplicateEdge {
                parent: 'A',
                child: 'B',
            },
            Error::OverCapacity,
            Error::MultipleRoots,
            Error::NoRootOrCycle,
        ];
        let codes: Vec<u8> = errors.iter().filter_map(Error::code).collect();
        assert_eq!(codes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_non_structural_errors_have_no_label() {
        let err = Error::Config("missing".into());
        assert_eq!(err.code(), None);
        assert_eq!(err.label(), None);
        assert_eq!(Error::InvalidNode(40).label(), None);
        assert_eq!(Error::MultipleRoots.label().as_deref(), Some("E4"));
    }
}
