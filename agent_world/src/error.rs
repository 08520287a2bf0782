use thiserror::Error;

/// Errors raised while decoding simulation data at the crate boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("snapshot grid has {actual} cells, expected {expected}")]
    SnapshotShape { expected: usize, actual: usize },

    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("snapshot grid must be non-empty")]
    EmptySnapshot,

    #[error("unknown event code {0}")]
    UnknownEventCode(i32),
}
