use thiserror::Error;

use crate::model::Status;

/// Failures of column bookkeeping. The board guards against all of them,
/// so none of these ever reach the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("row {index} is out of range for a column of {len} tasks")]
    OutOfRange { index: usize, len: usize },

    #[error("task with status {found:?} cannot be filed under {expected:?}")]
    StatusMismatch { expected: Status, found: Status },
}
