use std::ops::{Bound, RangeBounds};

use thiserror::Error;

/// A violated index or range precondition.
///
/// The panicking operations report these same messages.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SegtreeError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SegtreeError>;

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(SegtreeError::IndexOutOfBounds { index, len })
    }
}

/// Resolves `range` against `len` into a half-open `(start, end)`.
pub(crate) fn normalize_range<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(len),
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end && end <= len => Ok((start, end)),
        (start, end) => Err(SegtreeError::InvalidRange {
            start: start.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            len,
        }),
    }
}

/// Unwraps a precondition check, panicking at the caller's location.
#[track_caller]
pub(crate) fn expect_valid<T>(checked: Result<T>) -> T {
    match checked {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
