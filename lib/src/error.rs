//! All kinds of errors in this crate.

use crate::cells::Coord;
use displaydoc::Display;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// World size and data size do not match: expected {0} cells, got {1}.
    SizeMismatch(usize, usize),
    /// Unable to set cell at {0:?}.
    SetCellError(Coord),
    /// Width / height should be positive.
    NonPositiveError,
}
