use std::error;
use std::fmt;
use std::result;

/// Errors reported by the node allocator.
///
/// The tree algorithms themselves never fail; every error originates from allocating or releasing
/// a node slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The handle points outside of any allocated chunk.
    InvalidHandle,
    /// The handle points at a slot that was freed, or reused for a different object.
    StaleHandle,
    /// The arena already holds its configured maximum number of objects.
    CapacityExceeded(usize),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidHandle => write!(f, "handle does not refer to an allocated block"),
            Error::StaleHandle => write!(f, "handle refers to a vacant or reused block"),
            Error::CapacityExceeded(limit) => {
                write!(f, "arena is full: capacity limit of {} objects reached", limit)
            },
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
