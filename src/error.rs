use thiserror::Error;

/// Returned by [Cursor::next](crate::Cursor::next) when the cursor has
/// already handed out every item of its snapshot.
///
/// This is a violation of the cursor protocol on the caller's side: a
/// well-behaved caller checks [Cursor::has_next](crate::Cursor::has_next)
/// first. The error records where the cursor was parked, which is always
/// the length of the snapshot it was created from.
///
/// ```
/// use rsplaylist::{Aggregate, Cursor, ExhaustedIteratorError, Playlist};
///
/// let playlist = Playlist::<&str>::new();
/// let mut cursor = playlist.create_iterator();
///
/// assert_eq!(cursor.next(), Err(ExhaustedIteratorError::at(0)));
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("iterator exhausted after {position} item(s)")]
pub struct ExhaustedIteratorError {
    position: usize,
}

impl ExhaustedIteratorError {
    /// Creates the error for a cursor parked at `position`.
    pub const fn at(position: usize) -> Self {
        Self { position }
    }
    /// The cursor position at which retrieval was attempted.
    pub const fn position(&self) -> usize {
        self.position
    }
}
