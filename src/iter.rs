use std::sync::Arc;

use crate::{Cursor, ExhaustedIteratorError};

/// A cursor over a snapshot of a [Playlist](crate::Playlist).
///
/// The snapshot is shared with the playlist (and with any other cursor
/// created before the next append), so creating one is constant time.
#[derive(Debug)]
pub struct PlaylistIter<T> {
    values: Arc<Vec<T>>,
    position: usize,
}

impl<T> PlaylistIter<T> {
    pub(crate) fn new(values: Arc<Vec<T>>) -> Self {
        tracing::trace!(len = values.len(), "created playlist cursor");
        Self {
            values,
            position: 0,
        }
    }
    /// The index of the next item to be returned.
    pub fn position(&self) -> usize {
        self.position
    }
    /// The length of the snapshot this cursor walks.
    pub fn len(&self) -> usize {
        self.values.len()
    }
    /// Checks if the snapshot was empty to begin with.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    /// How many items are left before the cursor is exhausted.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.position
    }
}

impl<T> Clone for PlaylistIter<T> {
    /// Forks the traversal. The clone starts where `self` currently is and
    /// moves independently from then on.
    fn clone(&self) -> Self {
        Self {
            values: Arc::clone(&self.values),
            position: self.position,
        }
    }
}

impl<T: Clone> Cursor for PlaylistIter<T> {
    type Item = T;

    fn has_next(&self) -> bool {
        self.position < self.values.len()
    }

    /// Hands out a clone of the item under the cursor.
    ///
    /// ```
    /// use rsplaylist::{Aggregate, Cursor, Playlist};
    ///
    /// let playlist = Playlist::from(["A", "B"]);
    /// let mut cursor = playlist.create_iterator();
    ///
    /// assert_eq!(cursor.next(), Ok("A"));
    /// assert_eq!(cursor.next(), Ok("B"));
    /// assert!(cursor.next().is_err());
    /// ```
    fn next(&mut self) -> Result<T, ExhaustedIteratorError> {
        let Some(item) = self.values.get(self.position) else {
            tracing::debug!(position = self.position, "next() on exhausted playlist cursor");
            return Err(ExhaustedIteratorError::at(self.position));
        };
        self.position += 1;
        Ok(item.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
