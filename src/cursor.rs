use std::iter::FusedIterator;

use crate::ExhaustedIteratorError;

/// An ordered collection that can hand out independent cursors over
/// its contents.
///
/// The trait is the only thing a caller needs in order to populate an
/// aggregate and walk it. How the items are stored is left to the
/// implementor, see [Playlist](crate::Playlist) for an array-backed
/// aggregate and [ChunkedPlaylist](crate::ChunkedPlaylist) for a chunked one.
///
/// ```
/// use rsplaylist::{Aggregate, ChunkedPlaylist, Cursor, Playlist};
///
/// fn drain<A: Aggregate<Item = u32>>(mut aggregate: A) -> Vec<u32> {
///     aggregate.append(1);
///     aggregate.append(2);
///
///     let mut cursor = aggregate.create_iterator();
///     let mut out = vec![];
///     while cursor.has_next() {
///         out.push(cursor.next().unwrap());
///     }
///     out
/// }
///
/// assert_eq!(drain(Playlist::new()), [1, 2]);
/// assert_eq!(drain(ChunkedPlaylist::new()), [1, 2]);
/// ```
pub trait Aggregate {
    /// The item type held by the aggregate.
    type Item;
    /// The cursor type produced by [Aggregate::create_iterator].
    type Cursor: Cursor<Item = Self::Item>;

    /// Appends an item to the end of the aggregate.
    fn append(&mut self, item: Self::Item);

    /// Creates a fresh cursor positioned before the first item.
    ///
    /// The cursor observes the contents as they are at the moment of
    /// the call. Items appended afterwards are never seen by it.
    fn create_iterator(&self) -> Self::Cursor;
}

/// The traversal state over a snapshot of an [Aggregate].
///
/// A cursor starts out before the first item and moves forward by exactly
/// one position on every successful [Cursor::next]. Once it reaches the end
/// it is exhausted for good.
pub trait Cursor {
    /// The item type produced by the cursor.
    type Item;

    /// Checks whether another call to [Cursor::next] would succeed.
    fn has_next(&self) -> bool;

    /// Returns the item under the cursor and advances past it.
    ///
    /// # Errors
    /// Fails with [ExhaustedIteratorError] if the cursor is exhausted. The
    /// cursor does not move in that case.
    fn next(&mut self) -> Result<Self::Item, ExhaustedIteratorError>;

    /// A bound on the number of items left, with the same meaning as
    /// [Iterator::size_hint].
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::from(self.has_next()), None)
    }

    /// Turns the cursor into a standard library [Iterator].
    ///
    /// ```
    /// use rsplaylist::{Cursor, Playlist};
    ///
    /// let playlist = Playlist::from(["a", "b", "c"]);
    /// let joined = playlist.create_iterator().items().collect::<String>();
    ///
    /// assert_eq!(joined, "abc");
    /// ```
    fn items(self) -> Items<Self>
    where
        Self: Sized,
    {
        Items { cursor: self }
    }
}

/// Adapts a [Cursor] to the [Iterator] trait. Created by [Cursor::items].
#[derive(Debug, Clone)]
pub struct Items<C> {
    cursor: C,
}

impl<C> Items<C> {
    /// Returns the underlying cursor.
    pub fn into_inner(self) -> C {
        self.cursor
    }
}

impl<C: Cursor> Iterator for Items<C> {
    type Item = C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

// Exhaustion is terminal for every cursor.
impl<C: Cursor> FusedIterator for Items<C> {}
