//! Sequential access over ordered collections.
//!
//! An [Aggregate] owns an ordered sequence and hands out [Cursor]s, each of
//! which walks a snapshot of the sequence with its own private position.
//! Two backings are provided: [Playlist], which keeps everything in one
//! shared vector, and [ChunkedPlaylist], which keeps fixed-size chunks.
//!
//! ```
//! use rsplaylist::{Aggregate, Cursor, Playlist};
//!
//! let mut playlist = Playlist::new();
//! playlist.append("A");
//! playlist.append("B");
//!
//! let mut cursor = playlist.create_iterator();
//! while cursor.has_next() {
//!     println!("{}", cursor.next().unwrap());
//! }
//! assert!(cursor.next().is_err());
//! ```
use std::{ops::Index, sync::Arc};

mod chunked;
mod cursor;
mod error;
mod iter;
#[cfg(feature = "serde")]
mod serialize;

pub use crate::chunked::{ChunkedPlaylist, ChunkedPlaylistIter};
pub use crate::cursor::{Aggregate, Cursor, Items};
pub use crate::error::ExhaustedIteratorError;
pub use crate::iter::PlaylistIter;

/// An array-backed [Aggregate].
///
/// The items live in a single reference counted vector. Creating a cursor
/// only bumps the reference count; appending copies the vector if, and only
/// if, some cursor is still looking at it. A cursor therefore always sees
/// the playlist exactly as it was when the cursor was created.
pub struct Playlist<T> {
    /// The shared item storage. Cursors hold clones of this [Arc].
    items: Arc<Vec<T>>,
}

impl<T> Default for Playlist<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Playlist<T> {
    /// Creates a new empty [Playlist]. This will create a [Playlist] with a
    /// capacity of zero using the [Playlist::with_capacity] method.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::<&str>::new();
    /// assert_eq!(playlist.len(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Creates a new [Playlist] with room for `capacity` items before
    /// it reallocates.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::<usize>::with_capacity(20);
    /// assert!(playlist.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Arc::new(Vec::with_capacity(capacity)),
        }
    }
    /// Returns the amount of items within the [Playlist].
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::from(["hello", "world"]);
    /// assert_eq!(playlist.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        self.items.len()
    }
    /// Returns true if the [Playlist] is empty,
    /// else it will return false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Gets the item at `index`, if there is one.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::from(["hello", "world"]);
    /// assert_eq!(playlist.get(1), Some(&"world"));
    /// assert_eq!(playlist.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
    /// Views the items as a slice, in insertion order.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
    /// Returns a borrowing iterator over the items of the [Playlist].
    ///
    /// Unlike [Playlist::create_iterator] this ties the iteration to a
    /// borrow of the playlist, so nothing can be appended until it is dropped.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::from([1, 2, 3]);
    /// assert_eq!(playlist.iter().sum::<i32>(), 6);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.items.iter(),
        }
    }
    /// Removes every item from the [Playlist]. Cursors created earlier keep
    /// their snapshot.
    ///
    /// ```
    /// use rsplaylist::{Cursor, Playlist};
    ///
    /// let mut playlist = Playlist::from(["a"]);
    /// let cursor = playlist.create_iterator();
    ///
    /// playlist.clear();
    /// assert!(playlist.is_empty());
    /// assert!(cursor.has_next());
    /// ```
    pub fn clear(&mut self) {
        match Arc::get_mut(&mut self.items) {
            Some(items) => items.clear(),
            None => self.items = Arc::new(Vec::new()),
        }
    }
    /// Creates a [PlaylistIter] over the items as they are right now.
    ///
    /// ```
    /// use rsplaylist::{Cursor, Playlist};
    ///
    /// let mut playlist = Playlist::from(["A", "B"]);
    /// let mut cursor = playlist.create_iterator();
    ///
    /// // Not seen by the cursor.
    /// playlist.append("C");
    ///
    /// assert_eq!(cursor.next(), Ok("A"));
    /// assert_eq!(cursor.next(), Ok("B"));
    /// assert!(!cursor.has_next());
    /// ```
    pub fn create_iterator(&self) -> PlaylistIter<T> {
        PlaylistIter::new(Arc::clone(&self.items))
    }
}

impl<T: Clone> Playlist<T> {
    /// Appends an item to the end of the [Playlist].
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let mut playlist = Playlist::new();
    /// playlist.append("hello");
    ///
    /// assert_eq!(playlist.get(0), Some(&"hello"));
    /// ```
    pub fn append(&mut self, item: T) {
        Arc::make_mut(&mut self.items).push(item);
    }
}

impl<T: Clone> Aggregate for Playlist<T> {
    type Item = T;
    type Cursor = PlaylistIter<T>;

    fn append(&mut self, item: T) {
        Playlist::append(self, item);
    }

    fn create_iterator(&self) -> PlaylistIter<T> {
        Playlist::create_iterator(self)
    }
}

impl<T> Clone for Playlist<T> {
    /// Clones the [Playlist]. Storage is shared until either side appends.
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Playlist<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Playlist<T> {
    /// Two playlists are equal if they hold equal items in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

impl<T: Eq> Eq for Playlist<T> {}

impl<T> Index<usize> for Playlist<T> {
    type Output = T;

    /// Indexes into the [Playlist].
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::from(["apple"]);
    /// assert_eq!(playlist[0], "apple");
    /// ```
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

/// A borrowing iterator over the items of a [Playlist].
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// An iterator created by consuming the [Playlist].
///
/// Contains all the items of the [Playlist].
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    /// Iterates over the owned items of a [Playlist].
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::from([1, 2]);
    /// let mut values = playlist.into_iter();
    ///
    /// assert_eq!(values.next(), Some(1));
    /// assert_eq!(values.next(), Some(2));
    /// assert_eq!(values.next(), None);
    /// ```
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<'a, T> IntoIterator for &'a Playlist<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for Playlist<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the [Playlist]. The items are only cloned if a cursor
    /// still shares the storage.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: Arc::unwrap_or_clone(self.items).into_iter(),
        }
    }
}

impl<T: Clone> Extend<T> for Playlist<T> {
    /// Extends a [Playlist] from an iterator, appending in iteration order.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let mut playlist = Playlist::from(["a"]);
    /// playlist.extend(["b", "c"]);
    ///
    /// assert_eq!(playlist.as_slice(), ["a", "b", "c"]);
    /// ```
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        Arc::make_mut(&mut self.items).extend(iter);
    }
}

impl<T> FromIterator<T> for Playlist<T> {
    /// Creates a [Playlist] from an iterator.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist: Playlist<char> = "abc".chars().collect();
    /// assert_eq!(playlist.len(), 3);
    /// ```
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> From<Vec<T>> for Playlist<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Playlist<T> {
    /// Creates a [Playlist] from an array.
    ///
    /// ```
    /// use rsplaylist::Playlist;
    ///
    /// let playlist = Playlist::from(["hello", "world"]);
    /// assert_eq!(playlist.len(), 2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        Self::from(Vec::from(arr))
    }
}

#[cfg(feature = "arbitrary")]
impl<'a, T> arbitrary::Arbitrary<'a> for Playlist<T>
where
    T: arbitrary::Arbitrary<'a>,
{
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::from(Vec::<T>::arbitrary(u)?))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Playlist;
    use crate::{Aggregate, Cursor, ExhaustedIteratorError};

    #[test]
    pub fn playlist_trace() {
        let mut playlist = Playlist::new();
        playlist.append("A");
        playlist.append("B");
        playlist.append("C");

        let mut cursor = playlist.create_iterator();
        for (position, expected) in ["A", "B", "C"].into_iter().enumerate() {
            assert_eq!(cursor.position(), position);
            assert!(cursor.has_next());
            assert_eq!(cursor.next(), Ok(expected));
        }
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(ExhaustedIteratorError::at(3)));
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    pub fn empty_playlist_cursor() {
        let playlist = Playlist::<String>::new();
        let mut cursor = playlist.create_iterator();
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(ExhaustedIteratorError::at(0)));
    }

    #[test]
    pub fn cursors_are_independent() {
        let playlist = Playlist::from(["x", "y", "z"]);
        let mut first = playlist.create_iterator();
        let mut second = playlist.create_iterator();

        assert_eq!(first.next(), Ok("x"));
        assert_eq!(first.next(), Ok("y"));

        assert_eq!(second.next(), Ok("x"));
        assert_eq!(first.next(), Ok("z"));
        assert!(!first.has_next());

        assert_eq!(second.items().collect::<Vec<_>>(), ["y", "z"]);
    }

    #[test]
    pub fn append_does_not_reach_cursor() {
        let mut playlist = Playlist::from([1, 2]);
        let cursor = playlist.create_iterator();
        playlist.append(3);

        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.items().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(playlist.create_iterator().items().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    pub fn append_copies_only_when_shared() {
        let mut playlist = Playlist::from([1]);
        let before = Arc::as_ptr(&playlist.items);
        playlist.append(2);
        assert_eq!(before, Arc::as_ptr(&playlist.items));

        let cursor = playlist.create_iterator();
        assert_eq!(Arc::strong_count(&playlist.items), 2);
        playlist.append(3);
        assert_eq!(Arc::strong_count(&playlist.items), 1);
        drop(cursor);
    }

    #[test]
    pub fn clear_keeps_snapshot() {
        let mut playlist = Playlist::from(["a", "b"]);
        let cursor = playlist.create_iterator();
        playlist.clear();
        playlist.append("c");

        assert_eq!(cursor.items().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(playlist.as_slice(), ["c"]);
    }

    #[test]
    pub fn cursors_across_threads() {
        let playlist = Playlist::from_iter((0..100).map(|i| i.to_string()));
        let handles = (0..4)
            .map(|_| {
                let cursor = playlist.create_iterator();
                std::thread::spawn(move || cursor.items().collect::<Vec<_>>())
            })
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), playlist.as_slice());
        }
    }

    #[test]
    pub fn playlist_equality() {
        let a = Playlist::from([1, 2, 3]);
        let mut b = Playlist::from([1, 2]);
        assert_ne!(a, b);
        b.append(3);
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "[1, 2, 3]");
    }

    #[test]
    pub fn owned_iteration_with_live_cursor() {
        let playlist = Playlist::from([String::from("a"), String::from("b")]);
        let cursor = playlist.create_iterator();

        assert_eq!(playlist.into_iter().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(cursor.items().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    pub fn test_arbitrary_traversal() {
        arbtest::arbtest(|u| {
            let items: Vec<u16> = u.arbitrary()?;

            let mut playlist = Playlist::new();
            for item in &items {
                playlist.append(*item);
            }

            let mut cursor = playlist.create_iterator();
            let mut seen = vec![];
            while cursor.has_next() {
                seen.push(cursor.next().unwrap());
            }

            assert_eq!(seen, items);
            assert_eq!(cursor.next(), Err(ExhaustedIteratorError::at(items.len())));
            assert!(!cursor.has_next());

            Ok(())
        });
    }

    #[test]
    pub fn test_arbitrary_snapshot() {
        arbtest::arbtest(|u| {
            let head: Vec<u8> = u.arbitrary()?;
            let tail: Vec<u8> = u.arbitrary()?;

            let mut playlist = Playlist::from(head.clone());
            let cursor = playlist.create_iterator();
            for item in &tail {
                Aggregate::append(&mut playlist, *item);
            }

            assert_eq!(cursor.items().collect::<Vec<_>>(), head);
            assert_eq!(playlist.len(), head.len() + tail.len());

            Ok(())
        });
    }
}
