use std::{fmt::Debug, ops::Index, sync::Arc};

use crate::{Aggregate, Cursor, ExhaustedIteratorError};

/// The chunk size used by [ChunkedPlaylist::new].
pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// An [Aggregate] that stores its items in fixed-size chunks.
///
/// Every chunk but the last is sealed: it is full, immutable and shared by
/// reference count with any cursor that was created after it was sealed.
/// The last chunk (the tail) is copied on write like the storage of a
/// [Playlist](crate::Playlist), so a cursor never costs more than one chunk
/// worth of copying.
///
/// Callers written against [Aggregate] and [Cursor] cannot tell the two
/// backings apart.
///
/// ```
/// use rsplaylist::{ChunkedPlaylist, Cursor};
///
/// let mut playlist = ChunkedPlaylist::with_chunk_size(2);
/// for track in ["A", "B", "C"] {
///     playlist.append(track);
/// }
///
/// assert_eq!(playlist.chunk_count(), 2);
/// assert_eq!(playlist.create_iterator().items().collect::<Vec<_>>(), ["A", "B", "C"]);
/// ```
pub struct ChunkedPlaylist<T> {
    /// The full chunks, in order. Each holds exactly `chunk_size` items.
    sealed: Vec<Arc<[T]>>,
    /// The chunk currently being filled. Never holds `chunk_size` items or
    /// more between calls.
    tail: Arc<Vec<T>>,
    /// Number of items in every sealed chunk.
    chunk_size: usize,
    /// Total amount of items.
    len: usize,
}

impl<T> Default for ChunkedPlaylist<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChunkedPlaylist<T> {
    /// Creates a new [ChunkedPlaylist] with the [DEFAULT_CHUNK_SIZE].
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }
    /// Creates a new [ChunkedPlaylist] whose chunks hold `chunk_size`
    /// items. A chunk size of zero is treated as one.
    ///
    /// ```
    /// use rsplaylist::ChunkedPlaylist;
    ///
    /// let playlist = ChunkedPlaylist::<u8>::with_chunk_size(0);
    /// assert_eq!(playlist.chunk_size(), 1);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            sealed: Vec::new(),
            tail: Arc::new(Vec::with_capacity(chunk_size)),
            chunk_size,
            len: 0,
        }
    }
    /// Creates a new [ChunkedPlaylist] that can index `capacity` items
    /// without growing its chunk table.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut new = Self::new();
        new.sealed.reserve(capacity / new.chunk_size);
        new
    }
    /// The number of items a sealed chunk holds.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
    /// The number of chunks, counting the tail only if it holds items.
    pub fn chunk_count(&self) -> usize {
        self.sealed.len() + usize::from(!self.tail.is_empty())
    }
    /// Returns the amount of items within the [ChunkedPlaylist].
    pub fn len(&self) -> usize {
        self.len
    }
    /// Returns true if the [ChunkedPlaylist] is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// Gets the item at `index`, if there is one.
    ///
    /// ```
    /// use rsplaylist::ChunkedPlaylist;
    ///
    /// let playlist = ChunkedPlaylist::from(["a", "b", "c"]);
    /// assert_eq!(playlist.get(2), Some(&"c"));
    /// assert_eq!(playlist.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        let chunk = index / self.chunk_size;
        let offset = index % self.chunk_size;
        match self.sealed.get(chunk) {
            Some(sealed) => sealed.get(offset),
            None if chunk == self.sealed.len() => self.tail.get(offset),
            None => None,
        }
    }
    /// Returns a borrowing iterator over the items, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.sealed
            .iter()
            .flat_map(|chunk| chunk.iter())
            .chain(self.tail.iter())
    }
    /// Removes every item. Cursors created earlier keep their snapshot.
    pub fn clear(&mut self) {
        self.sealed.clear();
        self.tail = Arc::new(Vec::with_capacity(self.chunk_size));
        self.len = 0;
    }
    /// Creates a [ChunkedPlaylistIter] over the items as they are right now.
    pub fn create_iterator(&self) -> ChunkedPlaylistIter<T> {
        tracing::trace!(
            len = self.len,
            chunks = self.chunk_count(),
            "created chunked playlist cursor"
        );
        ChunkedPlaylistIter {
            sealed: self.sealed.clone(),
            tail: Arc::clone(&self.tail),
            chunk: 0,
            offset: 0,
            position: 0,
            len: self.len,
        }
    }
    /// Builds the chunk table out of an owned vector without cloning.
    fn from_vec_with_chunk_size(items: Vec<T>, chunk_size: usize) -> Self {
        let mut new = Self::with_chunk_size(chunk_size);
        new.len = items.len();

        let mut current = Vec::with_capacity(new.chunk_size);
        for item in items {
            current.push(item);
            if current.len() == new.chunk_size {
                let full = std::mem::replace(&mut current, Vec::with_capacity(new.chunk_size));
                new.sealed.push(Arc::from(full));
            }
        }
        new.tail = Arc::new(current);
        new
    }
}

impl<T: Clone> ChunkedPlaylist<T> {
    /// Appends an item to the end of the [ChunkedPlaylist], sealing the
    /// tail once it is full.
    pub fn append(&mut self, item: T) {
        let tail = Arc::make_mut(&mut self.tail);
        tail.push(item);
        self.len += 1;

        if tail.len() == self.chunk_size {
            let full = std::mem::replace(tail, Vec::with_capacity(self.chunk_size));
            self.sealed.push(Arc::from(full));
        }
    }
}

impl<T: Clone> Aggregate for ChunkedPlaylist<T> {
    type Item = T;
    type Cursor = ChunkedPlaylistIter<T>;

    fn append(&mut self, item: T) {
        ChunkedPlaylist::append(self, item);
    }

    fn create_iterator(&self) -> ChunkedPlaylistIter<T> {
        ChunkedPlaylist::create_iterator(self)
    }
}

impl<T> Clone for ChunkedPlaylist<T> {
    fn clone(&self) -> Self {
        Self {
            sealed: self.sealed.clone(),
            tail: Arc::clone(&self.tail),
            chunk_size: self.chunk_size,
            len: self.len,
        }
    }
}

impl<T: Debug> Debug for ChunkedPlaylist<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ChunkedPlaylist<T> {
    /// Compares items only; the chunk size does not matter.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ChunkedPlaylist<T> {}

impl<T> Index<usize> for ChunkedPlaylist<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Index out of bounds for chunked playlist.")
    }
}

impl<T: Clone> Extend<T> for ChunkedPlaylist<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.append(item);
        }
    }
}

impl<T> FromIterator<T> for ChunkedPlaylist<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T> From<Vec<T>> for ChunkedPlaylist<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec_with_chunk_size(items, DEFAULT_CHUNK_SIZE)
    }
}

impl<T, const N: usize> From<[T; N]> for ChunkedPlaylist<T> {
    fn from(arr: [T; N]) -> Self {
        Self::from(Vec::from(arr))
    }
}

#[cfg(feature = "arbitrary")]
impl<'a, T> arbitrary::Arbitrary<'a> for ChunkedPlaylist<T>
where
    T: arbitrary::Arbitrary<'a>,
{
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let chunk_size = u.int_in_range(1..=16)?;
        let items = Vec::<T>::arbitrary(u)?;
        Ok(Self::from_vec_with_chunk_size(items, chunk_size))
    }
}

/// A cursor over a snapshot of a [ChunkedPlaylist]. It walks the chunks in
/// order and only ever looks at one of them at a time.
#[derive(Debug)]
pub struct ChunkedPlaylistIter<T> {
    sealed: Vec<Arc<[T]>>,
    tail: Arc<Vec<T>>,
    /// The chunk the cursor is in. Equal to `sealed.len()` for the tail.
    chunk: usize,
    /// Offset of the next item within the current chunk.
    offset: usize,
    /// Index of the next item within the whole snapshot.
    position: usize,
    len: usize,
}

impl<T> ChunkedPlaylistIter<T> {
    /// The index of the next item to be returned.
    pub fn position(&self) -> usize {
        self.position
    }
    /// The length of the snapshot this cursor walks.
    pub fn len(&self) -> usize {
        self.len
    }
    /// Checks if the snapshot was empty to begin with.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    /// How many items are left before the cursor is exhausted.
    pub fn remaining(&self) -> usize {
        self.len - self.position
    }
    fn current_chunk(&self) -> &[T] {
        match self.sealed.get(self.chunk) {
            Some(chunk) => &chunk[..],
            None => &self.tail[..],
        }
    }
}

impl<T> Clone for ChunkedPlaylistIter<T> {
    fn clone(&self) -> Self {
        Self {
            sealed: self.sealed.clone(),
            tail: Arc::clone(&self.tail),
            chunk: self.chunk,
            offset: self.offset,
            position: self.position,
            len: self.len,
        }
    }
}

impl<T: Clone> Cursor for ChunkedPlaylistIter<T> {
    type Item = T;

    fn has_next(&self) -> bool {
        self.position < self.len
    }

    fn next(&mut self) -> Result<T, ExhaustedIteratorError> {
        if !self.has_next() {
            tracing::debug!(position = self.position, "next() on exhausted chunked cursor");
            return Err(ExhaustedIteratorError::at(self.position));
        }
        // Sealed chunks are never empty and the tail holds whatever is left,
        // so this stops before running past the tail.
        while self.offset >= self.current_chunk().len() {
            self.chunk += 1;
            self.offset = 0;
        }
        let item = self.current_chunk()[self.offset].clone();
        self.offset += 1;
        self.position += 1;
        Ok(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkedPlaylist;
    use crate::{Aggregate, Cursor, ExhaustedIteratorError, Playlist};

    #[test]
    pub fn chunked_trace() {
        let mut playlist = ChunkedPlaylist::with_chunk_size(2);
        playlist.append("A");
        playlist.append("B");
        playlist.append("C");

        let mut cursor = playlist.create_iterator();
        assert!(cursor.has_next());
        assert_eq!(cursor.next(), Ok("A"));
        assert_eq!(cursor.next(), Ok("B"));
        assert_eq!(cursor.next(), Ok("C"));
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(), Err(ExhaustedIteratorError::at(3)));
    }

    #[test]
    pub fn chunks_seal_when_full() {
        let mut playlist = ChunkedPlaylist::with_chunk_size(3);
        playlist.extend(0..6);
        assert_eq!(playlist.sealed.len(), 2);
        assert!(playlist.tail.is_empty());
        assert_eq!(playlist.chunk_count(), 2);

        playlist.append(6);
        assert_eq!(playlist.chunk_count(), 3);
        assert_eq!(playlist.len(), 7);
    }

    #[test]
    pub fn exact_multiple_of_chunk_size() {
        let playlist = ChunkedPlaylist::from_vec_with_chunk_size(vec![1, 2, 3, 4], 2);
        let mut cursor = playlist.create_iterator();
        assert_eq!(cursor.clone().items().collect::<Vec<_>>(), [1, 2, 3, 4]);

        for _ in 0..4 {
            cursor.next().unwrap();
        }
        assert_eq!(cursor.next(), Err(ExhaustedIteratorError::at(4)));
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    pub fn empty_chunked_cursor() {
        let playlist = ChunkedPlaylist::<u8>::new();
        let mut cursor = playlist.create_iterator();
        assert!(cursor.is_empty());
        assert!(!cursor.has_next());
        assert!(cursor.next().is_err());
    }

    #[test]
    pub fn append_does_not_reach_cursor() {
        let mut playlist = ChunkedPlaylist::with_chunk_size(2);
        playlist.extend(["a", "b", "c"]);
        let cursor = playlist.create_iterator();

        // Fills and seals the shared tail.
        playlist.extend(["d", "e"]);

        assert_eq!(cursor.items().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(playlist.len(), 5);
    }

    #[test]
    pub fn clear_keeps_snapshot() {
        let mut playlist = ChunkedPlaylist::from([1, 2, 3]);
        let cursor = playlist.create_iterator();
        playlist.clear();

        assert!(playlist.is_empty());
        assert_eq!(playlist.get(0), None);
        assert_eq!(cursor.remaining(), 3);
    }

    #[test]
    pub fn indexing_across_chunks() {
        let playlist = ChunkedPlaylist::from_vec_with_chunk_size((0..10).collect(), 4);
        for i in 0..10 {
            assert_eq!(playlist[i], i);
        }
        assert_eq!(playlist.get(10), None);
        assert_eq!(playlist.get(100), None);
    }

    #[test]
    pub fn equality_ignores_chunk_size() {
        let a = ChunkedPlaylist::from_vec_with_chunk_size(vec![1, 2, 3], 1);
        let b = ChunkedPlaylist::from_vec_with_chunk_size(vec![1, 2, 3], 5);
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "[1, 2, 3]");
    }

    /// Drives any aggregate through the cursor protocol.
    fn traverse<A: Aggregate>(aggregate: &A) -> Vec<A::Item> {
        let mut cursor = aggregate.create_iterator();
        let mut out = vec![];
        while cursor.has_next() {
            out.push(cursor.next().unwrap());
        }
        assert!(cursor.next().is_err());
        out
    }

    #[test]
    pub fn test_arbitrary_matches_playlist() {
        arbtest::arbtest(|u| {
            let chunk_size = u.int_in_range(1..=8)?;
            let items: Vec<u32> = u.arbitrary()?;

            let mut chunked = ChunkedPlaylist::with_chunk_size(chunk_size);
            let mut flat = Playlist::new();
            for item in &items {
                Aggregate::append(&mut chunked, *item);
                Aggregate::append(&mut flat, *item);
            }

            assert_eq!(traverse(&chunked), items);
            assert_eq!(traverse(&flat), items);
            assert_eq!(chunked.iter().copied().collect::<Vec<_>>(), items);

            Ok(())
        });
    }

    #[test]
    pub fn test_arbitrary_independent_cursors() {
        arbtest::arbtest(|u| {
            let chunk_size = u.int_in_range(1..=8)?;
            let items: Vec<u8> = u.arbitrary()?;
            let split = u.choose_index(items.len() + 1)?;

            let playlist = ChunkedPlaylist::from_vec_with_chunk_size(items.clone(), chunk_size);
            let mut first = playlist.create_iterator();
            let second = playlist.create_iterator();

            for _ in 0..split {
                first.next().unwrap();
            }

            assert_eq!(first.remaining(), items.len() - split);
            assert_eq!(second.items().collect::<Vec<_>>(), items);

            Ok(())
        });
    }
}
