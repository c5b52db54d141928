#![no_main]

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use rsplaylist::{Aggregate, ChunkedPlaylist, Cursor, Playlist};

#[derive(Arbitrary, Debug)]
pub enum Ops {
    Append(u8),
    CreateCursor,
    Advance(u8),
    Clear,
}

/// A cursor under test, paired with the items it must still produce.
struct Tracked<C> {
    cursor: C,
    expected: Vec<u8>,
    position: usize,
}

impl<C: Cursor<Item = u8>> Tracked<C> {
    fn advance(&mut self) {
        match self.expected.get(self.position) {
            Some(item) => {
                assert!(self.cursor.has_next());
                assert_eq!(self.cursor.next(), Ok(*item));
                self.position += 1;
            }
            None => {
                assert!(!self.cursor.has_next());
                let error = self.cursor.next().unwrap_err();
                assert_eq!(error.position(), self.expected.len());
            }
        }
    }
}

fn run<A: Aggregate<Item = u8> + Default>(mut aggregate: A, data: &[Ops]) {
    let mut twin = Vec::<u8>::new();
    let mut cursors = Vec::<Tracked<A::Cursor>>::new();

    for datum in data {
        match datum {
            Ops::Append(item) => {
                aggregate.append(*item);
                twin.push(*item);
            }
            Ops::CreateCursor => cursors.push(Tracked {
                cursor: aggregate.create_iterator(),
                expected: twin.clone(),
                position: 0,
            }),
            Ops::Advance(which) => {
                if !cursors.is_empty() {
                    let index = *which as usize % cursors.len();
                    cursors[index].advance();
                }
            }
            Ops::Clear => {
                aggregate = A::default();
                twin.clear();
            }
        }
    }

    for mut tracked in cursors {
        while tracked.position < tracked.expected.len() {
            tracked.advance();
        }
        tracked.advance();
    }
}

fuzz_target!(|data: Vec<Ops>| {
    run(Playlist::<u8>::new(), &data);
    run(ChunkedPlaylist::<u8>::with_chunk_size(3), &data);
});
