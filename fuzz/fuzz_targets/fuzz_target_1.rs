#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use rsplaylist::{ChunkedPlaylist, Cursor, Playlist};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);

    let Ok(chunked) = ChunkedPlaylist::<u64>::arbitrary(&mut unstructured) else {
        return;
    };
    let flat = chunked.iter().copied().collect::<Playlist<_>>();

    let from_chunked = chunked.create_iterator().items().collect::<Vec<_>>();
    let from_flat = flat.create_iterator().items().collect::<Vec<_>>();
    assert_eq!(from_chunked, from_flat);
    assert_eq!(from_chunked.len(), chunked.len());
});
