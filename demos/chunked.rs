use rsplaylist::{Aggregate, ChunkedPlaylist, Cursor, Playlist};

/// Prints any aggregate through the cursor protocol. Knows nothing
/// about how the items are stored.
fn show<A>(name: &str, playlist: &A)
where
    A: Aggregate,
    A::Item: std::fmt::Debug,
{
    println!("{name}:");
    let mut cursor = playlist.create_iterator();
    while cursor.has_next() {
        println!("- {:?}", cursor.next().unwrap());
    }
}

pub fn main() {
    let words = "the quick brown fox jumps over the lazy dog".split_whitespace();

    let mut chunked = ChunkedPlaylist::with_chunk_size(4);
    let mut flat = Playlist::new();
    for word in words {
        chunked.append(word);
        flat.append(word);
    }

    println!("{} words in {} chunks", chunked.len(), chunked.chunk_count());
    show("chunked", &chunked);
    show("flat", &flat);
}
