use std::io::{self, Write};

use anyhow::Result;
use rsplaylist::{Aggregate, Cursor, Playlist};
use tracing_subscriber::EnvFilter;

const TRACKS: [&str; 3] = [
    "🤠 Wheeler Walker Jr. - Redneck Shit",
    "🤘 Morbid Angel - Lion's Den",
    "🎤 Open Mike Eagle - The Black Mirror Episode",
];

/// Writes the header and then every item of the aggregate, one per line,
/// using nothing but the cursor protocol.
fn play<A>(playlist: &A, out: &mut impl Write) -> Result<()>
where
    A: Aggregate,
    A::Item: std::fmt::Display,
{
    let mut cursor = playlist.create_iterator();
    writeln!(out, "My Playlist:")?;
    while cursor.has_next() {
        writeln!(out, "{}", cursor.next()?)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut playlist = Playlist::new();
    for track in TRACKS {
        playlist.append(track.to_string());
    }
    tracing::info!(tracks = playlist.len(), "playlist ready");

    play(&playlist, &mut io::stdout().lock())
}
