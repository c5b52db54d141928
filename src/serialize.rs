//! Both aggregates serialize as a plain sequence of their items, so a
//! [Playlist] and a [ChunkedPlaylist] holding the same items produce the
//! same output. Deserialized chunked playlists use the default chunk size.
use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
};

use crate::{ChunkedPlaylist, Playlist};

impl<T: Serialize> Serialize for Playlist<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<T: Serialize> Serialize for ChunkedPlaylist<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self.iter() {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

/// Reads a sequence into any collection that can be built from a [Vec].
struct SeqVisitor<C, T> {
    _marker: PhantomData<(C, T)>,
}

impl<'de, C, T> Visitor<'de> for SeqVisitor<C, T>
where
    C: From<Vec<T>>,
    T: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of playlist items")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(C::from(items))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Playlist<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor {
            _marker: PhantomData,
        })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ChunkedPlaylist<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor {
            _marker: PhantomData,
        })
    }
}
