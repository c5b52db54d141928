use std::thread;

use rsplaylist::{Cursor, Playlist};

pub fn main() {
    let mut playlist = (1..=5).map(|i| format!("track {i}")).collect::<Playlist<_>>();

    // Each worker gets its own cursor over the same snapshot.
    let workers = (0..3)
        .map(|id| {
            let cursor = playlist.create_iterator();
            thread::spawn(move || {
                let count = cursor.items().count();
                println!("worker {id} saw {count} tracks");
                count
            })
        })
        .collect::<Vec<_>>();

    // Never observed by the workers.
    playlist.append("bonus track".to_string());

    for worker in workers {
        assert_eq!(worker.join().unwrap(), 5);
    }
    println!("playlist now holds {} tracks", playlist.len());
}
