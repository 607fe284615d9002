use quadmap::{Entry, ProbingMap};

/// Words keyed by their first letter: a deliberately poor hash, so that
/// several words share a probe chain and removals leave tombstones on it.
fn first_letter(word: &&str) -> u64 {
    word.bytes().next().map_or(0, u64::from)
}

fn same_word(a: &&str, b: &&str) -> bool {
    a == b
}

fn main() {
    let text = String::from("apple avocado banana blueberry cherry cranberry apricot date");
    let words: Vec<&str> = text.split_whitespace().collect();

    // The map borrows the words; it never copies or frees them.
    let mut lengths = ProbingMap::new(first_letter, same_word, 4);
    for word in words.iter() {
        lengths.put_entry(Entry::new(*word, word.len()));
    }

    println!(
        "{} words in {} slots ({} used)",
        lengths.count(),
        lengths.size(),
        lengths.used()
    );

    // Remove every word longer than six letters while walking the map.
    let mut cursor = lengths.cursor();
    while let Some((&word, &len)) = cursor.next_entry(&lengths) {
        if len > 6 {
            lengths.remove(&word);
            println!("removed {word:<10} ({len} letters)");
        }
    }

    println!(
        "{} words left, {} tombstones: {:?}",
        lengths.count(),
        lengths.tombstones(),
        lengths
    );

    lengths.grow_capacity();
    println!(
        "after growing: {} slots, {} tombstones",
        lengths.size(),
        lengths.tombstones()
    );
}
