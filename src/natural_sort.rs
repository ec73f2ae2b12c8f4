use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

/// splits a string into alternating runs of ascii digits and everything else
struct ChunkIterator<'a> {
    remaining: &'a str,
}

impl<'a> ChunkIterator<'a> {
    fn new(value: &'a str) -> Self {
        Self { remaining: value }
    }
}

impl<'a> Iterator for ChunkIterator<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.remaining.chars().next()?;
        let is_digit_run = first.is_ascii_digit();
        let end = self
            .remaining
            .find(|c: char| c.is_ascii_digit() != is_digit_run)
            .unwrap_or(self.remaining.len());
        let (chunk, rest) = self.remaining.split_at(end);
        self.remaining = rest;
        if is_digit_run {
            Some(Chunk::Digits(chunk))
        } else {
            Some(Chunk::Text(chunk))
        }
    }
}

/// Compares two digit runs by magnitude without parsing them, so runs longer
/// than any integer type still order correctly.
fn compare_magnitude(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

fn compare_chunks(left: Chunk, right: Chunk) -> Ordering {
    match (left, right) {
        (Chunk::Digits(left), Chunk::Digits(right)) => compare_magnitude(left, right),
        (Chunk::Text(left), Chunk::Text(right)) => left.cmp(right),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
    }
}

/// Orders strings the way a human reads them: `frame_9` before `frame_10`.
///
/// Digit runs compare numerically and text runs compare as plain text. When
/// every run ties, the string with fewer runs comes first. A final plain
/// comparison keeps the order total, e.g. `frame_01` against `frame_1`.
pub fn compare_natural(left: &str, right: &str) -> Ordering {
    let mut left_chunks = ChunkIterator::new(left);
    let mut right_chunks = ChunkIterator::new(right);
    loop {
        match (left_chunks.next(), right_chunks.next()) {
            (Some(left_chunk), Some(right_chunk)) => {
                let ordering = compare_chunks(left_chunk, right_chunk);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return left.cmp(right),
        }
    }
}
