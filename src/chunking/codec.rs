//! Chunk Codec
//!
//! Byte-window splitting that respects UTF-8 character boundaries.

use std::num::NonZeroUsize;

/// Split `text` into chunks of at most `chunk_size` bytes
///
/// Windows are taken from the start of the text. When the byte right after
/// a window is a UTF-8 continuation byte (`0b10xx_xxxx`), the window is
/// pulled back until it ends on a character boundary, so every chunk is
/// valid text on its own. If the chunk size is narrower than the character
/// at the window start, the window instead grows to cover that single
/// character.
///
/// Empty input yields no chunks.
///
/// ```
/// use std::num::NonZeroUsize;
/// use chunkstore::chunking::split;
///
/// let chunks = split("Hello 世界", NonZeroUsize::new(4).unwrap());
/// assert_eq!(chunks, vec!["Hell", "o ", "世", "界"]);
/// ```
pub fn split(text: &str, chunk_size: NonZeroUsize) -> Vec<&str> {
    let bytes = text.as_bytes();
    let size = chunk_size.get();
    let mut chunks = Vec::with_capacity(bytes.len().div_ceil(size));

    let mut start = 0;
    while start < bytes.len() {
        let mut end = (start + size).min(bytes.len());
        while end > start && is_continuation(bytes, end) {
            end -= 1;
        }

        if end == start {
            end = start + 1;
            while is_continuation(bytes, end) {
                end += 1;
            }
        }

        chunks.push(&text[start..end]);
        start = end;
    }

    chunks
}

/// Concatenate chunks in order; inverse of [`split`]
pub fn join<I, S>(chunks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    chunks.into_iter().fold(String::new(), |mut out, chunk| {
        out.push_str(chunk.as_ref());
        out
    })
}

fn is_continuation(bytes: &[u8], at: usize) -> bool {
    bytes.get(at).is_some_and(|b| b & 0xC0 == 0x80)
}
