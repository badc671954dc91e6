//! Boundary-safe UTF-8 chunk decoding.
//!
//! Transport chunk boundaries are arbitrary: a multi-byte character may be
//! split across two or more consecutive chunks. [`ChunkDecoder`] holds back
//! the incomplete trailing sequence of each chunk and prepends it to the
//! next, so callers only ever see whole characters. Invalid interior bytes
//! are replaced with U+FFFD, matching a non-fatal transcoder.

/// Incremental UTF-8 decoder for one stream.
///
/// Feed every chunk through [`decode`](Self::decode), then call
/// [`flush`](Self::flush) exactly once after the last chunk.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    /// Incomplete trailing sequence carried over from the previous chunk.
    /// At most 3 bytes: a 4-byte character missing at least one byte.
    pending: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, emitting only complete characters.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let split = complete_prefix_len(&bytes);
        self.pending = bytes.split_off(split);

        match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    /// Finalize the stream. A still-incomplete trailing sequence becomes a
    /// single replacement character.
    pub fn flush(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            '\u{FFFD}'.to_string()
        }
    }
}

/// Length of the prefix that can be decoded now. Anything past it is the
/// start of a character whose remaining bytes have not arrived yet.
fn complete_prefix_len(bytes: &[u8]) -> usize {
    let len = bytes.len();
    // An incomplete character occupies at most 3 trailing bytes.
    for i in (len.saturating_sub(3)..len).rev() {
        let byte = bytes[i];
        if byte < 0x80 {
            // ASCII tail: nothing can be pending.
            return len;
        }
        if byte >= 0xC0 {
            // Lead byte: pending only if its sequence runs past the buffer.
            let width = sequence_width(byte);
            if width == 0 || i + width <= len {
                return len;
            }
            return i;
        }
        // Continuation byte: keep walking back toward the lead.
    }
    // Three or more trailing continuation bytes with no lead in reach:
    // invalid regardless of what arrives next, let lossy decoding handle it.
    len
}

/// Encoded length implied by a UTF-8 lead byte, 0 for invalid leads.
fn sequence_width(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
