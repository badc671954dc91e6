//! Carriage-return overwrite semantics.
//!
//! A carriage return moves a real terminal's write cursor to the start of
//! the current line, so only content written after the *last* `\r` in a
//! chunk is ever visible. Programs rely on this for progress bars and
//! spinners. [`reassemble`] turns one decoded chunk into the single buffer
//! mutation that models this.

/// Mutation to apply to the line buffer for one decoded chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMutation {
    /// No current output line exists: start a new one.
    AppendNewLine(String),
    /// Chunk contained a carriage return: overwrite the current line.
    ReplaceCurrentLine(String),
    /// Plain continuation: extend the current line.
    AppendToCurrentLine(String),
}

/// Map one decoded chunk to a buffer mutation.
///
/// Only text after the last carriage return survives; everything before it
/// (including earlier carriage returns) is discarded. Without a current
/// output line the surviving text always starts a new line, so a first chunk
/// that happens to contain `\r` is not dropped. An empty chunk is a
/// no-op, never an empty-line append.
pub fn reassemble(decoded: &str, has_current_output_line: bool) -> Option<LineMutation> {
    if decoded.is_empty() {
        return None;
    }

    let last_cr = decoded.rfind('\r');
    let visible = match last_cr {
        Some(pos) => &decoded[pos + 1..],
        None => decoded,
    };

    let mutation = if !has_current_output_line {
        LineMutation::AppendNewLine(visible.to_string())
    } else if last_cr.is_some() {
        LineMutation::ReplaceCurrentLine(visible.to_string())
    } else {
        LineMutation::AppendToCurrentLine(visible.to_string())
    };
    Some(mutation)
}
