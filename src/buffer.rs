//! Ordered line storage shared between the engine and the rendering layer.
//!
//! The buffer is append-only, except that the single *current* output line
//! (the most recently appended output line of an active stream) may have its
//! text replaced or extended in place. Input lines are immutable once pushed.

/// Origin of a display line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of a submitted command.
    Input,
    /// Remote output or an engine-generated sentinel.
    Output,
}

/// One display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Input,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
        }
    }
}

/// Handle to a line that was current when it was appended.
///
/// Pairs the index with the buffer generation observed at append time, so a
/// handle held across an external `clear()` can never resolve to a line it
/// was not issued for. Always re-validate with [`LineBuffer::is_current_output`]
/// before mutating through a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHandle {
    index: usize,
    generation: u64,
}

/// Ordered sequence of [`Line`]s.
#[derive(Debug, Default)]
pub struct LineBuffer {
    lines: Vec<Line>,
    generation: u64,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line and return a handle to it.
    pub fn push(&mut self, line: Line) -> LineHandle {
        self.lines.push(line);
        LineHandle {
            index: self.lines.len() - 1,
            generation: self.generation,
        }
    }

    /// Remove every line and invalidate all outstanding handles.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Owned copy for the rendering layer.
    pub fn snapshot(&self) -> Vec<Line> {
        self.lines.clone()
    }

    /// The most recent input line, if any.
    pub fn last_input(&self) -> Option<&Line> {
        self.lines.iter().rev().find(|l| l.kind == LineKind::Input)
    }

    /// Whether `handle` still addresses the current (mutable) output line:
    /// same generation, last element, and of output kind.
    pub fn is_current_output(&self, handle: LineHandle) -> bool {
        handle.generation == self.generation
            && handle.index + 1 == self.lines.len()
            && self
                .lines
                .last()
                .is_some_and(|l| l.kind == LineKind::Output)
    }

    /// Replace the text of the current output line. Stale handles are a no-op.
    pub fn replace_text(&mut self, handle: LineHandle, text: String) -> bool {
        if !self.is_current_output(handle) {
            return false;
        }
        self.lines[handle.index].text = text;
        true
    }

    /// Extend the text of the current output line. Stale handles are a no-op.
    pub fn append_text(&mut self, handle: LineHandle, text: &str) -> bool {
        if !self.is_current_output(handle) {
            return false;
        }
        self.lines[handle.index].text.push_str(text);
        true
    }
}
