//! Client engine for rendering remote command output as a scrolling terminal.
//!
//! The engine consumes a chunked byte stream from a command-execution service
//! and reconstructs in-order display lines, honoring carriage-return overwrite
//! semantics (progress bars, spinners) and reassembling multi-byte characters
//! split across chunk boundaries. Cancelling mid-stream never corrupts lines
//! that have already been committed.
//!
//! # Pipeline
//!
//! ```text
//! submit ──→ lifecycle guards ──→ StreamSession
//!                                     │
//!                 chunk ──→ ChunkDecoder ──→ reassemble ──→ LineBuffer
//! ```
//!
//! The rendering layer is external: it consumes [`Terminal::lines`] snapshots
//! and [`Terminal::is_busy`], nothing else.

pub mod buffer;
pub mod cancel;
pub mod config;
pub mod decode;
pub mod lifecycle;
pub mod reassembly;
pub mod session;
pub mod terminal;

pub use buffer::{Line, LineBuffer, LineKind};
pub use config::EngineConfig;
pub use session::{SessionOutcome, TransportError};
pub use terminal::{SubmitOutcome, Terminal};
