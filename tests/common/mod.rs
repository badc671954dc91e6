//! Shared test utilities and the mock command-execution service.

#![allow(dead_code)]

pub mod mock_service;

use ttyline::{EngineConfig, Terminal};

/// Route engine logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Terminal wired to a service URL, with the welcome banner disabled so
/// tests assert only on lines the engine itself produces.
pub fn test_terminal(base_url: &str) -> Terminal {
    init_tracing();
    Terminal::new(EngineConfig {
        base_url: base_url.to_string(),
        welcome_line: None,
        ..EngineConfig::default()
    })
}

/// Line texts currently in the buffer, in display order.
pub fn line_texts(term: &Terminal) -> Vec<String> {
    term.lines().into_iter().map(|line| line.text).collect()
}

/// Poll until the terminal reports a streaming session, or panic.
pub async fn wait_until_busy(term: &Terminal) {
    for _ in 0..200 {
        if term.is_busy() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("terminal never entered the streaming state");
}
