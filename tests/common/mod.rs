//! Shared test utilities for the integration test suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

use std::sync::Once;

pub use marisdb::testing::{MemoryStore, ScriptedEngine, TestValue};
pub use marisdb::{ClientId, ScriptConfig, ScriptHost, StoreArg};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Install the test log subscriber once for the whole test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

// ============================================================================
// Hosts
// ============================================================================

/// A host over a scripted engine and an empty in-memory store.
pub fn new_host() -> ScriptHost<ScriptedEngine, MemoryStore> {
    host_with_config(ScriptConfig::default())
}

/// A host whose inline reply buffer holds only `inline_bytes` bytes, so
/// even small replies spill into overflow blocks.
pub fn small_reply_host(inline_bytes: usize) -> ScriptHost<ScriptedEngine, MemoryStore> {
    host_with_config(ScriptConfig {
        reply_inline_bytes: inline_bytes,
        ..ScriptConfig::default()
    })
}

fn host_with_config(config: ScriptConfig) -> ScriptHost<ScriptedEngine, MemoryStore> {
    init_tracing();
    ScriptHost::new(ScriptedEngine::new(), MemoryStore::new(), config)
        .expect("host construction failed")
}

// ============================================================================
// Argument vectors
// ============================================================================

/// Store-style argv from text parts.
pub fn argv(parts: &[&str]) -> Vec<StoreArg> {
    parts.iter().map(|part| StoreArg::from(*part)).collect()
}

/// Builds `EVALJS <label> 0` argv; the label stands in for script source text.
pub fn evaljs(label: &str) -> Vec<StoreArg> {
    argv(&["EVALJS", label, "0"])
}
