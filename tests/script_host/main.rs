//! Script Host Integration Tests
//!
//! End-to-end tests for the `EVALJS` entry point: validation, nested
//! dispatch, reply marshalling, and client cleanup.

#[path = "../common/mod.rs"]
mod common;

mod cleanup;
mod dispatch;
mod replies;
mod validation;
