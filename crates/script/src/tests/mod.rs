//! Test modules for the script crate.
