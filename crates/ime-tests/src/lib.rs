//! Integration tests for the ime crates.
//!
//! Each test goes file -> store -> commands -> file, the same path the
//! `ime` binary takes.
