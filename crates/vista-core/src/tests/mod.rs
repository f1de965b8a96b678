//! Test module for vista-core
//!
//! Cross-module scenarios:
//! - Parsing whole documents and recovering from malformed input
//! - Fuzzy filtering, sectioning and ordering
//! - Reconciliation and selection across render cycles
//! - Session behaviour: search, actions, forms

// Test modules use exact float comparisons and test-specific casts
#![allow(clippy::float_cmp, clippy::cast_possible_truncation)]

mod parser_tests;
mod session_tests;
