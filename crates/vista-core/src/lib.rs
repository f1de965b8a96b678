pub mod actions;
pub mod config;
pub mod notify;
pub mod parser;
pub mod reconcile;
pub mod session;

// Exposed for benchmarks - not part of stable API
#[doc(hidden)]
pub mod search;

mod error;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use parser::{parse, parse_with_report};
pub use session::{FormSession, ViewSession};

pub use vista_types::*;
