//! Configuration model for sockmatch.
//!
//! Configuration comes from an optional YAML file, then the environment.
//! Every setting has a default, so an empty environment yields a working
//! (if lonely) committee. Unknown YAML fields are ignored for forward
//! compatibility.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::Config;
pub use types::{EventSinkKind, UpstreamPolicy};
