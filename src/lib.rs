//! Sockmatch: stateless agents that deliberate over whether a sock can be
//! matched.
//!
//! Four analysts (color, size, personality, history) each review one sock and
//! vote; a final arbiter reads their reports, writes a philosophical verdict
//! and tallies the five votes. Every step is announced on a notification bus.

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod input;
pub mod model;
pub mod tools;

#[cfg(test)]
mod test_support;
