//! Exit code constants for the sockmatch CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, invalid config)
//! - 2: Model failure (transport, HTTP status, unusable response)
//! - 3: Upstream failure (missing committee reports under the strict policy)
//! - 4: Bus or IO failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input, or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// The hosted model could not be reached or returned something unusable.
pub const MODEL_FAILURE: i32 = 2;

/// Upstream committee reports were missing and the strict policy is active.
pub const UPSTREAM_FAILURE: i32 = 3;

/// Event publishing or local IO failed.
pub const IO_FAILURE: i32 = 4;
