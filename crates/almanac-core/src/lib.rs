//! # almanac-core
//!
//! Core types shared across the almanac workspace: the error taxonomy, the
//! relinkable handle used for copy-on-write ledger swaps, library settings,
//! and small text utilities.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure_entry!` macro.
pub mod errors;

/// Shared reference handle whose target can be swapped atomically.
pub mod handle;

/// Library settings (feed mode, walk cap, weekend skipping).
pub mod settings;

/// Miscellaneous utilities.
pub mod utilities;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use handle::RelinkableHandle;
pub use settings::{FeedMode, Settings};
