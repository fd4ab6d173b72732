//! Cleanup stack and scope-unwinding primitives
//!
//! ## Modules
//! - `cleanup` - main `CleanupStack` implementation with LIFO semantics
//! - `boundary` - scope boundaries for partial unwinding
//! - `config` - configuration variants (production, debug)
//! - `stats` - usage counters

pub mod boundary;
pub mod cleanup;
pub mod config;
pub mod stats;

pub use boundary::ScopeBoundary;
pub use cleanup::{CleanupAction, CleanupStack};
pub use config::StackConfig;
pub use stats::StackStats;
