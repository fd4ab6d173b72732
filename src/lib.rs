//! Deterministic, ordered release of acquired resources
//!
//! This crate provides a bounded LIFO register of pending cleanup actions
//! and the scope-unwinding protocol on top of it, for sequential code where
//! resource acquisition and error checks are interleaved:
//!
//! - [`CleanupStack`] - register a cleanup action the moment a resource is
//!   acquired; actions run strictly in reverse registration order
//! - [`ScopeBoundary`] - a saved stack height marking where a nested scope
//!   began
//! - Partial unwind ([`CleanupStack::unwind_to`]) - release only the current
//!   scope's resources, leaving outer scopes pending
//! - Full unwind ([`CleanupStack::unwind_all`],
//!   [`CleanupStack::unwind_and_return`]) - release everything on an early
//!   exit from the whole activation
//! - [`ScopeFrame`] - RAII wrapper that unwinds to its boundary on drop
//!
//! # Features
//!
//! - `logging` (default): trace-level events on registration and unwinding
//!   via `tracing`
//!
//! # Example
//!
//! ```
//! use cleanup_stack::CleanupStack;
//!
//! fn process() -> cleanup_stack::StackResult<i32> {
//!     let mut stack = CleanupStack::with_capacity(4)?;
//!
//!     let file = "open";
//!     stack.push(move || { let _ = file; /* close it */ });
//!
//!     for attempt in 0..3 {
//!         let boundary = stack.mark();
//!         stack.push(move || { /* release per-attempt buffer */ });
//!
//!         if attempt == 2 {
//!             // early exit from the whole activation: everything unwinds
//!             return Ok(stack.unwind_and_return(-1));
//!         }
//!
//!         // normal end of the nested scope: only this attempt's resources
//!         stack.unwind_to(boundary);
//!     }
//!
//!     Ok(stack.unwind_and_return(0))
//! }
//!
//! assert_eq!(process().unwrap(), -1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod scope;
pub mod stack;

mod macros;

// Re-export common types for convenience
pub use error::{StackError, StackResult};
pub use scope::ScopeFrame;
pub use stack::{CleanupAction, CleanupStack, ScopeBoundary, StackConfig, StackStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
