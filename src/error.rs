//! Error types for cleanup stack operations
//!
//! The error surface is deliberately narrow. Misuse of the push/pop
//! protocol (overflowing [`push`], underflowing [`pop_and_run`]) is a
//! sizing or protocol defect in the caller and panics instead of
//! returning: cleanup bookkeeping must never silently drop a cleanup.
//!
//! [`push`]: crate::CleanupStack::push
//! [`pop_and_run`]: crate::CleanupStack::pop_and_run

use thiserror::Error;

/// Result type for stack construction and fallible registration
pub type StackResult<T> = Result<T, StackError>;

/// Cleanup stack errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// Capacity must be a positive bound known at creation time
    #[error("cleanup stack capacity must be a positive bound")]
    ZeroCapacity,

    /// Registration attempted beyond the declared capacity
    #[error("cleanup stack at capacity ({capacity}): refusing to drop a pending cleanup")]
    CapacityExceeded {
        /// The declared capacity of the stack
        capacity: usize,
    },
}
