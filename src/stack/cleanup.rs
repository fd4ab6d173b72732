//! Cleanup stack implementation
//!
//! A cleanup stack holds pending cleanup actions and executes them on
//! demand, strictly in reverse order of registration (LIFO). Application
//! code registers an action the moment a resource is acquired; on any
//! failure check it unwinds instead of releasing resources by hand.
//!
//! # Stack Layout
//! ```text
//! [bottom]---[action1]---[action2]---[action3]---[top]
//!             oldest       <- runs last ... runs first ->
//! ```
//!
//! Unwinding always pops from the top: the most recently registered
//! resource is released first, matching the dependency direction of
//! acquisition (a resource registered after another may depend on it).
//!
//! ## Invariants
//!
//! - Height never exceeds the declared capacity; exceeding it is a
//!   programmer error and panics rather than dropping a cleanup
//! - [`pop_and_run`](CleanupStack::pop_and_run) is the sole execution
//!   path: no action is skipped, reordered, or run more than once
//! - At a normal scope close, height equals the boundary recorded when
//!   the scope opened; at activation exit, height is zero
//!
//! One stack belongs to exactly one activation (one logical call frame,
//! or one task if the host runs several). Stacks are never shared between
//! concurrently executing activations, so all operations take `&mut self`
//! and nothing is synchronized.

use super::{ScopeBoundary, StackConfig, StackStats};
use crate::error::{StackError, StackResult};

#[cfg(feature = "logging")]
use tracing::{trace, warn};

/// A deferred cleanup action
///
/// Opaque, zero-argument, and side-effecting; owned by the stack from
/// registration until it executes. An action is assumed not to panic;
/// a collaborator that cannot guarantee this should catch and log inside
/// the action itself, so one failing cleanup never aborts the unwind of
/// the unrelated actions below it.
pub type CleanupAction<'a> = Box<dyn FnOnce() + 'a>;

/// Bounded LIFO register of pending cleanup actions
///
/// Created once per activation and sized to the maximum number of
/// resources ever concurrently pending within it. The backing storage is
/// pre-allocated to the declared capacity, so registration never
/// reallocates; the capacity check on [`push`](Self::push) is how
/// under-provisioning is detected.
///
/// The lifetime parameter `'a` bounds what registered actions may borrow.
pub struct CleanupStack<'a> {
    /// Pending actions, oldest first
    actions: Vec<CleanupAction<'a>>,

    /// Declared capacity (the backing `Vec` never grows past it)
    capacity: usize,

    /// Configuration
    config: StackConfig,

    /// Counters (updated only if `config.track_stats` is set)
    stats: StackStats,
}

impl<'a> CleanupStack<'a> {
    /// Creates a new cleanup stack with custom configuration
    ///
    /// # Errors
    /// Returns [`StackError::ZeroCapacity`] if `capacity` is zero: the
    /// bound must be positive and known at creation time.
    pub fn with_config(capacity: usize, config: StackConfig) -> StackResult<Self> {
        if capacity == 0 {
            return Err(StackError::ZeroCapacity);
        }

        Ok(Self {
            actions: Vec::with_capacity(capacity),
            capacity,
            config,
            stats: StackStats::default(),
        })
    }

    /// Creates a new cleanup stack with default configuration
    pub fn with_capacity(capacity: usize) -> StackResult<Self> {
        Self::with_config(capacity, StackConfig::default())
    }

    /// Creates a production-configured cleanup stack
    pub fn production(capacity: usize) -> StackResult<Self> {
        Self::with_config(capacity, StackConfig::production())
    }

    /// Creates a debug-configured cleanup stack
    pub fn debug(capacity: usize) -> StackResult<Self> {
        Self::with_config(capacity, StackConfig::debug())
    }

    /// Returns the declared capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current count of pending actions
    pub fn height(&self) -> usize {
        self.actions.len()
    }

    /// Returns how many more actions can be registered
    pub fn remaining(&self) -> usize {
        self.capacity - self.actions.len()
    }

    /// Returns `true` if no actions are pending
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    fn label(&self) -> &'static str {
        self.config.label.unwrap_or("cleanup-stack")
    }

    /// Registers `action` as the new top of the stack
    ///
    /// # Panics
    /// Panics if the stack is already at capacity. This is an
    /// unrecoverable sizing defect in the caller, not a runtime condition
    /// to recover from; the stack's state before the failed attempt is
    /// unaffected. Use [`try_push`](Self::try_push) to surface the defect
    /// as an error instead.
    #[track_caller]
    pub fn push(&mut self, action: impl FnOnce() + 'a) {
        if let Err(err) = self.try_push(action) {
            panic!("{err} ('{}')", self.label());
        }
    }

    /// Registers `action`, or reports that the stack is at capacity
    ///
    /// # Errors
    /// Returns [`StackError::CapacityExceeded`] when the stack already
    /// holds `capacity` pending actions. Nothing is registered and the
    /// existing actions are untouched.
    pub fn try_push(&mut self, action: impl FnOnce() + 'a) -> StackResult<()> {
        if self.actions.len() == self.capacity {
            #[cfg(feature = "logging")]
            warn!(
                stack = self.label(),
                capacity = self.capacity,
                "cleanup registration beyond declared capacity"
            );
            return Err(StackError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        self.actions.push(Box::new(action));

        if self.config.track_stats {
            self.stats.total_pushed += 1;
            self.stats.peak_height = self.stats.peak_height.max(self.actions.len());
        }

        #[cfg(feature = "logging")]
        trace!(
            stack = self.label(),
            height = self.actions.len(),
            "cleanup registered"
        );

        Ok(())
    }

    /// Removes the top action and executes it synchronously
    ///
    /// This is the sole execution path: both unwind modes are loops over
    /// `pop_and_run`.
    ///
    /// # Panics
    /// Panics if the stack is empty: the caller's protocol assumed a
    /// pending action where there was none.
    #[track_caller]
    pub fn pop_and_run(&mut self) {
        let Some(action) = self.actions.pop() else {
            panic!("pop_and_run on empty cleanup stack '{}'", self.label());
        };

        if self.config.track_stats {
            self.stats.total_run += 1;
        }

        #[cfg(feature = "logging")]
        trace!(
            stack = self.label(),
            height = self.actions.len(),
            "running cleanup"
        );

        action();
    }

    /// Records a scope boundary at the current stack height
    ///
    /// Call once at the lexical start of any block whose resources must be
    /// unwound as a unit, and hand the boundary back to
    /// [`unwind_to`](Self::unwind_to) when the block ends.
    pub fn mark(&self) -> ScopeBoundary {
        ScopeBoundary {
            height: self.actions.len(),
        }
    }

    /// Partial unwind: runs pending actions down to `boundary`
    ///
    /// Actions registered after the boundary was recorded run in reverse
    /// registration order; older actions stay pending for their own
    /// scopes' eventual unwind. Silently does nothing when the height is
    /// already at or below the boundary: a scope that registered nothing
    /// closes for free, and a boundary overtaken by a full unwind is
    /// stale rather than wrong.
    pub fn unwind_to(&mut self, boundary: ScopeBoundary) {
        while self.actions.len() > boundary.height {
            self.pop_and_run();
        }

        #[cfg(feature = "logging")]
        trace!(
            stack = self.label(),
            height = self.actions.len(),
            "scope closed"
        );
    }

    /// Full unwind: runs every pending action down to height zero
    ///
    /// Ignores scope boundaries entirely, draining all scopes currently
    /// open in this activation, innermost first. This is the counterpart
    /// to a scoped-destructor language unwinding every stack frame on
    /// function exit.
    pub fn unwind_all(&mut self) {
        while !self.actions.is_empty() {
            self.pop_and_run();
        }

        #[cfg(feature = "logging")]
        trace!(stack = self.label(), "activation unwound");
    }

    /// Full unwind, then hands `value` back for the caller's `return`
    ///
    /// ```
    /// # use cleanup_stack::CleanupStack;
    /// fn run(stack: &mut CleanupStack<'_>) -> i32 {
    ///     stack.push(|| { /* release */ });
    ///     stack.unwind_and_return(0)
    /// }
    /// # assert_eq!(run(&mut CleanupStack::with_capacity(1).unwrap()), 0);
    /// ```
    pub fn unwind_and_return<T>(&mut self, value: T) -> T {
        self.unwind_all();
        value
    }

    /// Returns a snapshot of the usage counters
    ///
    /// All fields are zero unless the stack was configured with
    /// `track_stats`.
    pub fn statistics(&self) -> StackStats {
        self.stats
    }

    /// Resets the usage counters
    pub fn reset_statistics(&mut self) {
        self.stats = StackStats::default();
    }
}

impl Drop for CleanupStack<'_> {
    fn drop(&mut self) {
        // Every normal control path leaves the stack empty before it is
        // dropped. The drain here keeps registered cleanups running when a
        // panic unwinds through the owning activation instead.
        #[cfg(feature = "logging")]
        if !self.actions.is_empty() {
            trace!(
                stack = self.label(),
                pending = self.actions.len(),
                "draining cleanup stack on drop"
            );
        }

        self.unwind_all();
    }
}

impl core::fmt::Debug for CleanupStack<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CleanupStack")
            .field("label", &self.label())
            .field("height", &self.actions.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
