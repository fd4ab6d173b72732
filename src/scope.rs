//! RAII-based scope frame for automatic partial unwinding

use crate::stack::{CleanupStack, ScopeBoundary};

/// RAII wrapper around one nested scope of a cleanup stack
///
/// A frame records the stack's boundary when it is created and partial
/// unwinds back to that boundary when it goes out of scope, so every exit
/// path from the block (fall-through, `break`, `?`, early `return`, or a
/// panic) releases exactly the resources this scope registered.
///
/// # Examples
///
/// ```
/// use cleanup_stack::{CleanupStack, ScopeFrame};
///
/// let mut stack = CleanupStack::with_capacity(4).unwrap();
/// stack.push(|| { /* outlives the loop */ });
///
/// for _ in 0..3 {
///     let mut frame = ScopeFrame::enter(&mut stack);
///     frame.defer(|| { /* this iteration's resource */ });
///     // frame drops here: only this iteration's cleanups run
/// }
///
/// assert_eq!(stack.height(), 1);
/// ```
pub struct ScopeFrame<'s, 'a> {
    stack: &'s mut CleanupStack<'a>,
    boundary: ScopeBoundary,
}

impl<'s, 'a> ScopeFrame<'s, 'a> {
    /// Opens a scope at the stack's current height
    pub fn enter(stack: &'s mut CleanupStack<'a>) -> Self {
        let boundary = stack.mark();
        Self { stack, boundary }
    }

    /// The boundary this frame will unwind to
    pub fn boundary(&self) -> ScopeBoundary {
        self.boundary
    }

    /// Registers a cleanup action within this scope
    ///
    /// # Panics
    /// Panics if the underlying stack is at capacity, as
    /// [`CleanupStack::push`] does.
    #[track_caller]
    pub fn defer(&mut self, action: impl FnOnce() + 'a) {
        self.stack.push(action);
    }

    /// Reborrows the underlying stack
    ///
    /// Use this to open a nested frame, or to force a full unwind on an
    /// activation-level early exit. The frame's own drop afterwards is a
    /// harmless no-op, since its boundary is then above the stack height.
    pub fn stack(&mut self) -> &mut CleanupStack<'a> {
        self.stack
    }

    /// Ends the scope now instead of at the end of the lexical block
    pub fn close(self) {
        // Drop handles the unwind
        drop(self);
    }
}

impl Drop for ScopeFrame<'_, '_> {
    fn drop(&mut self) {
        self.stack.unwind_to(self.boundary);
    }
}
