//! Scope boundaries for partial unwinding

/// Saved snapshot of a cleanup stack's height at the moment a scope begins
///
/// A boundary can be used later to unwind the stack back to this height,
/// running every cleanup action registered after this point. Boundaries
/// refer to a position within one stack; they own nothing. Scopes nest
/// arbitrarily: boundaries form their own implicit stack through the
/// block nesting of the caller's code, so no separate boundary container
/// is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeBoundary {
    pub(crate) height: usize,
}

impl ScopeBoundary {
    /// Stack height recorded when the scope was opened
    pub fn height(&self) -> usize {
        self.height
    }
}
