//! Public macros for the cleanup-stack crate

/// Registers a deferred cleanup block on a stack
///
/// Sugar for [`CleanupStack::push`](crate::CleanupStack::push) with a
/// `move` closure.
///
/// # Examples
/// ```
/// use cleanup_stack::{defer, CleanupStack};
///
/// let mut stack = CleanupStack::with_capacity(2).unwrap();
/// let handle = 7;
/// defer!(stack, {
///     let _ = handle; // release it
/// });
/// stack.unwind_all();
/// ```
#[macro_export]
macro_rules! defer {
    ($stack:expr, $body:block) => {
        $stack.push(move || $body)
    };
}

/// Runs a block inside a fresh [`ScopeFrame`](crate::ScopeFrame)
///
/// The frame is bound to the given identifier; everything deferred
/// through it unwinds when the block ends, however it ends.
///
/// # Examples
/// ```
/// use cleanup_stack::{with_scope, CleanupStack};
///
/// let mut stack = CleanupStack::with_capacity(2).unwrap();
/// with_scope!(&mut stack, |frame| {
///     frame.defer(|| { /* scoped resource */ });
/// });
/// assert!(stack.is_empty());
/// ```
#[macro_export]
macro_rules! with_scope {
    ($stack:expr, |$frame:ident| $body:block) => {{
        let mut $frame = $crate::ScopeFrame::enter($stack);
        $body
    }};
}

/// Partial unwind to `boundary`, then `break` the enclosing loop
///
/// The current scope's resources are released; resources from outer,
/// still-open scopes remain pending for their own unwind.
#[macro_export]
macro_rules! unwind_break {
    ($stack:expr, $boundary:expr) => {{
        $stack.unwind_to($boundary);
        break;
    }};
}

/// Full unwind, then `return` from the enclosing function
///
/// Every scope currently open in the activation unwinds, innermost
/// first, regardless of how deeply scopes are nested.
#[macro_export]
macro_rules! unwind_return {
    ($stack:expr) => {{
        $stack.unwind_all();
        return;
    }};
    ($stack:expr, $value:expr) => {{
        return $stack.unwind_and_return($value);
    }};
}
