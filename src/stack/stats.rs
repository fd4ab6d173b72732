//! Usage counters for cleanup stacks

/// Snapshot of cleanup stack counters
///
/// Counters are collected only while
/// [`StackConfig::track_stats`](crate::StackConfig) is set; otherwise every
/// field stays zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackStats {
    /// Total actions registered over the stack's lifetime
    pub total_pushed: usize,

    /// Total actions executed
    pub total_run: usize,

    /// Highest number of simultaneously pending actions observed
    pub peak_height: usize,
}
