//! Cleanup stack configuration

/// Configuration for a cleanup stack
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Enable statistics tracking
    pub track_stats: bool,

    /// Label used in panic messages and log events
    pub label: Option<&'static str>,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            track_stats: cfg!(debug_assertions),
            label: None,
        }
    }
}

impl StackConfig {
    /// Production configuration - minimal overhead
    pub fn production() -> Self {
        Self {
            track_stats: false,
            label: None,
        }
    }

    /// Debug configuration - full tracking
    pub fn debug() -> Self {
        Self {
            track_stats: true,
            label: None,
        }
    }

    /// Sets the diagnostic label
    #[must_use]
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }
}
