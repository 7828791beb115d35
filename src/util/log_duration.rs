//! Scope timing that reports through the `log` facade.

use std::time::{Duration, Instant};

use log::{Level, log};

/// Logs how long a scope took when dropped.
///
/// # Examples
///
/// ```
/// use halberd::util::LogDuration;
///
/// {
///     let _timer = LogDuration::new("index corpus");
///     // ... work ...
/// } // logs "index corpus: N ms" at info level
/// ```
#[derive(Debug)]
pub struct LogDuration {
    label: String,
    level: Level,
    start: Instant,
}

impl LogDuration {
    /// Start timing a scope labelled `label`, logged at info level.
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self::with_level(label, Level::Info)
    }

    /// Start timing a scope logged at `level`.
    pub fn with_level<S: Into<String>>(label: S, level: Level) -> Self {
        LogDuration {
            label: label.into(),
            level,
            start: Instant::now(),
        }
    }

    /// Time elapsed since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The label reported on drop.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        log!(
            self.level,
            "{}: {} ms",
            self.label,
            self.start.elapsed().as_millis()
        );
    }
}

/// Time the rest of the enclosing scope.
///
/// ```
/// halberd::log_duration!("rebuild");
/// ```
#[macro_export]
macro_rules! log_duration {
    ($label:expr) => {
        let _log_duration_guard = $crate::util::LogDuration::new($label);
    };
}
