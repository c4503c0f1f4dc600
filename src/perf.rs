use std::time::Instant;

// ---------------------------------------------------------------------------
// Scoped wall-clock timing
// ---------------------------------------------------------------------------

/// Logs the wall time of the enclosing scope at debug level when dropped.
pub struct ScopedTimer {
    label: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> Self {
        ScopedTimer {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!(
            "{} took {} µs",
            self.label,
            self.start.elapsed().as_micros()
        );
    }
}
