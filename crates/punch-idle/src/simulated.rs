//! A scriptable idle source.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::source::{IdleSource, SourceError};

#[derive(Debug, Default)]
struct SimulatedState {
    idle: Duration,
    failing: bool,
}

/// An idle source whose idle time is set by hand.
///
/// Clones share state, so a test can keep one handle and give another to the
/// detector.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSource {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SimulatedState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Lets `elapsed` pass without any input.
    pub fn advance(&self, elapsed: Duration) {
        self.with_state(|s| s.idle += elapsed);
    }

    /// Registers a keyboard or pointer input now.
    pub fn input(&self) {
        self.with_state(|s| s.idle = Duration::ZERO);
    }

    /// Makes every query fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.with_state(|s| s.failing = failing);
    }

    /// The idle time the source currently reports.
    pub fn idle(&self) -> Duration {
        self.with_state(|s| s.idle)
    }
}

impl IdleSource for SimulatedSource {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn idle_time(&mut self) -> Result<Duration, SourceError> {
        self.with_state(|s| {
            if s.failing {
                Err(SourceError::unavailable("simulated", "query failure injected"))
            } else {
                Ok(s.idle)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let handle = SimulatedSource::new();
        let mut source = handle.clone();

        handle.advance(Duration::from_secs(3));
        assert_eq!(source.idle_time(), Ok(Duration::from_secs(3)));

        handle.input();
        assert_eq!(source.idle_time(), Ok(Duration::ZERO));
    }

    #[test]
    fn failing_source_reports_unavailable() {
        let mut source = SimulatedSource::new();
        source.set_failing(true);
        assert!(matches!(
            source.idle_time(),
            Err(SourceError::Unavailable { source_name: "simulated", .. })
        ));
    }
}
