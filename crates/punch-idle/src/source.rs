//! The platform-facing half of idle detection.

use std::time::Duration;

use thiserror::Error;

/// Errors from querying a platform idle facility.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No idle facility exists for this platform.
    #[error("idle detection is not supported on this platform")]
    Unsupported,

    /// The facility exists but could not be queried (no display, denied, sandboxed).
    #[error("{source_name} unavailable: {message}")]
    Unavailable {
        source_name: &'static str,
        message: String,
    },
}

impl SourceError {
    pub(crate) fn unavailable(source_name: &'static str, message: impl ToString) -> Self {
        Self::Unavailable {
            source_name,
            message: message.to_string(),
        }
    }
}

/// Something that can report how long the user has produced no input.
///
/// Each supported OS has one implementation; see [`crate::platform`].
/// Implementations keep their native handles private.
pub trait IdleSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Time elapsed since the last keyboard or pointer input.
    fn idle_time(&mut self) -> Result<Duration, SourceError>;
}

impl<S: IdleSource + ?Sized> IdleSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn idle_time(&mut self) -> Result<Duration, SourceError> {
        (**self).idle_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{IdleDetector, IdleThreshold};
    use crate::simulated::SimulatedSource;

    #[test]
    fn boxed_source_drives_detector() {
        let handle = SimulatedSource::new();
        let boxed: Box<dyn IdleSource> = Box::new(handle.clone());
        let mut detector = IdleDetector::new(boxed);

        detector.start(IdleThreshold::from_secs(5).unwrap());
        assert_eq!(detector.source().name(), "simulated");

        handle.advance(Duration::from_secs(6));
        let notice = detector.poll().unwrap();
        assert_eq!(notice.idle_secs, 6);

        handle.set_failing(true);
        assert!(detector.poll().is_none());
        assert!(detector.is_disabled());
    }
}
