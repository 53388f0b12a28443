//! Idle threshold state machine.
//!
//! # States
//!
//! ```text
//! Stopped --start--> Armed --idle >= threshold--> Idle --idle < threshold--> Armed ...
//!                      |                            |
//!                      +------ query fails ---------+--> Disabled
//! ```
//!
//! Only `Armed -> Idle` produces an [`IdleNotice`], so a user who stays away
//! is reported once. `Disabled` is left only through [`IdleDetector::start`],
//! which probes the platform again.
//!
//! Notices are returned from [`IdleDetector::poll`] after the transition has
//! been applied, so whoever handles a notice may call `start` or `stop` on
//! the same detector straight away.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use crate::source::{IdleSource, SourceError};

/// Errors for idle threshold values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("idle threshold must be a positive number of seconds")]
    Zero,
}

/// Shortest interval [`IdleThreshold::poll_interval`] will return.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long the user must be inactive to count as idle. Always at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdleThreshold(u64);

impl IdleThreshold {
    pub const fn from_secs(secs: u64) -> Result<Self, ThresholdError> {
        if secs == 0 {
            return Err(ThresholdError::Zero);
        }
        Ok(Self(secs))
    }

    pub const fn secs(self) -> u64 {
        self.0
    }

    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }

    /// The interval to poll at: `preferred`, capped at half the threshold
    /// and never below [`MIN_POLL_INTERVAL`].
    pub fn poll_interval(self, preferred: Duration) -> Duration {
        preferred.min(self.as_duration() / 2).max(MIN_POLL_INTERVAL)
    }
}

impl TryFrom<u64> for IdleThreshold {
    type Error = ThresholdError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::from_secs(secs)
    }
}

impl fmt::Display for IdleThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Where the detector is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// Not observing.
    Stopped,
    /// Observing; the user is active.
    Armed,
    /// Observing; the user crossed the threshold and was reported.
    Idle,
    /// The platform facility failed. Never notifies.
    Disabled,
}

/// Emitted once when inactivity first crosses the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleNotice {
    /// Whole seconds since the last input, at least the threshold.
    pub idle_secs: u64,
    /// When the last input happened.
    pub idle_since: DateTime<Utc>,
    /// The threshold that was crossed.
    pub threshold: IdleThreshold,
}

/// Watches an [`IdleSource`] and reports threshold crossings.
pub struct IdleDetector<S> {
    source: S,
    state: DetectorState,
    threshold: Option<IdleThreshold>,
}

impl<S: IdleSource> IdleDetector<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            state: DetectorState::Stopped,
            threshold: None,
        }
    }

    pub const fn state(&self) -> DetectorState {
        self.state
    }

    pub const fn threshold(&self) -> Option<IdleThreshold> {
        self.threshold
    }

    pub const fn is_disabled(&self) -> bool {
        matches!(self.state, DetectorState::Disabled)
    }

    /// Whether the detector is observing (armed or idle).
    pub const fn is_running(&self) -> bool {
        matches!(self.state, DetectorState::Armed | DetectorState::Idle)
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Poll interval for the current threshold, if observing.
    pub fn poll_interval(&self, preferred: Duration) -> Option<Duration> {
        self.is_running()
            .then_some(self.threshold)
            .flatten()
            .map(|t| t.poll_interval(preferred))
    }

    /// Begins observation.
    ///
    /// Does nothing when already observing with the same threshold. A new
    /// threshold restarts observation. The platform is probed once; if that
    /// fails the detector is disabled instead of armed.
    pub fn start(&mut self, threshold: IdleThreshold) {
        if self.is_running() && self.threshold == Some(threshold) {
            tracing::debug!(%threshold, "idle detector already running");
            return;
        }
        self.threshold = Some(threshold);
        match self.source.idle_time() {
            Ok(_) => {
                tracing::debug!(source = self.source.name(), %threshold, "idle detector armed");
                self.state = DetectorState::Armed;
            }
            Err(err) => self.disable(&err),
        }
    }

    /// Ceases observation. Safe in any state.
    ///
    /// A disabled detector stays disabled, since the platform is still
    /// unavailable; only [`start`](Self::start) probes it again.
    pub fn stop(&mut self) {
        match self.state {
            DetectorState::Stopped | DetectorState::Disabled => {}
            DetectorState::Armed | DetectorState::Idle => {
                tracing::debug!(from = ?self.state, "idle detector stopped");
                self.state = DetectorState::Stopped;
            }
        }
    }

    /// Checks the source once, using the current wall-clock time.
    pub fn poll(&mut self) -> Option<IdleNotice> {
        self.poll_at(Utc::now())
    }

    /// Checks the source once, with `now` as the time of the check.
    pub fn poll_at(&mut self, now: DateTime<Utc>) -> Option<IdleNotice> {
        if !self.is_running() {
            return None;
        }
        let threshold = self.threshold?;

        let idle = match self.source.idle_time() {
            Ok(idle) => idle,
            Err(err) => {
                self.disable(&err);
                return None;
            }
        };

        let crossed = idle >= threshold.as_duration();
        match (self.state, crossed) {
            (DetectorState::Armed, true) => {
                self.state = DetectorState::Idle;
                let idle_since = TimeDelta::from_std(idle).map_or(now, |delta| now - delta);
                let notice = IdleNotice {
                    idle_secs: idle.as_secs(),
                    idle_since,
                    threshold,
                };
                tracing::info!(idle_secs = notice.idle_secs, %threshold, "user idle");
                Some(notice)
            }
            (DetectorState::Idle, false) => {
                tracing::debug!(idle_ms = idle.as_millis(), "activity resumed, re-armed");
                self.state = DetectorState::Armed;
                None
            }
            _ => None,
        }
    }

    fn disable(&mut self, err: &SourceError) {
        tracing::warn!(source = self.source.name(), error = %err, "idle detection disabled");
        self.state = DetectorState::Disabled;
    }
}
