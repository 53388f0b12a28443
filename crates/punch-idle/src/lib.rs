//! User idle detection for punch.
//!
//! - [`IdleSource`]: the per-platform query for time since the last input
//! - [`IdleDetector`]: the threshold state machine that turns those readings
//!   into one [`IdleNotice`] per idle period
//! - [`watch::run`]: a timer loop that drives a detector on the current task
//!
//! Platform failures never surface as errors from the detector. It moves to
//! [`DetectorState::Disabled`] instead, which callers can check with
//! [`IdleDetector::is_disabled`].

pub mod detector;
pub mod platform;
pub mod simulated;
pub mod source;
pub mod watch;

pub use detector::{
    DetectorState, IdleDetector, IdleNotice, IdleThreshold, MIN_POLL_INTERVAL, ThresholdError,
};
pub use platform::{NativeSource, UnsupportedSource};
pub use simulated::SimulatedSource;
pub use source::{IdleSource, SourceError};
