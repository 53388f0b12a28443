#![allow(unsafe_code)]

use std::time::Duration;

use crate::source::{IdleSource, SourceError};

const NAME: &str = "coregraphics";

/// `kCGEventSourceStateCombinedSessionState`
const COMBINED_SESSION_STATE: i32 = 0;
/// `kCGAnyInputEventType`
const ANY_INPUT_EVENT: u32 = u32::MAX;

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGEventSourceSecondsSinceLastEventType(state: i32, event_type: u32) -> f64;
}

/// Idle source backed by the CoreGraphics combined session event state.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreGraphicsSource;

impl CoreGraphicsSource {
    pub const fn new() -> Self {
        Self
    }
}

impl IdleSource for CoreGraphicsSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn idle_time(&mut self) -> Result<Duration, SourceError> {
        // SAFETY: plain C function taking two integers; no pointers involved.
        let secs = unsafe {
            CGEventSourceSecondsSinceLastEventType(COMBINED_SESSION_STATE, ANY_INPUT_EVENT)
        };
        Duration::try_from_secs_f64(secs)
            .map_err(|e| SourceError::unavailable(NAME, format!("bad idle value {secs}: {e}")))
    }
}
