#![allow(unsafe_code)]

use std::time::Duration;

use ::windows::Win32::System::SystemInformation::GetTickCount;
use ::windows::Win32::UI::Input::KeyboardAndMouse::{GetLastInputInfo, LASTINPUTINFO};

use crate::source::{IdleSource, SourceError};

const NAME: &str = "win32-last-input";

/// Idle source backed by `GetLastInputInfo`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastInputSource;

impl LastInputSource {
    pub const fn new() -> Self {
        Self
    }
}

impl IdleSource for LastInputSource {
    fn name(&self) -> &'static str {
        NAME
    }

    fn idle_time(&mut self) -> Result<Duration, SourceError> {
        let mut info = LASTINPUTINFO {
            cbSize: u32::try_from(std::mem::size_of::<LASTINPUTINFO>())
                .map_err(|e| SourceError::unavailable(NAME, e))?,
            dwTime: 0,
        };
        // SAFETY: `info` is a properly sized, writable LASTINPUTINFO.
        let ok = unsafe { GetLastInputInfo(&mut info) };
        if !ok.as_bool() {
            return Err(SourceError::unavailable(NAME, "GetLastInputInfo failed"));
        }
        // SAFETY: no arguments.
        let now = unsafe { GetTickCount() };
        // Tick counts wrap every ~49.7 days.
        Ok(Duration::from_millis(u64::from(now.wrapping_sub(info.dwTime))))
    }
}
