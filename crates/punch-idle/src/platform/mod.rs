//! Native idle sources.
//!
//! One [`IdleSource`] per supported OS, chosen at build time and exported as
//! [`NativeSource`]. Platforms without an implementation get
//! [`UnsupportedSource`], which always reports the facility as missing.

use std::time::Duration;

use crate::source::{IdleSource, SourceError};

#[cfg(all(unix, not(target_os = "macos")))]
pub mod x11;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(all(unix, not(target_os = "macos")))]
pub use self::x11::X11Source as NativeSource;

#[cfg(target_os = "macos")]
pub use self::macos::CoreGraphicsSource as NativeSource;

#[cfg(target_os = "windows")]
pub use self::windows::LastInputSource as NativeSource;

#[cfg(not(any(unix, target_os = "windows")))]
pub use self::UnsupportedSource as NativeSource;

/// Idle source for platforms with no idle facility.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSource;

impl UnsupportedSource {
    pub const fn new() -> Self {
        Self
    }
}

impl IdleSource for UnsupportedSource {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn idle_time(&mut self) -> Result<Duration, SourceError> {
        Err(SourceError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_source_always_fails() {
        let mut source = UnsupportedSource::new();
        assert_eq!(source.idle_time(), Err(SourceError::Unsupported));
        assert_eq!(source.name(), "unsupported");
    }
}
