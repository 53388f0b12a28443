use std::time::Duration;

use x11rb::connection::Connection;
use x11rb::protocol::screensaver;
use x11rb::protocol::xproto::Window;
use x11rb::rust_connection::RustConnection;

use crate::source::{IdleSource, SourceError};

const NAME: &str = "x11-screensaver";

/// Idle source backed by the X11 MIT-SCREEN-SAVER extension.
///
/// The display connection is opened on first query and kept afterwards. A
/// failed query drops it so the next query reconnects.
#[derive(Default)]
pub struct X11Source {
    conn: Option<(RustConnection, Window)>,
}

impl X11Source {
    pub const fn new() -> Self {
        Self { conn: None }
    }

    fn connect() -> Result<(RustConnection, Window), SourceError> {
        let (conn, screen_num) =
            x11rb::connect(None).map_err(|e| SourceError::unavailable(NAME, e))?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| SourceError::unavailable(NAME, format!("no screen {screen_num}")))?;
        tracing::debug!(screen_num, "connected to X server");
        Ok((conn, root))
    }

    fn query(conn: &RustConnection, root: Window) -> Result<Duration, SourceError> {
        let reply = screensaver::query_info(conn, root)
            .map_err(|e| SourceError::unavailable(NAME, e))?
            .reply()
            .map_err(|e| SourceError::unavailable(NAME, e))?;
        Ok(Duration::from_millis(u64::from(reply.ms_since_user_input)))
    }
}

impl IdleSource for X11Source {
    fn name(&self) -> &'static str {
        NAME
    }

    fn idle_time(&mut self) -> Result<Duration, SourceError> {
        if self.conn.is_none() {
            self.conn = Some(Self::connect()?);
        }
        let Some((conn, root)) = &self.conn else {
            return Err(SourceError::unavailable(NAME, "not connected"));
        };
        let result = Self::query(conn, *root);
        if result.is_err() {
            self.conn = None;
        }
        result
    }
}
