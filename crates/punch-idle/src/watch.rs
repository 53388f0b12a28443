//! Timer-driven polling loop.

use std::future::Future;
use std::time::Duration;

use crate::detector::{DetectorState, IdleDetector, IdleNotice};
use crate::source::IdleSource;

/// Polls `detector` on a timer until it stops observing or `shutdown`
/// resolves, calling `on_idle` for every notice.
///
/// The interval is `preferred` capped at half the current threshold, and is
/// recomputed each tick so a handler that restarts with a new threshold takes
/// effect immediately. `on_idle` receives the detector itself and may call
/// `start` or `stop` on it.
///
/// Returns the detector state the loop ended in.
pub async fn run<S, F>(
    detector: &mut IdleDetector<S>,
    preferred: Duration,
    shutdown: impl Future<Output = ()>,
    mut on_idle: F,
) -> DetectorState
where
    S: IdleSource,
    F: FnMut(&mut IdleDetector<S>, IdleNotice),
{
    tokio::pin!(shutdown);

    while let Some(interval) = detector.poll_interval(preferred) {
        tokio::select! {
            () = &mut shutdown => {
                tracing::debug!("idle watch shut down");
                break;
            }
            () = tokio::time::sleep(interval) => {
                if let Some(notice) = detector.poll() {
                    on_idle(detector, notice);
                }
            }
        }
    }

    detector.state()
}
