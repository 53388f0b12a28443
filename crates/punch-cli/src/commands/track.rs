//! Track command: record against one task until idle or interrupted.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use punch_core::Task;
use punch_idle::{IdleDetector, IdleSource, IdleThreshold, watch};

use crate::controller::TrackingController;

/// Options for one tracking run.
#[derive(Debug, Clone)]
pub struct TrackOptions {
    pub task: Task,
    pub comment: Option<String>,
    pub threshold: IdleThreshold,
    pub poll: Duration,
}

/// Records time against `options.task` and writes the timesheet when done.
///
/// Recording ends at the start of the first idle period, or when `shutdown`
/// resolves. If idle detection is unavailable, whether from the start or
/// after the platform fails mid-run, only `shutdown` ends it.
pub async fn run<W: Write, S: IdleSource>(
    writer: &mut W,
    controller: &mut TrackingController,
    detector: &mut IdleDetector<S>,
    options: TrackOptions,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(shutdown);

    let id = controller.start_task(options.task).id();
    if let Some(comment) = options.comment {
        controller.set_comment(id, comment);
    }

    detector.start(options.threshold);
    if detector.is_disabled() {
        tracing::warn!("idle detection unavailable; recording until interrupted");
    } else {
        watch::run(detector, options.poll, shutdown.as_mut(), |detector, notice| {
            controller.handle_idle(&notice);
            detector.stop();
        })
        .await;
        // The loop only ends disabled on a failed query, never on shutdown.
        if detector.is_disabled() {
            tracing::warn!("idle detection failed while recording; recording until interrupted");
        }
    }
    if detector.is_disabled() {
        shutdown.as_mut().await;
    }

    if controller.active_event().is_some() {
        controller.stop();
    }
    punch_core::dump_events(controller.events());
    controller.timesheet().write_to(writer)
}
