//! Watch command: report idle periods as they happen.

use std::future::Future;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use punch_idle::{DetectorState, IdleDetector, IdleSource, IdleThreshold, watch};

/// Prints one line per idle period until `shutdown` resolves.
///
/// Returns early with [`DetectorState::Disabled`] if the platform cannot
/// report idle time.
pub async fn run<W: Write, S: IdleSource>(
    writer: &mut W,
    detector: &mut IdleDetector<S>,
    threshold: IdleThreshold,
    poll: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<DetectorState> {
    detector.start(threshold);
    if detector.is_disabled() {
        writeln!(writer, "Idle detection is unavailable on this system.")?;
        return Ok(DetectorState::Disabled);
    }
    tracing::info!(
        source = detector.source().name(),
        %threshold,
        "watching for idle periods"
    );

    let mut written = Ok(());
    let state = watch::run(detector, poll, shutdown, |_, notice| {
        if written.is_ok() {
            written = writeln!(
                writer,
                "idle {}s since {}",
                notice.idle_secs,
                notice.idle_since.to_rfc3339()
            );
        }
    })
    .await;
    written?;

    if state == DetectorState::Disabled {
        writeln!(writer, "Idle detection stopped working; giving up.")?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use punch_idle::{SimulatedSource, UnsupportedSource};

    fn threshold(secs: u64) -> IdleThreshold {
        IdleThreshold::from_secs(secs).unwrap()
    }

    #[tokio::test]
    async fn test_unsupported_platform_reports_unavailable() {
        let mut detector = IdleDetector::new(UnsupportedSource::new());
        let mut output = Vec::new();

        let state = run(
            &mut output,
            &mut detector,
            threshold(600),
            Duration::from_secs(5),
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(state, DetectorState::Disabled);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Idle detection is unavailable on this system.\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_prints_one_line_per_idle_period() {
        let source = SimulatedSource::new();
        source.advance(Duration::from_secs(30));
        let mut detector = IdleDetector::new(source);
        let mut output = Vec::new();

        let state = run(
            &mut output,
            &mut detector,
            threshold(10),
            Duration::from_secs(1),
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(state, DetectorState::Idle);
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("idle 30s since "));
    }

    #[tokio::test(start_paused = true)]
    async fn test_platform_failure_mid_watch() {
        let handle = SimulatedSource::new();
        let mut detector = IdleDetector::new(handle.clone());
        let mut output = Vec::new();

        let watching = run(
            &mut output,
            &mut detector,
            threshold(10),
            Duration::from_secs(1),
            std::future::pending(),
        );
        let fail = async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            handle.set_failing(true);
        };
        let (state, ()) = tokio::join!(watching, fail);

        assert_eq!(state.unwrap(), DetectorState::Disabled);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Idle detection stopped working; giving up.\n"
        );
    }
}
