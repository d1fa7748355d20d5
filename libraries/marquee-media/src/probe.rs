//! Media duration probe
//!
//! Videos dropped into a timeline rarely come with trustworthy duration
//! metadata, so the authoring flow probes each one: load the resource's
//! metadata under a sequence of cross-origin strategies and read the raw
//! duration from whichever loads first. A strategy that errors is not a
//! probe failure; only the hard deadline is.

use crate::error::{MediaError, Result};
use marquee_core::{CrossOriginMode, MediaMetadataSource};
use std::time::Duration;
use tracing::{debug, warn};

/// Hard deadline racing the whole strategy sequence
pub const PROBE_DEADLINE: Duration = Duration::from_millis(15_000);

/// Duration assigned when every strategy errors without a metadata load
pub const FALLBACK_DURATION_SECS: u32 = 10;

/// Strategies tried in order until one delivers metadata
const STRATEGY_ORDER: [CrossOriginMode; 3] = [
    CrossOriginMode::Anonymous,
    CrossOriginMode::UseCredentials,
    CrossOriginMode::None,
];

/// Probes a playable URL for its duration in whole seconds
pub struct DurationProbe<S> {
    source: S,
    deadline: Duration,
}

impl<S: MediaMetadataSource> DurationProbe<S> {
    /// Probe over the given metadata source with the standard deadline
    pub fn new(source: S) -> Self {
        Self {
            source,
            deadline: PROBE_DEADLINE,
        }
    }

    /// Override the deadline (tests, embedded targets)
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Determine the duration of the video at `url`
    ///
    /// Resolves with `FALLBACK_DURATION_SECS` when all strategies error
    /// out; fails only when the deadline elapses first. Re-invoking with
    /// the same URL is the caller's retry path.
    pub async fn probe(&self, url: &str) -> Result<u32> {
        match tokio::time::timeout(self.deadline, self.try_strategies(url)).await {
            Ok(secs) => Ok(secs),
            Err(_) => Err(MediaError::ProbeTimeout {
                url: url.to_string(),
                deadline_ms: self.deadline.as_millis() as u64,
            }),
        }
    }

    async fn try_strategies(&self, url: &str) -> u32 {
        for mode in STRATEGY_ORDER {
            match self.source.load_metadata(url, mode).await {
                Ok(meta) => {
                    let secs = round_up_duration(meta.duration_secs);
                    debug!(url, ?mode, raw = meta.duration_secs, secs, "probe succeeded");
                    return secs;
                }
                Err(e) => {
                    debug!(url, ?mode, error = %e, "probe strategy failed, trying next");
                }
            }
        }

        warn!(url, fallback = FALLBACK_DURATION_SECS, "all probe strategies exhausted");
        FALLBACK_DURATION_SECS
    }
}

/// Whole-second duration from a raw float duration
///
/// Rounds to the nearest tenth of a second first, then takes the ceiling,
/// so 7.46 becomes round(74.6)/10 = 7.5 and then 8. Floored at 1; NaN and
/// negatives collapse to 1.
pub(crate) fn round_up_duration(raw: f64) -> u32 {
    let precise = ((raw * 10.0).round() / 10.0).ceil();
    if precise.is_finite() && precise >= 1.0 {
        precise as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{CoreError, MediaMetadata};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ScriptedSource {
        // One entry per strategy attempt, in order
        results: Vec<std::result::Result<f64, ()>>,
        calls: Arc<AtomicUsize>,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl MediaMetadataSource for ScriptedSource {
        async fn load_metadata(
            &self,
            _url: &str,
            _mode: CrossOriginMode,
        ) -> marquee_core::Result<MediaMetadata> {
            let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match self.results.get(attempt) {
                Some(Ok(duration_secs)) => Ok(MediaMetadata {
                    duration_secs: *duration_secs,
                    width: 1920,
                    height: 1080,
                }),
                _ => Err(CoreError::media("load error")),
            }
        }
    }

    fn probe_with(results: Vec<std::result::Result<f64, ()>>) -> (DurationProbe<ScriptedSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = ScriptedSource {
            results,
            calls: calls.clone(),
            delay: Duration::ZERO,
        };
        (DurationProbe::new(source), calls)
    }

    #[test]
    fn rounding_rule_worked_example() {
        // 7.46 -> round(74.6)/10 = 7.5 -> ceil = 8
        assert_eq!(round_up_duration(7.46), 8);
        assert_eq!(round_up_duration(7.0), 7);
        assert_eq!(round_up_duration(7.04), 7);
        assert_eq!(round_up_duration(0.3), 1);
        assert_eq!(round_up_duration(0.0), 1);
        assert_eq!(round_up_duration(-3.0), 1);
        assert_eq!(round_up_duration(f64::NAN), 1);
    }

    #[tokio::test]
    async fn first_strategy_success_stops_the_sequence() {
        let (probe, calls) = probe_with(vec![Ok(7.46)]);
        let secs = probe.probe("https://cdn.example.com/v.mp4").await.unwrap();
        assert_eq!(secs, 8);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn later_strategy_succeeds_after_errors() {
        let (probe, calls) = probe_with(vec![Err(()), Err(()), Ok(42.0)]);
        let secs = probe.probe("https://cdn.example.com/v.mp4").await.unwrap();
        assert_eq!(secs, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_strategies_resolve_with_fallback() {
        let (probe, calls) = probe_with(vec![Err(()), Err(()), Err(())]);
        let secs = probe.probe("https://cdn.example.com/v.mp4").await.unwrap();
        assert_eq!(secs, FALLBACK_DURATION_SECS);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_rejects_instead_of_falling_back() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = ScriptedSource {
            results: vec![Ok(30.0)],
            calls: calls.clone(),
            // Slower than the deadline; paused clock advances instantly
            delay: Duration::from_secs(60),
        };
        let probe = DurationProbe::new(source);

        let err = probe.probe("https://cdn.example.com/v.mp4").await.unwrap_err();
        assert!(matches!(err, MediaError::ProbeTimeout { deadline_ms: 15_000, .. }));
    }
}
