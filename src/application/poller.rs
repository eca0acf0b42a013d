use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::application::WeatherService;
use crate::domain::FetchKind;

/// Handle to a running poller; dropping it leaves the task running.
pub struct PollerHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PollerHandle {
    /// Cooperative shutdown: signals the loop and waits for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

/// Spawn a periodic fetch cycle for one feed.
///
/// Runs one cycle immediately, then on the fixed period. The cycle is
/// awaited inside the loop, so cycles never overlap; a delayed cycle delays
/// the next tick rather than stacking up. Failures are logged and skipped —
/// the schedule itself is the retry mechanism.
pub fn spawn(service: Arc<WeatherService>, kind: FetchKind, period: Duration) -> PollerHandle {
    let (shutdown, mut stopped) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = service.poll_once(kind).await {
                        warn!(kind = kind.as_str(), "fetch cycle failed: {}", e);
                    }
                }
                _ = stopped.changed() => {
                    info!(kind = kind.as_str(), "poller stopping");
                    break;
                }
            }
        }
    });

    PollerHandle { shutdown, handle }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use crate::application::service::tests::{service_with, FixedSource};

    #[tokio::test]
    async fn test_first_cycle_runs_immediately() {
        let source = Arc::new(FixedSource::new());
        let service = Arc::new(service_with(source.clone(), None));

        let poller = spawn(service.clone(), FetchKind::Forecast, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_millis(50)).await;
        poller.stop().await;

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(service.latest_forecast().is_some());
    }

    #[tokio::test]
    async fn test_cycles_repeat_on_the_period() {
        let source = Arc::new(FixedSource::new());
        let service = Arc::new(service_with(source.clone(), None));

        let poller = spawn(service, FetchKind::Observation, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(90)).await;
        poller.stop().await;

        assert!(source.fetches.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_failed_cycles_are_skipped_not_fatal() {
        let source = Arc::new(FixedSource::failing());
        let service = Arc::new(service_with(source.clone(), None));

        let poller = spawn(service.clone(), FetchKind::Forecast, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(90)).await;
        poller.stop().await;

        // kept polling despite failures, nothing cached
        assert!(source.fetches.load(Ordering::SeqCst) >= 2);
        assert!(service.latest_forecast().is_none());
    }

    #[tokio::test]
    async fn test_stop_halts_the_loop() {
        let source = Arc::new(FixedSource::new());
        let service = Arc::new(service_with(source.clone(), None));

        let poller = spawn(service, FetchKind::Forecast, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(30)).await;
        poller.stop().await;

        let after_stop = source.fetches.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), after_stop);
    }
}
