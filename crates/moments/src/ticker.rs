//! Fixed-period render loop.
//!
//! A [`Ticker`] recomputes a widget's frame from the current wall clock once
//! per period and hands it to a [`Surface`]. The computation is pure; the
//! ticker owns the only side effect.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::widget::{Widget, WidgetFrame};

/// Render sink for ticker output.
pub trait Surface: Send + Sync {
    fn render(&self, widget_id: &str, frame: WidgetFrame);
}

/// Drives one widget at a fixed period until cancelled.
///
/// Tickers normally live for the process lifetime; cancellation exists for
/// graceful shutdown and tests.
pub struct Ticker {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a 1-second ticker, the period every page widget uses.
    pub fn spawn(widget: Arc<dyn Widget>, surface: Arc<dyn Surface>) -> Self {
        Self::spawn_with_period(widget, surface, Duration::from_secs(1))
    }

    pub fn spawn_with_period(
        widget: Arc<dyn Widget>,
        surface: Arc<dyn Surface>,
        period: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // A suspended tick must not be replayed in a burst: every frame
            // is derived from the wall clock, so skipping is lossless.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let frame = widget.frame(Utc::now());
                        surface.render(widget.id(), frame);
                    }
                }
            }

            debug!(widget = %widget.id(), "ticker stopped");
        });

        Self { cancel, handle }
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel the loop and wait for the task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use parking_lot::Mutex;

    struct FixedWidget;

    impl Widget for FixedWidget {
        fn id(&self) -> &str {
            "fixed"
        }

        fn frame(&self, _now: DateTime<Utc>) -> WidgetFrame {
            WidgetFrame::Waiting
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        frames: Mutex<Vec<(String, WidgetFrame)>>,
    }

    impl Surface for RecordingSurface {
        fn render(&self, widget_id: &str, frame: WidgetFrame) {
            self.frames.lock().push((widget_id.to_string(), frame));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_renders_once_per_period() {
        let surface = Arc::new(RecordingSurface::default());
        let ticker = Ticker::spawn_with_period(
            Arc::new(FixedWidget),
            surface.clone(),
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        ticker.shutdown().await;

        // First tick fires immediately, then once per second.
        let frames = surface.frames.lock();
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|(id, _)| id == "fixed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_ticker_stops_rendering() {
        let surface = Arc::new(RecordingSurface::default());
        let ticker = Ticker::spawn_with_period(
            Arc::new(FixedWidget),
            surface.clone(),
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        ticker.shutdown().await;
        let rendered = surface.frames.lock().len();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(surface.frames.lock().len(), rendered);
    }
}
