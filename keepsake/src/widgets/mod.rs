//! Widget hub.
//!
//! Builds the page widgets from the compiled-in anchors, spawns one ticker
//! per live widget, and fans the 1-second frames out to subscribers over a
//! broadcast channel (consumed by the WebSocket route).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use moments::anchor::parse_calendar_date;
use moments::{
    AgeBreakdown, CountdownWidget, ElapsedWidget, Surface, Ticker, Widget, WidgetFrame,
};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::error;

use crate::config::{self, widget_ids};

/// Broadcast capacity for frame events.
const FRAME_BROADCAST_CAPACITY: usize = 64;

/// One widget's frame, stamped with its id for fan-out.
#[derive(Debug, Clone, Serialize)]
pub struct FrameEvent {
    pub widget: String,
    pub frame: WidgetFrame,
}

/// Every widget's state at one instant, for the page's initial render.
#[derive(Debug, Serialize)]
pub struct MomentsSnapshot {
    pub timers: BTreeMap<String, WidgetFrame>,
    pub ages: BTreeMap<String, AgeBreakdown>,
}

pub struct WidgetHub {
    live: Vec<Arc<dyn Widget>>,
    /// Widgets whose anchor failed to parse: a fixed frame, no ticker.
    frozen: Vec<(String, WidgetFrame)>,
    ages: Vec<(String, NaiveDate)>,
    frame_tx: broadcast::Sender<FrameEvent>,
    tickers: Mutex<Vec<Ticker>>,
}

impl WidgetHub {
    pub fn empty() -> Self {
        let (frame_tx, _) = broadcast::channel(FRAME_BROADCAST_CAPACITY);
        Self {
            live: Vec::new(),
            frozen: Vec::new(),
            ages: Vec::new(),
            frame_tx,
            tickers: Mutex::new(Vec::new()),
        }
    }

    /// Build the page's widgets from the compiled-in anchors.
    pub fn from_page_anchors(now: DateTime<Utc>) -> Self {
        let mut hub = Self::empty();
        hub.add_elapsed(widget_ids::TIMER_FIRST_MESSAGE, config::FIRST_MESSAGE_ANCHOR);
        hub.add_elapsed(widget_ids::TIMER_OFFICIAL, config::OFFICIAL_ANCHOR);
        hub.add_birthday(
            widget_ids::YOUR_AGE,
            widget_ids::YOUR_BIRTHDAY_COUNTDOWN,
            config::YOUR_BIRTH_DATE,
            now,
        );
        hub.add_birthday(
            widget_ids::HER_AGE,
            widget_ids::HER_BIRTHDAY_COUNTDOWN,
            config::HER_BIRTH_DATE,
            now,
        );
        hub
    }

    /// Register an elapsed-time widget. An unparseable anchor disables only
    /// this widget: it renders a fixed invalid frame and no ticker runs.
    pub fn add_elapsed(&mut self, id: &str, anchor: &str) {
        match ElapsedWidget::new(id, anchor) {
            Ok(widget) => self.live.push(Arc::new(widget)),
            Err(err) => {
                error!(widget = id, error = %err, "invalid timer anchor; widget disabled");
                self.frozen.push((id.to_string(), WidgetFrame::Invalid));
            }
        }
    }

    /// Register an age display and its birthday countdown.
    pub fn add_birthday(
        &mut self,
        age_id: &str,
        countdown_id: &str,
        birth_date: &str,
        now: DateTime<Utc>,
    ) {
        match parse_calendar_date(birth_date) {
            Ok(birth) => {
                self.ages.push((age_id.to_string(), birth));
                self.live
                    .push(Arc::new(CountdownWidget::new(countdown_id, birth, now)));
            }
            Err(err) => {
                error!(widget = countdown_id, error = %err, "invalid birth date; widget disabled");
                self.frozen
                    .push((age_id.to_string(), WidgetFrame::Invalid));
                self.frozen
                    .push((countdown_id.to_string(), WidgetFrame::Invalid));
            }
        }
    }

    /// Spawn one 1-second ticker per live widget, feeding the broadcast.
    pub fn start(self: &Arc<Self>) {
        let mut tickers = self.tickers.lock();
        for widget in &self.live {
            let surface: Arc<dyn Surface> = self.clone();
            tickers.push(Ticker::spawn(widget.clone(), surface));
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FrameEvent> {
        self.frame_tx.subscribe()
    }

    /// Compute every widget's current state from the same pure functions the
    /// tickers use.
    pub fn snapshot(&self, now: DateTime<Utc>) -> MomentsSnapshot {
        let mut timers = BTreeMap::new();
        for widget in &self.live {
            timers.insert(widget.id().to_string(), widget.frame(now));
        }
        for (id, frame) in &self.frozen {
            timers.insert(id.clone(), *frame);
        }

        let today = now.date_naive();
        let ages = self
            .ages
            .iter()
            .map(|(id, birth)| (id.clone(), AgeBreakdown::at(*birth, today)))
            .collect();

        MomentsSnapshot { timers, ages }
    }

    /// Cancel every ticker and wait for the tasks to finish.
    pub async fn shutdown(&self) {
        let drained: Vec<Ticker> = {
            let mut tickers = self.tickers.lock();
            tickers.drain(..).collect()
        };
        for ticker in drained {
            ticker.shutdown().await;
        }
    }
}

impl Surface for WidgetHub {
    fn render(&self, widget_id: &str, frame: WidgetFrame) {
        // Send errors only mean there is no subscriber right now.
        let _ = self.frame_tx.send(FrameEvent {
            widget: widget_id.to_string(),
            frame,
        });
    }
}
