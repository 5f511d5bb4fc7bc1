//! Log Viewer Controller
//!
//! Polling of the newest log page, client-side severity filtering, and the
//! clear-all request issued when the viewer is left.

use std::future::Future;
use std::time::Duration;

use crate::api::LogApi;
use crate::error::ApiResult;
use crate::liveness::Liveness;
use crate::models::{LogEntry, LogLevel};

/// Display filter; never affects what is fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(LogLevel),
}

impl SeverityFilter {
    pub fn value(&self) -> &'static str {
        match self {
            SeverityFilter::All => "ALL",
            SeverityFilter::Only(level) => level.as_str(),
        }
    }

    /// Unknown values fall back to `All`
    pub fn from_value(value: &str) -> Self {
        LogLevel::parse(value)
            .map(SeverityFilter::Only)
            .unwrap_or(SeverityFilter::All)
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(level) => entry.level == *level,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogViewState {
    logs: Vec<LogEntry>,
    loading: bool,
    filter: SeverityFilter,
}

impl Default for LogViewState {
    fn default() -> Self {
        Self {
            logs: Vec::new(),
            loading: true,
            filter: SeverityFilter::All,
        }
    }
}

impl LogViewState {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> SeverityFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: SeverityFilter) {
        self.filter = filter;
    }

    /// Every fetched record, unfiltered
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn visible(&self) -> Vec<LogEntry> {
        self.logs
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .cloned()
            .collect()
    }

    /// Apply one poll. Success replaces the whole list; failure keeps the
    /// previous one. Either way the first tick ends the loading state.
    pub fn finish_tick(&mut self, result: ApiResult<Vec<LogEntry>>) {
        if let Ok(logs) = result {
            self.logs = logs;
        }
        self.loading = false;
    }
}

#[derive(Debug, Clone)]
pub struct LogViewerController<A> {
    api: A,
    interval: Duration,
}

impl<A: LogApi> LogViewerController<A> {
    pub fn new(api: A, interval: Duration) -> Self {
        Self { api, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll until `alive` is cancelled. The first fetch happens immediately
    /// and each later one starts `interval` after the previous answer, so
    /// the period is the interval plus the fetch latency and requests never
    /// overlap. Results arriving after cancellation are dropped. No retry or
    /// backoff: a failed tick just waits for the next one.
    ///
    /// Returns the number of ticks delivered.
    pub async fn run<S, Fut, F>(&self, alive: &Liveness, mut sleep: S, mut on_tick: F) -> usize
    where
        S: FnMut(Duration) -> Fut,
        Fut: Future<Output = ()>,
        F: FnMut(ApiResult<Vec<LogEntry>>),
    {
        let mut ticks = 0;
        while alive.is_alive() {
            let result = self.api.list_logs().await;
            if !alive.is_alive() {
                break;
            }
            if let Err(err) = &result {
                log::warn!("log poll failed: {}", err);
            }
            on_tick(result);
            ticks += 1;
            sleep(self.interval).await;
        }
        log::debug!("log poller stopped after {} ticks", ticks);
        ticks
    }

    /// Destructive clear issued when the viewer is left. Failure is logged
    /// and otherwise ignored.
    pub async fn clear_on_leave(&self) {
        if let Err(err) = self.api.clear_logs().await {
            log::warn!("failed to clear logs on leave: {}", err);
        }
    }
}
