#![forbid(unsafe_code)]

//! Statistics panel controller.

use core::fmt;
use core::time::Duration;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::schedule::{DeterministicClock, RefreshTask};
use crate::stats::{StatsSnapshot, StatsView};

/// Button label while a manual refresh is running.
pub const REFRESHING_LABEL: &str = "Actualizando...";
/// Button label right after a manual refresh finished.
pub const REFRESHED_LABEL: &str = "Actualizado";

/// What triggered a statistics fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Mount,
    Timer,
    Manual,
}

impl fmt::Display for FetchOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mount => "mount",
            Self::Timer => "timer",
            Self::Manual => "manual",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatsMsg {
    /// A fetch started by [`StatsEffect::Fetch`] finished.
    Refreshed {
        origin: FetchOrigin,
        result: Result<StatsSnapshot, ClientError>,
    },
    /// The refresh button was pressed; `button_label` is its current text.
    ManualRefresh { button_label: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatsEffect {
    /// `GET` the endpoint and answer with [`StatsMsg::Refreshed`].
    Fetch {
        endpoint: String,
        origin: FetchOrigin,
    },
    /// Replace counters and the bar visualization.
    Render(StatsView),
    SetRefreshButton { label: String, disabled: bool },
    After {
        delay: Duration,
        effect: Box<StatsEffect>,
    },
}

/// State of the statistics panel.
#[derive(Debug, Clone)]
pub struct StatsPanel {
    config: ClientConfig,
    clock: DeterministicClock,
    task: RefreshTask,
    /// Original button label while a manual refresh is pending.
    manual_label: Option<String>,
    last_view: Option<StatsView>,
    failures: u64,
}

impl StatsPanel {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        let task = RefreshTask::new(config.stats_refresh_interval());
        Self {
            config,
            clock: DeterministicClock::new(),
            task,
            manual_label: None,
            last_view: None,
            failures: 0,
        }
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.task.is_running()
    }

    /// Last successfully rendered view, which stays on screen after failures.
    #[must_use]
    pub fn last_view(&self) -> Option<&StatsView> {
        self.last_view.as_ref()
    }

    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    /// Whether a manual refresh is waiting for its fetch to settle.
    #[must_use]
    pub const fn manual_refresh_pending(&self) -> bool {
        self.manual_label.is_some()
    }

    /// Time until the next scheduled refresh, if mounted.
    #[must_use]
    pub fn until_next_refresh(&self) -> Option<Duration> {
        self.task.until_next(self.clock.now())
    }

    /// Start periodic refreshing and fetch immediately.
    pub fn mount(&mut self) -> Vec<StatsEffect> {
        if !self.task.start(self.clock.now()) {
            return Vec::new();
        }
        tracing::info!(
            interval_ms = self.config.stats_refresh_interval_ms,
            "statistics panel mounted"
        );
        vec![self.fetch(FetchOrigin::Mount)]
    }

    /// Stop periodic refreshing. In-flight fetches still settle normally.
    pub fn unmount(&mut self) {
        if self.task.is_running() {
            tracing::info!(fired = self.task.fired(), "statistics panel unmounted");
        }
        self.task.stop();
    }

    /// Advance the host clock by `dt` and fetch if the interval elapsed.
    pub fn advance_time(&mut self, dt: Duration) -> Vec<StatsEffect> {
        self.clock.advance(dt);
        self.poll()
    }

    /// Set the host clock to `now` and fetch if the interval elapsed.
    pub fn set_time(&mut self, now: Duration) -> Vec<StatsEffect> {
        self.clock.set(now);
        self.poll()
    }

    fn poll(&mut self) -> Vec<StatsEffect> {
        if self.task.poll(self.clock.now()) {
            vec![self.fetch(FetchOrigin::Timer)]
        } else {
            Vec::new()
        }
    }

    fn fetch(&self, origin: FetchOrigin) -> StatsEffect {
        StatsEffect::Fetch {
            endpoint: self.config.stats_endpoint.clone(),
            origin,
        }
    }

    pub fn update(&mut self, msg: StatsMsg) -> Vec<StatsEffect> {
        match msg {
            StatsMsg::ManualRefresh { button_label } => {
                if self.manual_label.is_some() {
                    return Vec::new();
                }
                self.manual_label = Some(button_label);
                vec![
                    StatsEffect::SetRefreshButton {
                        label: REFRESHING_LABEL.into(),
                        disabled: true,
                    },
                    self.fetch(FetchOrigin::Manual),
                ]
            }
            StatsMsg::Refreshed { origin, result } => {
                let mut effects = Vec::new();
                match result {
                    Ok(snapshot) => {
                        let view = StatsView::from_snapshot(&snapshot);
                        self.last_view = Some(view.clone());
                        effects.push(StatsEffect::Render(view));
                    }
                    Err(err) => {
                        self.failures += 1;
                        tracing::warn!(%origin, error = %err, "error loading statistics");
                    }
                }
                if origin == FetchOrigin::Manual {
                    if let Some(original) = self.manual_label.take() {
                        effects.push(StatsEffect::SetRefreshButton {
                            label: REFRESHED_LABEL.into(),
                            disabled: false,
                        });
                        effects.push(StatsEffect::After {
                            delay: self.config.refresh_feedback(),
                            effect: Box::new(StatsEffect::SetRefreshButton {
                                label: original,
                                disabled: false,
                            }),
                        });
                    }
                }
                effects
            }
        }
    }
}
