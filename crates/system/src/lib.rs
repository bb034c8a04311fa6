pub mod alert;
pub mod battery;
pub mod estimate;
pub mod tier;

pub use alert::{AlertPhase, AlertState};
pub use battery::{BatterySource, SysfsSource};
pub use estimate::estimate;
pub use tier::tier_for;

use batmon_core::{Alert, BatteryReport, PollSettings, Result};
use chrono::Local;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Reader → estimator → {tier mapper, alert controller}, plus the only state
/// that survives between cycles: the alert controller and the last report.
pub struct Pipeline<S> {
    source:   S,
    settings: PollSettings,
    alert:    AlertState,
    last:     Option<BatteryReport>,
}

impl<S: BatterySource> Pipeline<S> {
    pub fn new(source: S, settings: PollSettings) -> Self {
        let alert = AlertState::new(settings.warning_percent);
        Self { source, settings, alert, last: None }
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    pub fn alert_phase(&self) -> AlertPhase {
        self.alert.phase()
    }

    /// Most recent successfully produced report.
    pub fn last_report(&self) -> Option<&BatteryReport> {
        self.last.as_ref()
    }

    /// Swap in new settings. Any actual change re-arms the alert controller.
    /// Returns `false` if `settings` equals the current ones.
    pub fn reconfigure(&mut self, settings: PollSettings) -> bool {
        if settings == self.settings {
            return false;
        }
        self.alert.rearm(settings.warning_percent);
        self.settings = settings;
        true
    }

    /// Run one cycle.
    ///
    /// On a sensor failure the error is returned and the last report is kept
    /// untouched.
    pub fn poll(&mut self) -> Result<(BatteryReport, Option<Alert>)> {
        let index    = self.settings.battery_index;
        let snapshot = self.source.read(index)?;
        let status   = estimate(&snapshot);
        let alert    = self.alert.evaluate(&status, index, &self.settings.warning_text);

        let report = BatteryReport {
            battery_index:   index,
            status,
            tier:            status.percentage().map(tier_for),
            warning_percent: self.settings.warning_percent,
            sampled_at:      Local::now(),
        };
        self.last = Some(report.clone());
        Ok((report, alert))
    }
}

/// Handle to a running monitor task.
///
/// Dropping the handle stops the task at its next wake-up.
pub struct MonitorHandle {
    /// Latest published report; `None` until the first successful poll.
    pub reports: watch::Receiver<Option<BatteryReport>>,
    /// Low-battery alerts, at most one per episode.
    pub alerts:  mpsc::Receiver<Alert>,
    settings:    watch::Sender<PollSettings>,
    shutdown:    Option<oneshot::Sender<()>>,
    task:        JoinHandle<()>,
}

impl MonitorHandle {
    /// Queue new settings; they take effect between two poll cycles.
    pub fn reconfigure(&self, settings: PollSettings) {
        self.settings.send_replace(settings);
    }

    /// Stop scheduling polls and wait for the task to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.task).await;
    }
}

/// Spawn a background Tokio task that polls `source` every
/// `settings.interval` and publishes each [`BatteryReport`] through the
/// returned handle.
///
/// Sensor failures are logged and retried on the next regular tick; the
/// previously published report stays visible meanwhile.
pub fn spawn_monitor<S>(source: S, settings: PollSettings) -> MonitorHandle
where
    S: BatterySource + Send + 'static,
{
    let (reports_tx, reports_rx)   = watch::channel(None);
    let (alerts_tx, alerts_rx)     = mpsc::channel(8);
    let (settings_tx, settings_rx) = watch::channel(settings.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let pipeline = Pipeline::new(source, settings);
    let task = tokio::spawn(run(pipeline, settings_rx, reports_tx, alerts_tx, shutdown_rx));

    MonitorHandle {
        reports:  reports_rx,
        alerts:   alerts_rx,
        settings: settings_tx,
        shutdown: Some(shutdown_tx),
        task,
    }
}

/// Shortest period the scheduler will tick at; `interval` panics on zero.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval(period.max(MIN_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn run<S: BatterySource>(
    mut pipeline: Pipeline<S>,
    mut settings: watch::Receiver<PollSettings>,
    reports: watch::Sender<Option<BatteryReport>>,
    alerts: mpsc::Sender<Alert>,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!(
        "Monitoring battery {} every {:?}",
        pipeline.settings().battery_index,
        pipeline.settings().interval
    );
    let mut ticker = new_ticker(pipeline.settings().interval);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = settings.changed() => {
                if changed.is_err() {
                    break; // handle dropped
                }
                let next = settings.borrow_and_update().clone();
                if pipeline.reconfigure(next) {
                    let s = pipeline.settings();
                    info!(
                        "Reconfigured: battery {}, every {:?}, warn at {}%",
                        s.battery_index, s.interval, s.warning_percent
                    );
                    // A fresh interval ticks immediately, so the new settings
                    // are reflected without waiting a whole period.
                    ticker = new_ticker(s.interval);
                }
            }
            _ = ticker.tick() => {
                if reports.is_closed() {
                    break; // all receivers dropped
                }
                match pipeline.poll() {
                    Ok((report, alert)) => {
                        debug!(
                            "Battery {}: {:?} ({:?})",
                            report.battery_index, report.status, report.tier
                        );
                        reports.send_replace(Some(report));
                        if let Some(alert) = alert {
                            warn!("Battery {} at {}%: {}", alert.battery_index, alert.percentage, alert.message);
                            // Never block the poll loop on a consumer that stopped reading.
                            match alerts.try_send(alert) {
                                Ok(()) => {}
                                Err(mpsc::error::TrySendError::Full(alert)) => {
                                    debug!("Alert queue full, dropping: {}", alert.message);
                                }
                                Err(mpsc::error::TrySendError::Closed(_)) => {
                                    debug!("Alert receiver dropped");
                                }
                            }
                        }
                    }
                    Err(e) if e.is_transient() => {
                        warn!("Battery read failed, keeping last status: {e}");
                    }
                    Err(e) => error!("Battery poll failed, keeping last status: {e}"),
                }
            }
        }
    }

    info!("Battery monitor stopped");
}
