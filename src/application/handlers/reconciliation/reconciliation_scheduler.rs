//! ReconciliationScheduler - Periodic, single-flight reconciliation.
//!
//! Runs the engine on a fixed interval until shutdown is signalled.
//! `run_now` shares a lock with the loop so a manual pass never overlaps
//! a scheduled one.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `sync.interval_secs` | 3600 | Time between passes |

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use super::reconciliation_engine::{ReconcileError, ReconcileSummary, ReconciliationEngine};

pub struct ReconciliationScheduler {
    engine: Arc<ReconciliationEngine>,
    interval: Duration,
    in_flight: Mutex<()>,
}

impl ReconciliationScheduler {
    pub fn new(engine: Arc<ReconciliationEngine>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            in_flight: Mutex::new(()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one pass, waiting for any pass already in flight to finish.
    pub async fn run_now(&self) -> Result<ReconcileSummary, ReconcileError> {
        let _guard = self.in_flight.lock().await;
        self.engine.run_once().await
    }

    /// Runs passes on the interval until `shutdown` turns true.
    ///
    /// The first pass starts immediately. Failures are logged and the loop
    /// carries on; the next tick is the retry.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval_secs = self.interval.as_secs(), "reconciliation scheduler started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("reconciliation scheduler stopping");
                        return;
                    }
                }

                _ = ticker.tick() => {
                    match self.run_now().await {
                        Ok(summary) if summary.is_noop() => {}
                        Ok(summary) => info!(
                            updated = summary.updated,
                            added = summary.added,
                            disabled = summary.disabled,
                            "scheduled reconciliation applied changes"
                        ),
                        Err(e) => error!(error = %e, "scheduled reconciliation failed"),
                    }
                }
            }
        }
    }
}
