// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    future::Future,
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use discro::{Publisher, Subscriber};

use romscan_core::{PlatformId, ScanStats, ScanningPlatform, SimpleRom, StatsCounter};

use super::{ObservableState, ScanGeneration, State};
use crate::JoinedTask;

pub type ScanResult = anyhow::Result<()>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Finished,
    Failed { error: String },
    Aborted,
}

impl ScanOutcome {
    fn from_joined_task(joined_task: JoinedTask<ScanResult>, abort_requested: bool) -> Self {
        match joined_task {
            JoinedTask::Cancelled => Self::Aborted,
            JoinedTask::Completed(Ok(())) => {
                if abort_requested {
                    Self::Aborted
                } else {
                    Self::Finished
                }
            }
            JoinedTask::Completed(Err(err)) | JoinedTask::Panicked(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Write access to the scan status for a single scan.
///
/// Does not keep the state alive. All operations become no-ops
/// after the state has been dropped, reset or taken over by another
/// scan.
#[derive(Debug, Clone)]
pub struct ScanReporter {
    state: Weak<ObservableState>,
    scan_generation: ScanGeneration,
}

impl ScanReporter {
    #[must_use]
    pub const fn scan_generation(&self) -> ScanGeneration {
        self.scan_generation
    }

    fn modify_scan(&self, modify: impl FnOnce(&mut State) -> bool) -> bool {
        let Some(state) = self.state.upgrade() else {
            log::debug!("Scan status has been dropped");
            return false;
        };
        state.modify_scan(self.scan_generation, modify)
    }

    #[allow(clippy::must_use_candidate)]
    pub fn record_platform(&self, platform: ScanningPlatform) -> bool {
        self.modify_scan(|state| state.record_platform(platform))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn record_rom(&self, platform_id: PlatformId, rom: SimpleRom) -> bool {
        self.modify_scan(|state| state.record_rom(platform_id, rom))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn update_stats(&self, scan_stats: ScanStats) -> bool {
        self.modify_scan(|state| state.update_stats(scan_stats))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn increment_stat(&self, counter: StatsCounter, delta: usize) -> bool {
        self.modify_scan(|state| state.increment_stat(counter, delta))
    }
}

/// A spawned scan that reports into the shared scan status.
#[derive(Debug)]
pub struct ScanTask {
    scan_generation: ScanGeneration,
    started_at: Instant,
    outcome: Subscriber<Option<ScanOutcome>>,
    abort_flag: Arc<AtomicBool>,
    abort_handle: tokio::task::AbortHandle,
}

impl ScanTask {
    /// Start a new scan.
    ///
    /// Results of the previous scan are discarded before `scan_fn` is
    /// invoked. The returned future is spawned on `rt`. Once it has
    /// finished, failed or been aborted, the scanning flag is cleared
    /// while the recorded platforms and counters are retained. The flag
    /// is left untouched if the state has been reset or another scan has
    /// been started in the meantime.
    ///
    /// Returns `None` if a scan is already in progress.
    #[must_use]
    pub fn try_spawn<ScanFn, ScanFuture>(
        rt: &tokio::runtime::Handle,
        state: &Arc<ObservableState>,
        scan_fn: ScanFn,
    ) -> Option<Self>
    where
        ScanFn: FnOnce(ScanReporter, Arc<AtomicBool>) -> ScanFuture,
        ScanFuture: Future<Output = ScanResult> + Send + 'static,
    {
        let scan_generation = state.try_start_scan()?;
        log::info!("Scan {scan_generation} started");
        let started_at = Instant::now();
        let outcome_pub = Publisher::new(None);
        let outcome = outcome_pub.subscribe();
        let abort_flag = Arc::new(AtomicBool::new(false));
        let reporter = ScanReporter {
            state: Arc::downgrade(state),
            scan_generation,
        };
        let task = scan_fn(reporter, Arc::clone(&abort_flag));
        let join_handle = rt.spawn(task);
        let abort_handle = join_handle.abort_handle();
        let state = Arc::clone(state);
        let join_abort_flag = Arc::clone(&abort_flag);
        // The join task is responsible for updating the state eventually and
        // cannot be aborted! It completes after the main task completed.
        let join_task = async move {
            let joined_task = JoinedTask::join(join_handle).await;
            log::debug!("Scan {scan_generation} task joined: {joined_task:?}");
            let outcome = ScanOutcome::from_joined_task(
                joined_task,
                join_abort_flag.load(Ordering::Relaxed),
            );
            log::info!(
                "Scan {scan_generation} stopped after {elapsed:?}: {outcome:?}",
                elapsed = started_at.elapsed()
            );
            state.try_finish_scan(scan_generation);
            outcome_pub.write(Some(outcome));
        };
        rt.spawn(join_task);
        Some(Self {
            scan_generation,
            started_at,
            outcome,
            abort_flag,
            abort_handle,
        })
    }

    #[must_use]
    pub const fn scan_generation(&self) -> ScanGeneration {
        self.scan_generation
    }

    #[must_use]
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    /// The outcome, available after the scanning flag has been cleared.
    #[must_use]
    pub const fn outcome(&self) -> &Subscriber<Option<ScanOutcome>> {
        &self.outcome
    }

    /// Wait until the outcome is available.
    ///
    /// Returns `None` if the runtime has been shut down before the
    /// scan has been joined.
    pub async fn finished(&mut self) -> Option<ScanOutcome> {
        loop {
            if let Some(outcome) = &*self.outcome.read_ack() {
                return Some(outcome.clone());
            }
            if self.outcome.changed().await.is_err() {
                return (*self.outcome.read()).clone();
            }
        }
    }

    /// Checks if the outcome has been published.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.read().is_some()
    }

    pub fn abort(&self) {
        log::info!("Aborting scan {}", self.scan_generation);
        self.abort_flag.store(true, Ordering::Relaxed);
        self.abort_handle.abort();
    }
}
