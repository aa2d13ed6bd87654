// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use romscan_core::{PlatformId, ScanStats, ScanningPlatform, SimpleRom, StatsCounter};

use crate::{Observable, ObservableReader, ObservableRef};

pub mod task;
pub use self::task::{ScanOutcome, ScanReporter, ScanTask};

pub mod tasklet;

/// Identifies a single scan, see [`ScanTask`].
///
/// Incremented whenever a scan is started or the state is reset.
pub type ScanGeneration = u64;

/// Status of the current or most recent scan.
///
/// Only modified through [`ObservableState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    scanning: bool,
    scanning_platforms: Vec<ScanningPlatform>,
    scan_stats: ScanStats,
    scan_generation: ScanGeneration,
}

impl State {
    #[must_use]
    pub const fn is_scanning(&self) -> bool {
        self.scanning
    }

    /// Platforms in the order they have been recorded.
    #[must_use]
    pub fn scanning_platforms(&self) -> &[ScanningPlatform] {
        &self.scanning_platforms
    }

    #[must_use]
    pub fn scanning_platform(&self, id: PlatformId) -> Option<&ScanningPlatform> {
        self.scanning_platforms
            .iter()
            .find(|platform| platform.id == id)
    }

    #[must_use]
    pub const fn scan_stats(&self) -> &ScanStats {
        &self.scan_stats
    }

    #[must_use]
    pub const fn scan_generation(&self) -> ScanGeneration {
        self.scan_generation
    }

    /// Idle without any recorded platforms or counters.
    ///
    /// The scan generation is not considered.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        let Self {
            scanning,
            scanning_platforms,
            scan_stats,
            scan_generation: _,
        } = self;
        !scanning && scanning_platforms.is_empty() && scan_stats.is_zero()
    }

    fn set_scanning(&mut self, scanning: bool) -> bool {
        if self.scanning == scanning {
            // Unchanged
            return false;
        }
        log::debug!("Updating scanning: {} -> {scanning}", self.scanning);
        self.scanning = scanning;
        true
    }

    fn reset(&mut self) -> bool {
        if self.is_initial() {
            // No effect
            return false;
        }
        // Detaches a running scan from the state.
        let reset = Self {
            scan_generation: self.scan_generation.wrapping_add(1),
            ..Default::default()
        };
        log::debug!("Resetting state: {self:?} -> {reset:?}");
        *self = reset;
        true
    }

    fn try_start_scan(&mut self) -> Option<ScanGeneration> {
        if self.scanning {
            log::warn!("Illegal state for starting a scan: {self:?}");
            return None;
        }
        // Results of the previous scan are discarded.
        let started = Self {
            scanning: true,
            scan_generation: self.scan_generation.wrapping_add(1),
            ..Default::default()
        };
        log::debug!("Starting scan: {self:?} -> {started:?}");
        *self = started;
        Some(self.scan_generation)
    }

    fn is_scan_generation(&self, scan_generation: ScanGeneration) -> bool {
        if self.scan_generation != scan_generation {
            log::debug!(
                "Discarding update of outdated scan {scan_generation}: current scan is {}",
                self.scan_generation
            );
            return false;
        }
        true
    }

    fn try_finish_scan(&mut self, scan_generation: ScanGeneration) -> bool {
        self.is_scan_generation(scan_generation) && self.set_scanning(false)
    }

    fn record_platform(&mut self, platform: ScanningPlatform) -> bool {
        if self.scanning_platforms.last() == Some(&platform) {
            // Unchanged
            return false;
        }
        let recorded_before = self.scanning_platforms.len();
        self.scanning_platforms
            .retain(|recorded| recorded.id != platform.id);
        if self.scanning_platforms.len() < recorded_before {
            log::debug!("Replacing platform {id}: {platform:?}", id = platform.id);
        } else {
            log::debug!("Recording platform {id}: {platform:?}", id = platform.id);
        }
        self.scanning_platforms.push(platform);
        true
    }

    fn record_rom(&mut self, platform_id: PlatformId, rom: SimpleRom) -> bool {
        let Some(platform) = self
            .scanning_platforms
            .iter_mut()
            .find(|platform| platform.id == platform_id)
        else {
            log::warn!(
                "Discarding ROM {rom_id} of unrecorded platform {platform_id}",
                rom_id = rom.id
            );
            return false;
        };
        log::debug!(
            "Recording ROM {rom_id} of platform {slug}",
            rom_id = rom.id,
            slug = platform.slug
        );
        platform.roms.push(rom);
        true
    }

    fn update_stats(&mut self, scan_stats: ScanStats) -> bool {
        if self.scan_stats == scan_stats {
            // Unchanged
            return false;
        }
        log::debug!("Updating stats: {:?} -> {scan_stats:?}", self.scan_stats);
        self.scan_stats = scan_stats;
        true
    }

    fn increment_stat(&mut self, counter: StatsCounter, delta: usize) -> bool {
        self.scan_stats.increment(counter, delta)
    }
}

pub type StateSubscriber = discro::Subscriber<State>;

pub type ObservableStateRef<'a> = ObservableRef<'a, State>;

/// Manages the mutable, observable state
///
/// Shared as `Arc<ObservableState>` between the scan controller
/// that modifies it and the views that observe it.
#[derive(Debug, Default)]
pub struct ObservableState(Observable<State>);

impl ObservableState {
    #[must_use]
    pub fn new(initial_state: State) -> Self {
        Self(Observable::new(initial_state))
    }

    #[must_use]
    pub fn read(&self) -> ObservableStateRef<'_> {
        self.0.read()
    }

    #[must_use]
    pub fn subscribe_changed(&self) -> StateSubscriber {
        self.0.subscribe_changed()
    }

    /// Overwrite the scanning flag.
    ///
    /// All other fields are preserved. Subscribers are only notified
    /// and `true` is returned if the flag actually changed.
    #[allow(clippy::must_use_candidate)]
    pub fn set(&self, scanning: bool) -> bool {
        self.0.modify(|state| state.set_scanning(scanning))
    }

    /// Restore the initial, idle state.
    ///
    /// Subscribers are only notified and `true` is returned if the
    /// state was not initial before. A running [`ScanTask`] is detached,
    /// i.e. its [`ScanReporter`] no longer has any effect.
    #[allow(clippy::must_use_candidate)]
    pub fn reset(&self) -> bool {
        self.0.modify(State::reset)
    }

    /// Record a platform that is currently scanned.
    ///
    /// A previously recorded platform with the same id is replaced
    /// and the new record moves to the end.
    #[allow(clippy::must_use_candidate)]
    pub fn record_platform(&self, platform: ScanningPlatform) -> bool {
        self.0.modify(|state| state.record_platform(platform))
    }

    /// Append a ROM to a recorded platform.
    ///
    /// ROMs of platforms that have not been recorded are discarded.
    #[allow(clippy::must_use_candidate)]
    pub fn record_rom(&self, platform_id: PlatformId, rom: SimpleRom) -> bool {
        self.0.modify(|state| state.record_rom(platform_id, rom))
    }

    /// Replace all counters.
    #[allow(clippy::must_use_candidate)]
    pub fn update_stats(&self, scan_stats: ScanStats) -> bool {
        self.0.modify(|state| state.update_stats(scan_stats))
    }

    #[allow(clippy::must_use_candidate)]
    pub fn increment_stat(&self, counter: StatsCounter, delta: usize) -> bool {
        self.0.modify(|state| state.increment_stat(counter, delta))
    }

    fn try_start_scan(&self) -> Option<ScanGeneration> {
        let mut scan_generation = None;
        self.0.modify(|state| {
            scan_generation = state.try_start_scan();
            scan_generation.is_some()
        });
        scan_generation
    }

    /// Modify the state on behalf of the scan with the given generation.
    ///
    /// Rejected if another scan has been started or the state has been
    /// reset in the meantime.
    fn modify_scan(
        &self,
        scan_generation: ScanGeneration,
        modify: impl FnOnce(&mut State) -> bool,
    ) -> bool {
        self.0.modify(|state| state.is_scan_generation(scan_generation) && modify(state))
    }

    fn try_finish_scan(&self, scan_generation: ScanGeneration) -> bool {
        self.0
            .modify(|state| state.try_finish_scan(scan_generation))
    }
}

impl ObservableReader<State> for ObservableState {
    fn read_lock(&self) -> ObservableStateRef<'_> {
        self.0.read_lock()
    }
}
