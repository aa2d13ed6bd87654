// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Names of the individual [`ScanStats`] counters.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum StatsCounter {
    ScannedPlatforms,
    AddedPlatforms,
    MetadataPlatforms,
    ScannedRoms,
    AddedRoms,
    MetadataRoms,
}

/// Aggregate counters of a scan.
///
/// The counters are independent of each other. Any relationship
/// between them, e.g. added <= scanned, is up to whoever updates
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanStats {
    pub scanned_platforms: usize,
    pub added_platforms: usize,
    pub metadata_platforms: usize,
    pub scanned_roms: usize,
    pub added_roms: usize,
    pub metadata_roms: usize,
}

impl ScanStats {
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    #[must_use]
    pub const fn get(&self, counter: StatsCounter) -> usize {
        match counter {
            StatsCounter::ScannedPlatforms => self.scanned_platforms,
            StatsCounter::AddedPlatforms => self.added_platforms,
            StatsCounter::MetadataPlatforms => self.metadata_platforms,
            StatsCounter::ScannedRoms => self.scanned_roms,
            StatsCounter::AddedRoms => self.added_roms,
            StatsCounter::MetadataRoms => self.metadata_roms,
        }
    }

    fn get_mut(&mut self, counter: StatsCounter) -> &mut usize {
        match counter {
            StatsCounter::ScannedPlatforms => &mut self.scanned_platforms,
            StatsCounter::AddedPlatforms => &mut self.added_platforms,
            StatsCounter::MetadataPlatforms => &mut self.metadata_platforms,
            StatsCounter::ScannedRoms => &mut self.scanned_roms,
            StatsCounter::AddedRoms => &mut self.added_roms,
            StatsCounter::MetadataRoms => &mut self.metadata_roms,
        }
    }

    /// Increment a single counter.
    ///
    /// Saturates at [`usize::MAX`]. Returns `true` if the counter
    /// has been modified.
    pub fn increment(&mut self, counter: StatsCounter, delta: usize) -> bool {
        let value = self.get_mut(counter);
        let Some(incremented) = value.checked_add(delta) else {
            log::warn!("Counter {counter} saturated: {value} + {delta}");
            if *value == usize::MAX {
                return false;
            }
            *value = usize::MAX;
            return true;
        };
        if incremented == *value {
            // Unchanged
            return false;
        }
        *value = incremented;
        true
    }
}

#[cfg(test)]
mod tests;
