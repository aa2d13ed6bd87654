// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::SimpleRom;

pub type PlatformId = u64;

/// A platform that has been touched by the current scan
/// together with the ROMs found so far.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanningPlatform {
    pub name: String,

    /// Stable identifier, e.g. `"nes"`
    pub slug: String,

    /// Name of the platform directory in the library
    pub fs_slug: String,

    pub id: PlatformId,

    #[cfg_attr(feature = "serde", serde(default))]
    pub roms: Vec<SimpleRom>,
}

impl ScanningPlatform {
    /// A platform without any ROMs.
    #[must_use]
    pub fn new(
        id: PlatformId,
        name: impl Into<String>,
        slug: impl Into<String>,
        fs_slug: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            fs_slug: fs_slug.into(),
            id,
            roms: Vec::new(),
        }
    }
}
