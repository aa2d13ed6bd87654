// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub type RomId = u64;

/// Summary of a single ROM
///
/// Supplied by the backend while scanning. The scan status only stores
/// and relays these records without interpreting them. The owning
/// platform is determined by where the record is filed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleRom {
    pub id: RomId,

    pub name: String,

    /// File name in the library directory of the platform.
    pub fs_name: String,
}
