// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Records that describe the progress of a ROM library scan.

pub mod platform;
pub use self::platform::{PlatformId, ScanningPlatform};

pub mod rom;
pub use self::rom::{RomId, SimpleRom};

pub mod stats;
pub use self::stats::{ScanStats, StatsCounter};
