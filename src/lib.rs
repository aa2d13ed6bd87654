// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Observable status of ROM library scans.
//!
//! The core records are always available. The observable state with
//! its listeners and the scan task driver require the `app-state`
//! feature.

pub use romscan_core::*;

#[cfg(feature = "app-state")]
pub use romscan_app_state as app_state;
