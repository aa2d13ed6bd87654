// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::future::Future;

use romscan_core::ScanStats;

use super::{State, StateSubscriber};

fn on_value_changed<T>(
    mut subscriber: StateSubscriber,
    name: &'static str,
    select_value: impl Fn(&State) -> T + Send + 'static,
    mut on_changed: impl FnMut(&T) -> bool + Send + 'static,
) -> impl Future<Output = ()> + Send + 'static
where
    T: PartialEq + Send + 'static,
{
    // Read the initial value immediately before spawning the async task
    let mut value = select_value(&*subscriber.read_ack());
    async move {
        log::debug!("Starting {name}");
        // Enforce initial update
        let mut value_changed = true;
        loop {
            if value_changed && !on_changed(&value) {
                // Consumer has rejected the notification
                log::debug!("Aborting {name}");
                return;
            }
            value_changed = false;
            if subscriber.changed().await.is_err() {
                // Publisher has disappeared
                log::debug!("Aborting {name}");
                break;
            }
            let new_value = select_value(&*subscriber.read_ack());
            if value != new_value {
                value = new_value;
                value_changed = true;
            }
        }
        log::debug!("Stopping {name}");
    }
}

/// Listen for changes of [`State::is_scanning()`].
///
/// The `on_changed` callback closure is invoked with the current value
/// first. It must return `true` to continue listening and `false` to
/// abort listening.
pub fn on_scanning_changed(
    subscriber: StateSubscriber,
    mut on_changed: impl FnMut(bool) -> bool + Send + 'static,
) -> impl Future<Output = ()> + Send + 'static {
    on_value_changed(
        subscriber,
        "on_scanning_changed",
        State::is_scanning,
        move |scanning| on_changed(*scanning),
    )
}

/// Listen for changes of [`State::scan_stats()`].
///
/// Same protocol as [`on_scanning_changed()`].
pub fn on_stats_changed(
    subscriber: StateSubscriber,
    on_changed: impl FnMut(&ScanStats) -> bool + Send + 'static,
) -> impl Future<Output = ()> + Send + 'static {
    on_value_changed(
        subscriber,
        "on_stats_changed",
        |state| *state.scan_stats(),
        on_changed,
    )
}
