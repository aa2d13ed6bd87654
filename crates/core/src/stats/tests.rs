// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use strum::IntoEnumIterator as _;

use super::*;

#[test]
fn default_is_zero() {
    let stats = ScanStats::default();
    assert!(stats.is_zero());
    for counter in StatsCounter::iter() {
        assert_eq!(0, stats.get(counter));
    }
}

#[test]
fn increment_touches_only_the_given_counter() {
    for counter in StatsCounter::iter() {
        let mut stats = ScanStats::default();
        assert!(stats.increment(counter, 3));
        assert!(!stats.is_zero());
        for other in StatsCounter::iter() {
            let expected = if other == counter { 3 } else { 0 };
            assert_eq!(expected, stats.get(other));
        }
    }
}

#[test]
fn increment_by_zero_is_no_modification() {
    let mut stats = ScanStats::default();
    assert!(!stats.increment(StatsCounter::AddedRoms, 0));
    assert!(stats.is_zero());
}

#[test]
fn increment_saturates() {
    let mut stats = ScanStats {
        scanned_roms: usize::MAX - 1,
        ..Default::default()
    };
    assert!(stats.increment(StatsCounter::ScannedRoms, 5));
    assert_eq!(usize::MAX, stats.scanned_roms);
    assert!(!stats.increment(StatsCounter::ScannedRoms, 1));
    assert_eq!(usize::MAX, stats.scanned_roms);
}

#[test]
fn counter_names() {
    assert_eq!("scanned_platforms", StatsCounter::ScannedPlatforms.to_string());
    assert_eq!(
        "metadata_roms",
        <&'static str>::from(StatsCounter::MetadataRoms)
    );
}

#[test]
fn deserialize_stats_from_backend_payload() {
    let stats: ScanStats = serde_json::from_str(
        r#"{
            "scanned_platforms": 2,
            "added_platforms": 1,
            "metadata_platforms": 1,
            "scanned_roms": 42,
            "added_roms": 7,
            "metadata_roms": 5
        }"#,
    )
    .unwrap();
    assert_eq!(
        ScanStats {
            scanned_platforms: 2,
            added_platforms: 1,
            metadata_platforms: 1,
            scanned_roms: 42,
            added_roms: 7,
            metadata_roms: 5,
        },
        stats
    );
}

#[test]
fn deserialize_stats_with_missing_counters() {
    let stats: ScanStats = serde_json::from_str(r#"{"scanned_roms": 1}"#).unwrap();
    assert_eq!(1, stats.scanned_roms);
    assert_eq!(0, stats.added_roms);
}

#[test]
fn deserialize_platform_without_roms() {
    let platform: crate::ScanningPlatform = serde_json::from_str(
        r#"{"name": "Nintendo Entertainment System", "slug": "nes", "fs_slug": "nes", "id": 1}"#,
    )
    .unwrap();
    assert_eq!(
        crate::ScanningPlatform::new(1, "Nintendo Entertainment System", "nes", "nes"),
        platform
    );
}

#[test]
fn deserialize_rom_ignores_unknown_fields() {
    let rom: crate::SimpleRom = serde_json::from_str(
        r#"{"id": 10, "name": "Super Mario Bros.", "fs_name": "smb.zip", "platform_id": 1}"#,
    )
    .unwrap();
    assert_eq!(
        crate::SimpleRom {
            id: 10,
            name: "Super Mario Bros.".to_owned(),
            fs_name: "smb.zip".to_owned(),
        },
        rom
    );
}
