/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::types::MEntry;

/// Partitions a site's entries into calendar-day groups, newest day
/// first, entries within a day newest first. Pure and deterministic:
/// any permutation of the input produces the same output.
pub fn group_entries_by_day(entries: Vec<MEntry>) -> Vec<(NaiveDate, Vec<MEntry>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<MEntry>> = BTreeMap::new();

    for entry in entries {
        groups.entry(entry.created_at.date()).or_default().push(entry);
    }

    groups
        .into_iter()
        .rev()
        .map(|(date, mut entries)| {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            (date, entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use entity::entry::EntryType;
    use uuid::Uuid;

    fn entry_at(timestamp: &str) -> MEntry {
        MEntry {
            id: Uuid::new_v4(),
            site: Uuid::new_v4(),
            entry_type: EntryType::General,
            note: String::new(),
            created_by: Uuid::new_v4(),
            created_at: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M").unwrap(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn groups_by_day_newest_first() {
        let a = entry_at("2024-01-05T10:00");
        let b = entry_at("2024-01-05T09:00");
        let c = entry_at("2024-01-06T08:00");

        let groups = group_entries_by_day(vec![a.clone(), b.clone(), c.clone()]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, date("2024-01-06"));
        assert_eq!(groups[0].1, vec![c]);
        assert_eq!(groups[1].0, date("2024-01-05"));
        assert_eq!(groups[1].1, vec![a, b]);
    }

    #[test]
    fn grouping_is_order_independent() {
        let entries = vec![
            entry_at("2024-01-05T10:00"),
            entry_at("2024-01-05T09:00"),
            entry_at("2024-01-06T08:00"),
            entry_at("2024-01-04T23:59"),
        ];

        let expected = group_entries_by_day(entries.clone());

        let mut reversed = entries.clone();
        reversed.reverse();
        assert_eq!(group_entries_by_day(reversed), expected);

        let mut rotated = entries;
        rotated.rotate_left(2);
        assert_eq!(group_entries_by_day(rotated), expected);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_entries_by_day(Vec::new()).is_empty());
    }

    #[test]
    fn midnight_boundary_splits_days() {
        let before = entry_at("2024-01-05T23:59");
        let after = entry_at("2024-01-06T00:00");

        let groups = group_entries_by_day(vec![before.clone(), after.clone()]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, vec![after]);
        assert_eq!(groups[1].1, vec![before]);
    }
}
