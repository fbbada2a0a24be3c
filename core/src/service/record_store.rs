use serde_json::Value;
use tracing::{debug, warn};
use crate::model::record::SalesRecord;

/// Inserts a sale or merges it into the record for the same
/// (date, staff, service, size) slot. The input is left untouched; a new
/// list is always returned, with a merged record kept at its original index
/// and a new one appended.
pub fn upsert(list: &[SalesRecord], entry: &SalesRecord) -> Vec<SalesRecord> {
    let entry = entry.normalized();
    let mut records = list.to_vec();

    if let Some(pos) = records.iter().position(|r| r.same_slot(&entry)) {
        let existing = &mut records[pos];
        existing.quantity = existing.quantity.saturating_add(entry.quantity);
        debug!(
            staff = %entry.staff_name,
            service = %entry.service_type,
            size = %entry.size,
            quantity = existing.quantity,
            "merged sale into existing record"
        );
    } else {
        debug!(
            staff = %entry.staff_name,
            service = %entry.service_type,
            size = %entry.size,
            "appended new record"
        );
        records.push(entry);
    }
    records
}

pub fn remove_by_staff(list: &[SalesRecord], staff_name: &str) -> Vec<SalesRecord> {
    list.iter()
        .filter(|r| r.staff_name != staff_name)
        .cloned()
        .collect()
}

pub fn clear() -> Vec<SalesRecord> {
    Vec::new()
}

pub fn for_date<'a>(list: &'a [SalesRecord], date: &'a str) -> impl Iterator<Item = &'a SalesRecord> {
    list.iter().filter(move |r| r.date == date)
}

/// Reads a persisted record list. Anything that is not an array counts as
/// empty, and individual entries that cannot be read are skipped.
pub fn decode_records(value: &Value) -> Vec<SalesRecord> {
    let Some(items) = value.as_array() else {
        if !value.is_null() {
            warn!("stored records are not a list; starting with no records");
        }
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<SalesRecord>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index = i, error = %e, "skipping unreadable stored record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(date: &str, staff: &str, svc: &str, size: &str, qty: u64) -> SalesRecord {
        SalesRecord::new(date, staff, svc, size, qty)
    }

    #[test]
    fn test_upsert_into_empty() {
        let out = upsert(&[], &rec("2024-01-01", "A", "whole", "small", 2));
        assert_eq!(out, vec![rec("2024-01-01", "A", "whole", "small", 2)]);
    }

    #[test]
    fn test_upsert_merges_matching_slot() {
        let first = upsert(&[], &rec("2024-01-01", "A", "whole", "small", 2));
        let second = upsert(&first, &rec("2024-01-01", "A", "whole", "small", 3));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].quantity, 5);
    }

    #[test]
    fn test_upsert_merge_saturates() {
        let first = upsert(&[], &rec("2024-01-01", "A", "whole", "small", u64::MAX - 1));
        let second = upsert(&first, &rec("2024-01-01", "A", "whole", "small", 5));
        assert_eq!(second[0].quantity, u64::MAX);
    }

    #[test]
    fn test_upsert_trims_staff_name() {
        let first = upsert(&[], &rec("2024-01-01", "  A ", "whole", "small", 1));
        assert_eq!(first[0].staff_name, "A");

        let second = upsert(&first, &rec("2024-01-01", "A", "whole", "small", 1));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].quantity, 2);
    }

    #[test]
    fn test_upsert_does_not_mutate_input() {
        let original = vec![
            rec("2024-01-01", "A", "whole", "small", 2),
            rec("2024-01-01", "B", "inside", "any", 1),
        ];
        let snapshot = original.clone();

        let merged = upsert(&original, &rec("2024-01-01", "A", "whole", "small", 4));
        let appended = upsert(&original, &rec("2024-01-02", "A", "whole", "small", 1));

        assert_eq!(original, snapshot);
        assert_eq!(merged[0].quantity, 6);
        assert_eq!(appended.len(), 3);
    }

    #[test]
    fn test_upsert_keeps_positions() {
        let list = vec![
            rec("2024-01-01", "A", "whole", "small", 1),
            rec("2024-01-01", "B", "whole", "small", 1),
            rec("2024-01-01", "C", "whole", "small", 1),
        ];
        let out = upsert(&list, &rec("2024-01-01", "B", "whole", "small", 1));
        let names: Vec<_> = out.iter().map(|r| r.staff_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(out[1].quantity, 2);

        let out = upsert(&out, &rec("2024-01-01", "A", "outside", "big", 1));
        assert_eq!(out.last().unwrap().service_type, "outside");
    }

    #[test]
    fn test_upsert_distinguishes_each_slot_field() {
        let base = vec![rec("2024-01-01", "A", "whole", "small", 1)];
        for other in [
            rec("2024-01-02", "A", "whole", "small", 1),
            rec("2024-01-01", "B", "whole", "small", 1),
            rec("2024-01-01", "A", "outside", "small", 1),
            rec("2024-01-01", "A", "whole", "big", 1),
        ] {
            assert_eq!(upsert(&base, &other).len(), 2);
        }
    }

    #[test]
    fn test_remove_by_staff_idempotent() {
        let list = vec![
            rec("2024-01-01", "A", "whole", "small", 1),
            rec("2024-01-01", "B", "whole", "small", 1),
            rec("2024-01-02", "A", "spray", "any", 1),
        ];
        let once = remove_by_staff(&list, "A");
        let twice = remove_by_staff(&once, "A");
        assert_eq!(once, twice);
        assert_eq!(once, vec![rec("2024-01-01", "B", "whole", "small", 1)]);
    }

    #[test]
    fn test_clear() {
        assert!(clear().is_empty());
    }

    #[test]
    fn test_decode_records_non_array_is_empty() {
        assert!(decode_records(&json!({"date": "2024-01-01"})).is_empty());
        assert!(decode_records(&json!("garbage")).is_empty());
        assert!(decode_records(&Value::Null).is_empty());
    }

    #[test]
    fn test_decode_records_skips_bad_entries() {
        let value = json!([
            {"date": "2024-01-01", "staffName": "A", "serviceType": "whole", "size": "small", "quantity": 2},
            {"date": "2024-01-01", "staffName": "B", "quantity": "lots"},
            {"date": "2024-01-01", "staffName": "C", "serviceType": "spray", "size": "any"}
        ]);
        let records = decode_records(&value);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].staff_name, "C");
        assert_eq!(records[1].quantity, 0);
    }
}
