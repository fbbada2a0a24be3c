use crate::model::pricing;
use crate::model::record::SalesRecord;
use crate::model::roster::StaffRoster;
use crate::model::summary::{DayTotals, ServiceKey, ServiceQuantity, ServiceSummary, StaffSummary};
use crate::service::record_store::for_date;

/// Quantity, sales and staff pay per roster entry for `date`, in roster
/// order. Staff with nothing booked that day are left out. Sums saturate at
/// `u64::MAX` rather than wrap.
pub fn staff_summary(records: &[SalesRecord], roster: &StaffRoster, date: &str) -> Vec<StaffSummary> {
    roster
        .iter()
        .map(|name| {
            let mut summary = StaffSummary {
                name: name.to_string(),
                ..Default::default()
            };
            for record in for_date(records, date).filter(|r| r.staff_name == name) {
                let price = pricing::lookup(&record.service_type, &record.size);
                summary.total_quantity = summary.total_quantity.saturating_add(record.quantity);
                summary.total_sales = summary
                    .total_sales
                    .saturating_add(record.quantity.saturating_mul(u64::from(price.price)));
                summary.total_pay = summary
                    .total_pay
                    .saturating_add(record.quantity.saturating_mul(u64::from(price.staff_pay)));
            }
            summary
        })
        .filter(|s| s.total_quantity > 0)
        .collect()
}

/// Quantities per (service, size) per roster entry for `date`.
pub fn service_summary(records: &[SalesRecord], roster: &StaffRoster, date: &str) -> Vec<ServiceSummary> {
    roster
        .iter()
        .map(|name| {
            let mut lines: Vec<ServiceQuantity> = Vec::new();
            for record in for_date(records, date).filter(|r| r.staff_name == name) {
                let key = ServiceKey::new(&record.service_type, &record.size);
                match lines.iter_mut().find(|line| line.key == key) {
                    Some(line) => line.quantity = line.quantity.saturating_add(record.quantity),
                    None => lines.push(ServiceQuantity {
                        key,
                        quantity: record.quantity,
                    }),
                }
            }
            ServiceSummary {
                name: name.to_string(),
                lines,
            }
        })
        .filter(|s| !s.lines.is_empty())
        .collect()
}

pub fn day_totals(summaries: &[StaffSummary]) -> DayTotals {
    summaries.iter().fold(DayTotals::default(), |mut acc, s| {
        acc.total_quantity = acc.total_quantity.saturating_add(s.total_quantity);
        acc.total_sales = acc.total_sales.saturating_add(s.total_sales);
        acc.total_pay = acc.total_pay.saturating_add(s.total_pay);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, staff: &str, svc: &str, size: &str, qty: u64) -> SalesRecord {
        SalesRecord::new(date, staff, svc, size, qty)
    }

    #[test]
    fn test_staff_summary_excludes_idle_staff() {
        let roster = StaffRoster::from_names(["A", "B"]);
        let records = vec![rec("2024-01-01", "A", "whole", "small", 2)];

        let summary = staff_summary(&records, &roster, "2024-01-01");
        assert_eq!(
            summary,
            vec![StaffSummary {
                name: "A".to_string(),
                total_quantity: 2,
                total_sales: 40,
                total_pay: 16,
            }]
        );
    }

    #[test]
    fn test_staff_summary_filters_by_date_and_follows_roster_order() {
        let roster = StaffRoster::from_names(["B", "A"]);
        let records = vec![
            rec("2024-01-01", "A", "whole", "small", 1),
            rec("2024-01-01", "B", "outside", "big", 2),
            rec("2024-01-01", "B", "coupon", "big", 1),
            rec("2024-01-02", "A", "whole", "big", 5),
        ];

        let summary = staff_summary(&records, &roster, "2024-01-01");
        let names: Vec<_> = summary.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);

        // outside/big: 2 x (25, 10); coupon/big: 1 x (0, 6)
        assert_eq!(summary[0].total_quantity, 3);
        assert_eq!(summary[0].total_sales, 50);
        assert_eq!(summary[0].total_pay, 26);
    }

    #[test]
    fn test_staff_summary_unknown_pricing_counts_quantity_only() {
        let roster = StaffRoster::from_names(["A"]);
        let records = vec![rec("2024-01-01", "A", "polish", "small", 3)];

        let summary = staff_summary(&records, &roster, "2024-01-01");
        assert_eq!(summary[0].total_quantity, 3);
        assert_eq!(summary[0].total_sales, 0);
        assert_eq!(summary[0].total_pay, 0);
    }

    #[test]
    fn test_staff_summary_ignores_records_off_roster() {
        let roster = StaffRoster::from_names(["A"]);
        let records = vec![rec("2024-01-01", "Ghost", "whole", "small", 3)];
        assert!(staff_summary(&records, &roster, "2024-01-01").is_empty());
    }

    #[test]
    fn test_service_summary_groups_by_pair() {
        let roster = StaffRoster::from_names(["A", "B"]);
        let records = vec![
            rec("2024-01-01", "A", "inside", "any", 1),
            rec("2024-01-01", "A", "outside", "big", 2),
            rec("2024-01-01", "A", "outside", "small", 1),
            rec("2024-01-02", "B", "inside", "any", 1),
        ];

        let summary = service_summary(&records, &roster, "2024-01-01");
        assert_eq!(summary.len(), 1);

        let a = &summary[0];
        let keys: Vec<String> = a.lines.iter().map(|l| l.key.to_string()).collect();
        assert_eq!(keys, vec!["inside", "outside-big", "outside-small"]);
        assert_eq!(a.quantity_of(&ServiceKey::parse("outside-big")), 2);
        assert_eq!(a.quantity_of(&ServiceKey::new("whole", "small")), 0);
    }

    #[test]
    fn test_service_summary_sums_same_key() {
        // Stored data is not guaranteed to be merged.
        let roster = StaffRoster::from_names(["A"]);
        let records = vec![
            rec("2024-01-01", "A", "spray", "any", 2),
            rec("2024-01-01", "A", "spray", "any", 3),
        ];
        let summary = service_summary(&records, &roster, "2024-01-01");
        assert_eq!(summary[0].lines.len(), 1);
        assert_eq!(summary[0].lines[0].quantity, 5);
    }

    #[test]
    fn test_day_totals() {
        let roster = StaffRoster::from_names(["A", "B"]);
        let records = vec![
            rec("2024-01-01", "A", "whole", "small", 2),
            rec("2024-01-01", "B", "mirrors", "any", 1),
        ];
        let totals = day_totals(&staff_summary(&records, &roster, "2024-01-01"));
        assert_eq!(totals, DayTotals { total_quantity: 3, total_sales: 45, total_pay: 18 });
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let roster = StaffRoster::from_names(["A"]);
        let records = vec![
            rec("2024-01-01", "A", "whole", "big", u64::MAX / 10),
            rec("2024-01-01", "A", "whole", "big", u64::MAX),
        ];

        let summary = staff_summary(&records, &roster, "2024-01-01");
        assert_eq!(summary[0].total_quantity, u64::MAX);
        assert_eq!(summary[0].total_sales, u64::MAX);
        assert_eq!(summary[0].total_pay, u64::MAX);

        let totals = day_totals(&[summary[0].clone(), summary[0].clone()]);
        assert_eq!(totals.total_sales, u64::MAX);

        let services = service_summary(&records, &roster, "2024-01-01");
        assert_eq!(services[0].lines[0].quantity, u64::MAX);
    }
}
