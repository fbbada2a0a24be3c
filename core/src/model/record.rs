use serde::{Deserialize, Serialize};
use crate::model::pricing::{self, PriceEntry, ServiceType, Size};

/// One line of the ledger: how many units of a service a staff member
/// performed on a given day.
///
/// Service and size stay plain strings so records written against an older
/// pricing table still load and aggregate (at zero value).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesRecord {
    pub date: String,
    pub staff_name: String,
    pub service_type: String,
    pub size: String,
    pub quantity: u64,
}

impl SalesRecord {
    pub fn new(date: &str, staff_name: &str, service_type: &str, size: &str, quantity: u64) -> Self {
        Self {
            date: date.to_string(),
            staff_name: staff_name.to_string(),
            service_type: service_type.to_string(),
            size: size.to_string(),
            quantity,
        }
    }

    /// Normalized form used for storage and matching.
    pub fn normalized(&self) -> Self {
        Self {
            date: self.date.clone(),
            staff_name: self.staff_name.trim().to_string(),
            service_type: self.service_type.clone(),
            size: self.size.clone(),
            quantity: self.quantity,
        }
    }

    /// Table price for this record's service and size, or `None` when the
    /// combination is not priced (summaries count it at zero).
    pub fn unit_price(&self) -> Option<PriceEntry> {
        pricing::resolve(&self.service_type, &self.size)
    }

    pub fn same_slot(&self, other: &SalesRecord) -> bool {
        self.date == other.date
            && self.staff_name.trim() == other.staff_name.trim()
            && self.service_type == other.service_type
            && self.size == other.size
    }
}

/// A sale as typed in by the user, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub date: String,
    pub staff_name: String,
    pub service_type: ServiceType,
    pub size: Size,
    pub quantity: i64,
}

impl NewSale {
    pub fn new(date: &str, staff_name: &str, service_type: ServiceType, size: Size, quantity: i64) -> Self {
        Self {
            date: date.to_string(),
            staff_name: staff_name.to_string(),
            service_type,
            size,
            quantity,
        }
    }

    /// Unsized services are always booked under `any`, whatever size the form
    /// still has selected.
    pub fn effective_size(&self) -> Size {
        if self.service_type.is_sized() {
            match self.size {
                Size::Any => Size::default(),
                size => size,
            }
        } else {
            Size::Any
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"date":"2024-01-01","staffName":"A","serviceType":"whole","size":"small","quantity":2}"#;
        let record: SalesRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, SalesRecord::new("2024-01-01", "A", "whole", "small", 2));
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let record: SalesRecord = serde_json::from_str(r#"{"date":"2024-01-01","staffName":"A"}"#).unwrap();
        assert_eq!(record.quantity, 0);
        assert_eq!(record.service_type, "");
    }

    #[test]
    fn test_unit_price() {
        let record = SalesRecord::new("2024-01-01", "A", "spray", "big", 1);
        assert_eq!(record.unit_price(), Some(PriceEntry { price: 10, staff_pay: 4 }));

        let record = SalesRecord::new("2024-01-01", "A", "coupon", "small", 1);
        assert_eq!(record.unit_price().map(|p| p.price), Some(0));

        let record = SalesRecord::new("2024-01-01", "A", "polish", "small", 1);
        assert_eq!(record.unit_price(), None);
    }

    #[test]
    fn test_effective_size() {
        let sale = NewSale::new("2024-01-01", "A", ServiceType::Inside, Size::Big, 1);
        assert_eq!(sale.effective_size(), Size::Any);

        let sale = NewSale::new("2024-01-01", "A", ServiceType::Outside, Size::Any, 1);
        assert_eq!(sale.effective_size(), Size::Small);

        let sale = NewSale::new("2024-01-01", "A", ServiceType::Coupon, Size::Big, 1);
        assert_eq!(sale.effective_size(), Size::Big);
    }
}
