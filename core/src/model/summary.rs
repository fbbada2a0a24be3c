use serde::{Deserialize, Serialize};
use std::fmt;
use crate::model::pricing::ANY_SIZE;

const KEY_SEPARATOR: char = '-';

/// Totals for one staff member on one day.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StaffSummary {
    pub name: String,
    pub total_quantity: u64,
    pub total_sales: u64,
    pub total_pay: u64,
}

/// Grouping key for the service breakdown. Kept as a pair so nothing depends
/// on the separator used when it is rendered.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceKey {
    pub service_type: String,
    pub size: String,
}

impl ServiceKey {
    pub fn new(service_type: &str, size: &str) -> Self {
        Self {
            service_type: service_type.to_string(),
            size: size.to_string(),
        }
    }

    /// Inverse of the `Display` form: `inside` -> (inside, any),
    /// `outside-big` -> (outside, big).
    pub fn parse(key: &str) -> Self {
        match key.split_once(KEY_SEPARATOR) {
            Some((service_type, size)) => Self::new(service_type, size),
            None => Self::new(key, ANY_SIZE),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size == ANY_SIZE {
            write!(f, "{}", self.service_type)
        } else {
            write!(f, "{}{}{}", self.service_type, KEY_SEPARATOR, self.size)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuantity {
    pub key: ServiceKey,
    pub quantity: u64,
}

/// Per-service quantities for one staff member on one day, in the order the
/// services were first seen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    pub lines: Vec<ServiceQuantity>,
}

impl ServiceSummary {
    pub fn quantity_of(&self, key: &ServiceKey) -> u64 {
        self.lines
            .iter()
            .find(|line| &line.key == key)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayTotals {
    pub total_quantity: u64,
    pub total_sales: u64,
    pub total_pay: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_key_display() {
        assert_eq!(ServiceKey::new("inside", "any").to_string(), "inside");
        assert_eq!(ServiceKey::new("outside", "big").to_string(), "outside-big");
    }

    #[test]
    fn test_service_key_parse() {
        assert_eq!(ServiceKey::parse("outside-big"), ServiceKey::new("outside", "big"));
        assert_eq!(ServiceKey::parse("inside"), ServiceKey::new("inside", "any"));

        let key = ServiceKey::new("coupon", "medium");
        assert_eq!(ServiceKey::parse(&key.to_string()), key);
    }
}
