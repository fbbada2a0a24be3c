use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use anyhow::{anyhow, Result};

/// Sentinel size for services that are not size-differentiated.
pub const ANY_SIZE: &str = "any";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Whole,
    Inside,
    Outside,
    Spray,
    Engine,
    Mirrors,
    Carpets,
    Coupon,
}

impl ServiceType {
    pub const ALL: [ServiceType; 8] = [
        ServiceType::Whole,
        ServiceType::Inside,
        ServiceType::Outside,
        ServiceType::Spray,
        ServiceType::Engine,
        ServiceType::Mirrors,
        ServiceType::Carpets,
        ServiceType::Coupon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Whole => "whole",
            ServiceType::Inside => "inside",
            ServiceType::Outside => "outside",
            ServiceType::Spray => "spray",
            ServiceType::Engine => "engine",
            ServiceType::Mirrors => "mirrors",
            ServiceType::Carpets => "carpets",
            ServiceType::Coupon => "coupon",
        }
    }

    /// Whether the service is priced per car size.
    pub fn is_sized(&self) -> bool {
        matches!(self, ServiceType::Whole | ServiceType::Outside | ServiceType::Coupon)
    }

    pub fn sizes(&self) -> &'static [Size] {
        if self.is_sized() {
            &Size::TIERS
        } else {
            &[Size::Any]
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ServiceType::ALL
            .iter()
            .copied()
            .find(|svc| svc.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown service type: '{}'", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Big,
    Any,
}

impl Size {
    pub const TIERS: [Size; 3] = [Size::Small, Size::Medium, Size::Big];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Big => "big",
            Size::Any => ANY_SIZE,
        }
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::Small
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(Size::Small),
            "medium" => Ok(Size::Medium),
            "big" => Ok(Size::Big),
            ANY_SIZE => Ok(Size::Any),
            _ => Err(anyhow!("Unknown size: '{}'", s)),
        }
    }
}

/// Per-unit sale price and the share paid to the staff member.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceEntry {
    pub price: u32,
    pub staff_pay: u32,
}

impl PriceEntry {
    const fn new(price: u32, staff_pay: u32) -> Self {
        Self { price, staff_pay }
    }
}

const PRICING: &[(&str, &str, PriceEntry)] = &[
    ("whole", "small", PriceEntry::new(20, 8)),
    ("whole", "medium", PriceEntry::new(25, 10)),
    ("whole", "big", PriceEntry::new(30, 12)),
    ("inside", ANY_SIZE, PriceEntry::new(10, 4)),
    ("outside", "small", PriceEntry::new(15, 5)),
    ("outside", "medium", PriceEntry::new(20, 8)),
    ("outside", "big", PriceEntry::new(25, 10)),
    ("spray", ANY_SIZE, PriceEntry::new(10, 4)),
    ("engine", ANY_SIZE, PriceEntry::new(10, 4)),
    ("mirrors", ANY_SIZE, PriceEntry::new(5, 2)),
    ("carpets", ANY_SIZE, PriceEntry::new(10, 2)),
    // Coupons are prepaid, so the sale itself brings in nothing.
    ("coupon", "small", PriceEntry::new(0, 4)),
    ("coupon", "medium", PriceEntry::new(0, 5)),
    ("coupon", "big", PriceEntry::new(0, 6)),
];

fn find(service_type: &str, size: &str) -> Option<PriceEntry> {
    PRICING
        .iter()
        .find(|(svc, sz, _)| *svc == service_type && *sz == size)
        .map(|(_, _, entry)| *entry)
}

/// Resolves a price, falling back to the service's `any` entry.
/// Returns `None` when the table has no entry for the combination.
pub fn resolve(service_type: &str, size: &str) -> Option<PriceEntry> {
    find(service_type, size).or_else(|| find(service_type, ANY_SIZE))
}

/// Same resolution as [`resolve`], but unknown combinations price at zero so
/// aggregation stays total over any stored data.
pub fn lookup(service_type: &str, size: &str) -> PriceEntry {
    resolve(service_type, size).unwrap_or_default()
}

/// Every priced (service, size) pair in table order.
pub fn services() -> impl Iterator<Item = (ServiceType, Size, PriceEntry)> {
    ServiceType::ALL.into_iter().flat_map(|svc| {
        svc.sizes()
            .iter()
            .map(move |size| (svc, *size, lookup(svc.as_str(), size.as_str())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact() {
        assert_eq!(lookup("whole", "small"), PriceEntry { price: 20, staff_pay: 8 });
        assert_eq!(lookup("outside", "big"), PriceEntry { price: 25, staff_pay: 10 });
        assert_eq!(lookup("coupon", "medium"), PriceEntry { price: 0, staff_pay: 5 });
    }

    #[test]
    fn test_lookup_falls_back_to_any() {
        assert_eq!(lookup("inside", ANY_SIZE), PriceEntry { price: 10, staff_pay: 4 });
        // A sized record for an unsized service still resolves through `any`.
        assert_eq!(lookup("mirrors", "big"), PriceEntry { price: 5, staff_pay: 2 });
    }

    #[test]
    fn test_lookup_unknown_is_zero() {
        assert_eq!(lookup("polish", "small"), PriceEntry::default());
        assert_eq!(lookup("whole", ANY_SIZE), PriceEntry::default());
        assert_eq!(lookup("", ""), PriceEntry::default());
    }

    #[test]
    fn test_resolve_distinguishes_unknown_from_free() {
        assert_eq!(resolve("polish", "small"), None);
        assert_eq!(resolve("coupon", "small").map(|p| p.price), Some(0));
    }

    #[test]
    fn test_services_cover_table() {
        let all: Vec<_> = services().collect();
        assert_eq!(all.len(), PRICING.len());
        assert!(all.iter().all(|(svc, size, _)| resolve(svc.as_str(), size.as_str()).is_some()));
    }

    #[test]
    fn test_service_type_parse() {
        assert_eq!("outside".parse::<ServiceType>().unwrap(), ServiceType::Outside);
        assert!("Outside".parse::<ServiceType>().is_err());
        assert_eq!("any".parse::<Size>().unwrap(), Size::Any);
        assert!(ServiceType::Coupon.is_sized());
        assert_eq!(ServiceType::Spray.sizes(), &[Size::Any]);
    }
}
