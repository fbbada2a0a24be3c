use std::collections::HashMap;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;

use crate::model::pricing::{ServiceType, Size};
use crate::model::record::NewSale;
use crate::time::{format_day, parse_day};

pub const SALE_KEYS: [&str; 4] = ["date", "quantity", "size", "staff"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub words: Vec<String>,
    pub metadata: HashMap<String, String>,
}

/// Splits arguments into plain words and `key:value` pairs.
pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut words = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        words.push(arg.clone());
    }

    ParsedInput { words, metadata }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

pub fn expand_service(word: &str) -> Result<ServiceType> {
    let names = ServiceType::ALL.map(|s| s.as_str());
    expand_key(&word.to_lowercase(), &names)
        .with_context(|| format!("Unknown service '{}'", word))?
        .parse()
}

pub fn expand_size(word: &str) -> Result<Size> {
    let names = [Size::Small, Size::Medium, Size::Big, Size::Any].map(|s| s.as_str());
    expand_key(&word.to_lowercase(), &names)
        .with_context(|| format!("Unknown size '{}'", word))?
        .parse()
}

/// Builds a sale from command words:
/// `<staff...> <service> [quantity] [size:..] [quantity:..] [date:..] [staff:..]`.
///
/// The staff name may span several words. When no staff words are given,
/// `staff:` or `default_staff` is used. Quantity defaults to 1 and the date to
/// `today`. The quantity sign is not checked here.
pub fn parse_sale(args: &[String], today: NaiveDate, default_staff: Option<&str>) -> Result<NewSale> {
    let parsed = parse_args(args);

    let mut metadata = HashMap::new();
    for (key, value) in parsed.metadata {
        let key = match key.to_lowercase().as_str() {
            "qty" => "quantity".to_string(),
            other => other.to_string(),
        };
        let full_key = expand_key(&key, &SALE_KEYS)?;
        metadata.insert(full_key, value);
    }

    let mut words = parsed.words;
    let mut quantity: Option<i64> = None;
    if let Some(last) = words.last() {
        if let Ok(n) = last.parse::<i64>() {
            quantity = Some(n);
            words.pop();
        }
    }

    let service_word = words.pop().ok_or_else(|| anyhow!("Service is required"))?;
    let service_type = expand_service(&service_word)?;

    let staff_name = if !words.is_empty() {
        words.join(" ")
    } else if let Some(name) = metadata.get("staff") {
        name.clone()
    } else {
        default_staff.unwrap_or_default().to_string()
    };

    if let Some(q) = metadata.get("quantity") {
        quantity = Some(q.parse().map_err(|_| anyhow!("Invalid quantity: '{}'", q))?);
    }

    let size = match metadata.get("size") {
        Some(s) => expand_size(s)?,
        None => Size::default(),
    };

    let date = match metadata.get("date") {
        Some(d) => parse_day(d, today)?,
        None => today,
    };

    let mut sale = NewSale::new(&format_day(date), &staff_name, service_type, size, quantity.unwrap_or(1));
    sale.size = sale.effective_size();
    Ok(sale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(|w| w.to_string()).collect()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let parsed = parse_args(&args("Jamil whole size:big date:today"));
        assert_eq!(parsed.words, vec!["Jamil", "whole"]);
        assert_eq!(parsed.metadata.get("size"), Some(&"big".to_string()));
        assert_eq!(parsed.metadata.get("date"), Some(&"today".to_string()));
    }

    #[test]
    fn test_expand_key() {
        assert_eq!(expand_key("d", &SALE_KEYS).unwrap(), "date");
        assert_eq!(expand_key("q", &SALE_KEYS).unwrap(), "quantity");
        assert_eq!(expand_key("size", &SALE_KEYS).unwrap(), "size");

        // Ambiguous
        assert!(expand_key("s", &SALE_KEYS).is_err()); // matches size, staff

        // Unknown
        assert!(expand_key("x", &SALE_KEYS).is_err());
    }

    #[test]
    fn test_expand_service() {
        assert_eq!(expand_service("out").unwrap(), ServiceType::Outside);
        assert_eq!(expand_service("Whole").unwrap(), ServiceType::Whole);
        assert_eq!(expand_service("m").unwrap(), ServiceType::Mirrors);
        assert!(expand_service("c").is_err()); // carpets, coupon
        assert!(expand_service("polish").is_err());
    }

    #[test]
    fn test_parse_sale_full() {
        let sale = parse_sale(&args("Jamil out si:big q:3 d:2024-01-05"), day("2024-01-01"), None).unwrap();
        assert_eq!(sale.staff_name, "Jamil");
        assert_eq!(sale.service_type, ServiceType::Outside);
        assert_eq!(sale.size, Size::Big);
        assert_eq!(sale.quantity, 3);
        assert_eq!(sale.date, "2024-01-05");
    }

    #[test]
    fn test_parse_sale_qty_alias() {
        let sale = parse_sale(&args("A inside qty:2"), day("2024-01-01"), None).unwrap();
        assert_eq!(sale.quantity, 2);
    }

    #[test]
    fn test_parse_sale_defaults() {
        let sale = parse_sale(&args("whole"), day("2024-01-01"), Some("Haluna")).unwrap();
        assert_eq!(sale.staff_name, "Haluna");
        assert_eq!(sale.size, Size::Small);
        assert_eq!(sale.quantity, 1);
        assert_eq!(sale.date, "2024-01-01");
    }

    #[test]
    fn test_parse_sale_multi_word_staff_and_positional_quantity() {
        let sale = parse_sale(&args("Abu Bakr spray 4"), day("2024-01-01"), None).unwrap();
        assert_eq!(sale.staff_name, "Abu Bakr");
        assert_eq!(sale.service_type, ServiceType::Spray);
        assert_eq!(sale.size, Size::Any);
        assert_eq!(sale.quantity, 4);
    }

    #[test]
    fn test_parse_sale_keeps_non_positive_quantity_for_validation() {
        let sale = parse_sale(&args("A whole q:0"), day("2024-01-01"), None).unwrap();
        assert_eq!(sale.quantity, 0);
    }

    #[test]
    fn test_parse_sale_errors() {
        let today = day("2024-01-01");
        assert!(parse_sale(&args(""), today, None).is_err());
        assert!(parse_sale(&args("A whole q:lots"), today, None).is_err());
        assert!(parse_sale(&args("A whole size:huge"), today, None).is_err());
        assert!(parse_sale(&args("A whole x:1"), today, None).is_err());
    }
}
