use crate::model::record::SalesRecord;

const CSV_HEADER: [&str; 5] = ["date", "staff", "service", "size", "quantity"];

/// Renders the ledger as comma-separated text in store order. Fields are not
/// quoted.
pub fn to_csv(records: &[SalesRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for r in records {
        lines.push(format!(
            "{},{},{},{},{}",
            r.date, r.staff_name, r.service_type, r.size, r.quantity
        ));
    }
    lines.join("\n")
}

pub fn default_file_name(date: &str) -> String {
    format!("carwash_{}.csv", date)
}
