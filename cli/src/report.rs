use carwash_core::model::pricing;
use carwash_core::{EntryError, KeyValueStore, Labels, RosterError, SalesRecord, SalesService, StaffRoster};
use tabled::builder::Builder;
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

// Raw ledger rows keep the export column names, plus the unit price.
#[derive(Tabled)]
struct RecordRow {
    date: String,
    staff: String,
    service: String,
    size: String,
    quantity: u64,
    price: String,
}

impl From<&SalesRecord> for RecordRow {
    fn from(r: &SalesRecord) -> Self {
        Self {
            date: r.date.clone(),
            staff: r.staff_name.clone(),
            service: r.service_type.clone(),
            size: r.size.clone(),
            quantity: r.quantity,
            price: r.unit_price().map_or_else(|| "?".to_string(), |p| p.price.to_string()),
        }
    }
}

fn styled(mut table: Table) -> Table {
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN)); // Header color
    table
}

pub fn show_summary<S: KeyValueStore>(service: &SalesService<S>, labels: &Labels, date: &str) {
    println!("\n\x1b[1;36m{}\x1b[0m  {}: {}", labels.title, labels.date, date);

    let staff = service.staff_summary(date);
    println!("\n{}", labels.summary);
    if staff.is_empty() {
        println!("{}", labels.no_data);
    } else {
        let mut builder = Builder::default();
        builder.push_record(vec![
            labels.staff.to_string(),
            labels.quantity.to_string(),
            labels.total_sales.to_string(),
            labels.total_pay.to_string(),
        ]);
        for s in &staff {
            builder.push_record(vec![
                s.name.clone(),
                s.total_quantity.to_string(),
                s.total_sales.to_string(),
                s.total_pay.to_string(),
            ]);
        }
        let totals = service.day_totals(date);
        builder.push_record(vec![
            labels.total.to_string(),
            totals.total_quantity.to_string(),
            totals.total_sales.to_string(),
            totals.total_pay.to_string(),
        ]);
        println!("{}", styled(builder.build()));
    }

    let services = service.service_summary(date);
    println!("\n{}", labels.service_summary);
    if services.is_empty() {
        println!("{}", labels.no_data);
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(vec![
        labels.staff.to_string(),
        labels.service.to_string(),
        labels.quantity.to_string(),
    ]);
    for summary in &services {
        // Staff column: only show on first row of the staff group
        for (i, line) in summary.lines.iter().enumerate() {
            let name = if i == 0 { summary.name.clone() } else { String::new() };
            builder.push_record(vec![name, labels.service_key(&line.key), line.quantity.to_string()]);
        }
    }
    println!("{}", styled(builder.build()));
}

pub fn show_records(records: &[&SalesRecord], labels: &Labels) {
    if records.is_empty() {
        println!("{}", labels.no_data);
        return;
    }
    let rows: Vec<RecordRow> = records.iter().map(|r| RecordRow::from(*r)).collect();
    println!("{}", styled(Table::new(rows)));

    let unpriced = records.iter().filter(|r| r.unit_price().is_none()).count();
    if unpriced > 0 {
        println!("{} record(s) have no price (?) and count as 0 in totals.", unpriced);
    }
}

pub fn show_roster(roster: &StaffRoster, labels: &Labels) {
    println!("{}", labels.staff_management);
    let mut builder = Builder::default();
    builder.push_record(vec!["#".to_string(), labels.staff.to_string()]);
    for (i, name) in roster.iter().enumerate() {
        builder.push_record(vec![(i + 1).to_string(), name.to_string()]);
    }
    println!("{}", styled(builder.build()));
}

pub fn show_prices(labels: &Labels) {
    let mut builder = Builder::default();
    builder.push_record(vec![
        labels.service.to_string(),
        labels.size.to_string(),
        labels.total_sales.to_string(),
        labels.total_pay.to_string(),
    ]);
    for (service, size, price) in pricing::services() {
        builder.push_record(vec![
            labels.service_name(service).to_string(),
            labels.size_name(size.as_str()).to_string(),
            price.price.to_string(),
            price.staff_pay.to_string(),
        ]);
    }
    println!("{}", styled(builder.build()));
}

pub fn entry_error(labels: &Labels, err: &EntryError) -> String {
    match err {
        EntryError::InvalidQuantity(_) => labels.invalid_quantity.to_string(),
        EntryError::MissingStaff => labels.select_staff.to_string(),
    }
}

pub fn roster_error(labels: &Labels, err: &RosterError) -> String {
    match err {
        RosterError::Duplicate(name) => format!("{}: {}", labels.staff_exists, name),
    }
}
