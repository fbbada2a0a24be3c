mod report;
mod tui;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use carwash_core::service::export;
use carwash_core::{format_day, parse_day, parse_sale, today, AddStaff, FileStore, Lang, LoadSource, SalesService};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carwash")]
#[command(about = "Daily car-wash sales ledger", long_about = None)]
struct Cli {
    /// Directory holding the ledger (default: ~/.carwash)
    #[arg(long, global = true, env = "CARWASH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Label language: ar or en
    #[arg(long, global = true, default_value = "ar")]
    lang: Lang,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record a sale (usage: add Jamil outside size:big qty:2 date:yesterday)
    Add {
        /// Staff name, service and optional key:value pairs
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Manage the staff roster
    Staff {
        #[command(subcommand)]
        action: StaffCommand,
    },
    /// Show the sales and service summaries for a day
    Summary {
        #[arg(long, short)]
        date: Option<String>,
    },
    /// List stored records, optionally for one day
    Records {
        #[arg(long, short)]
        date: Option<String>,
    },
    /// Export all records as CSV ("-" writes to stdout)
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Delete every record (the roster is kept)
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Show the price list
    Prices,
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum StaffCommand {
    List,
    Add { name: String },
    /// Remove a staff member and all of their records
    Remove {
        name: String,
        #[arg(long)]
        yes: bool,
    },
}

fn init_tracing(interactive: bool) {
    // The TUI owns the terminal, so stay quiet there unless asked.
    let default_filter = if interactive { "off" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_date(input: Option<&str>) -> Result<String> {
    match input {
        Some(d) => Ok(format_day(parse_day(d, today())?)),
        None => Ok(format_day(today())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    init_tracing(interactive);

    let store = FileStore::new(cli.data_dir)?;
    tracing::debug!(dir = %store.base_dir().display(), "opening ledger");
    let mut service = SalesService::open(store);
    match service.load_source() {
        LoadSource::Recovered => {
            eprintln!("Warning: stored data could not be read; a backup was kept and defaults loaded.");
        }
        LoadSource::Unreadable => {
            eprintln!("Warning: stored data could not be read; changes in this session will not be saved.");
        }
        _ => {}
    }

    let lang = cli.lang;
    let labels = lang.labels();

    match cli.command {
        Some(Commands::Add { args }) => {
            let sale = match parse_sale(&args, today(), None) {
                Ok(sale) => sale,
                Err(e) => {
                    println!("Error: {}", e);
                    return Ok(());
                }
            };
            match service.record_sale(&sale) {
                Ok(stored) => {
                    println!(
                        "{}: {} | {} | {} = {}",
                        labels.add,
                        stored.staff_name,
                        labels.service_name(sale.service_type),
                        labels.size_name(&stored.size),
                        stored.quantity
                    );
                    if !service.roster().contains(&stored.staff_name) {
                        println!("Warning: '{}' is not on the staff roster.", stored.staff_name);
                    }
                }
                Err(e) => println!("Error: {}", report::entry_error(labels, &e)),
            }
        }
        Some(Commands::Staff { action }) => match action {
            StaffCommand::List => report::show_roster(service.roster(), labels),
            StaffCommand::Add { name } => match service.add_staff(&name) {
                Ok(AddStaff::Added) => println!("{}: {}", labels.add_staff, name.trim()),
                Ok(AddStaff::Ignored) => {}
                Err(e) => println!("{}", report::roster_error(labels, &e)),
            },
            StaffCommand::Remove { name, yes } => {
                if !yes {
                    println!("{} (--yes)", labels.confirm_remove_staff(&name));
                    return Ok(());
                }
                let removed = service.remove_staff(&name);
                println!("{}: {} ({} records)", labels.remove, name, removed);
            }
        },
        Some(Commands::Summary { date }) => {
            let date = resolve_date(date.as_deref())?;
            report::show_summary(&service, labels, &date);
        }
        Some(Commands::Records { date }) => match date {
            Some(d) => {
                let day = resolve_date(Some(&d))?;
                report::show_records(&service.records_for(&day), labels);
            }
            None => report::show_records(&service.records().iter().collect::<Vec<_>>(), labels),
        },
        Some(Commands::Export { output }) => {
            let csv = service.export_csv();
            match output {
                Some(path) if path.as_os_str() == "-" => println!("{}", csv),
                Some(path) => {
                    fs::write(&path, csv)?;
                    println!("{}: {}", labels.export_csv, path.display());
                }
                None => {
                    let path = PathBuf::from(export::default_file_name(&format_day(today())));
                    fs::write(&path, csv)?;
                    println!("{}: {}", labels.export_csv, path.display());
                }
            }
        }
        Some(Commands::Clear { yes }) => {
            if !yes {
                println!("{} (--yes)", labels.confirm_clear);
                return Ok(());
            }
            let removed = service.clear_records();
            println!("{}: {} records", labels.clear_data, removed);
        }
        Some(Commands::Prices) => report::show_prices(labels),
        Some(Commands::Tui) | None => {
            tui::run(service, lang)?;
        }
    }
    Ok(())
}
