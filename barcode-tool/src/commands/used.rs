use issuance_ledger::allocator::{RANDOM_MAX, RANDOM_MIN};
use issuance_ledger::{LedgerStore, next_candidate};
use serde::Serialize;

use crate::bootstrap;
use crate::cli::UsedArgs;
use crate::config::AppConfig;
use crate::issuance::format_number;

#[derive(Debug, Serialize)]
struct UsedReport {
    customer_id: String,
    used: Vec<u32>,
    next: Option<u32>,
}

pub fn run(config: &AppConfig, args: UsedArgs) -> Result<(), anyhow::Error> {
    let store = bootstrap::open_store(config)?;
    let used = store.used_numbers(&args.customer_id)?;
    let report = UsedReport {
        customer_id: args.customer_id,
        next: next_candidate(&used),
        used: used.into_iter().collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.used.is_empty() {
        println!(
            "No numbers issued to {} yet; the next issue draws from {}..={}",
            report.customer_id,
            format_number(RANDOM_MIN),
            format_number(RANDOM_MAX)
        );
        return Ok(());
    }

    println!(
        "{} numbers issued to {}:",
        report.used.len(),
        report.customer_id
    );
    for number in &report.used {
        println!("  {}", format_number(*number));
    }
    match report.next {
        Some(next) => println!("Next number: {}", format_number(next)),
        None => println!("No numbers left below the smallest issued number"),
    }
    Ok(())
}
