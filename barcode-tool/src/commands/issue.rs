use issuance_ledger::Allocator;
use label_render::{HtmlSheet, RenderOptions};

use crate::bootstrap;
use crate::cli::IssueArgs;
use crate::config::AppConfig;
use crate::issuance::{IssueRequest, Issuer, format_number};

pub fn run(config: &AppConfig, args: IssueArgs) -> Result<(), anyhow::Error> {
    let store = bootstrap::open_store(config)?;
    let allocator = Allocator::new(store);
    let renderer = bootstrap::build_renderer(config);
    let options = RenderOptions::new()
        .with_scale(config.scale)
        .with_border(config.border);

    let issuer = Issuer {
        allocator: &allocator,
        renderer: &renderer,
        sheet_renderer: &HtmlSheet,
        options: &options,
        output_dir: &config.output_dir,
    };

    let request = IssueRequest {
        customer_id: args.customer_id,
        requested_number: args.number,
        label: args.label.unwrap_or_else(|| config.default_label.clone()),
        output_path: args.output_path,
    };
    let outcome = issuer.issue(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    let numbers: Vec<String> = outcome
        .batch
        .numbers()
        .into_iter()
        .map(format_number)
        .collect();
    println!("Barcodes saved to {}", outcome.output_path.display());
    println!("Issued for {}: {}", outcome.customer_id, numbers.join(", "));
    Ok(())
}
