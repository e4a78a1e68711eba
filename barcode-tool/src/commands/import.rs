use anyhow::Context;
use issuance_ledger::{Ledger, SqliteStore};

use crate::cli::ImportArgs;

pub fn run(args: ImportArgs) -> Result<(), anyhow::Error> {
    let ledger = Ledger::load(&args.from)?;
    let store = SqliteStore::open(&args.to)
        .with_context(|| format!("failed to open {}", args.to.display()))?;
    let inserted = store.import(&ledger)?;
    tracing::info!(
        from = %args.from.display(),
        to = %args.to.display(),
        inserted,
        "Imported JSON ledger"
    );
    println!(
        "Imported {inserted} numbers from {} into {}",
        args.from.display(),
        args.to.display()
    );
    Ok(())
}
