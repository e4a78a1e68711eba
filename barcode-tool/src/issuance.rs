//! The issue workflow: allocate, expand, render, write, then record.
//!
//! The ledger is only touched after every barcode rendered and the sheet was
//! written, so a failed run never consumes numbers.

use std::path::{Path, PathBuf};

use issuance_ledger::allocator::NUMBER_LEN;
use issuance_ledger::{
    AllocationError, Allocator, IssuedBatch, LedgerError, LedgerStore, expand,
};
use label_render::{
    BarcodeRenderer, RenderError, RenderOptions, Sheet, SheetEntry, SheetRenderer, Symbology,
};
use serde::Serialize;

/// What the operator asked for.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub customer_id: String,
    pub requested_number: Option<String>,
    pub label: String,
    pub output_path: Option<PathBuf>,
}

/// A completed issuance.
#[derive(Debug, Clone, Serialize)]
pub struct IssueOutcome {
    pub customer_id: String,
    pub batch: IssuedBatch,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum IssueError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Zero-padded display form of an issued number.
pub fn format_number(number: u32) -> String {
    format!("{:0width$}", number, width = NUMBER_LEN)
}

/// Default sheet location for a batch.
pub fn default_output_path(output_dir: &Path, customer_id: &str, number: u32) -> PathBuf {
    output_dir.join(format!("{customer_id} - {}.html", format_number(number)))
}

/// Label shown under one barcode of a batch.
pub fn item_label(label: &str, suffix: u8) -> String {
    format!("{label} {suffix}")
}

/// Runs the issue workflow against injected collaborators.
pub struct Issuer<'a, S, R, H> {
    pub allocator: &'a Allocator<S>,
    pub renderer: &'a R,
    pub sheet_renderer: &'a H,
    pub options: &'a RenderOptions,
    pub output_dir: &'a Path,
}

impl<S, R, H> Issuer<'_, S, R, H>
where
    S: LedgerStore,
    R: BarcodeRenderer,
    H: SheetRenderer,
{
    pub fn issue(&self, request: &IssueRequest) -> Result<IssueOutcome, IssueError> {
        let customer_id = request.customer_id.as_str();
        let start = self
            .allocator
            .allocate(customer_id, request.requested_number.as_deref())?;
        let batch = expand(start)?;

        let used = self.allocator.store().used_numbers(customer_id)?;
        let overlap: Vec<u32> = batch
            .numbers()
            .into_iter()
            .filter(|n| used.contains(n))
            .collect();
        if !overlap.is_empty() {
            tracing::warn!(
                customer_id,
                start,
                ?overlap,
                "Batch reuses numbers already issued to this customer"
            );
        }

        let mut sheet = Sheet::new(format!("{customer_id} - {}", format_number(start)));
        for item in batch.items() {
            let label = item_label(&request.label, item.suffix);
            let number = format_number(item.number);
            let options = self.options.clone().with_label(label.clone());
            let image = self.renderer.render(Symbology::Ean13, &number, &options)?;
            sheet.push(SheetEntry {
                label,
                number,
                image,
            });
        }
        let document = self.sheet_renderer.render(&sheet)?;

        let output_path = request
            .output_path
            .clone()
            .unwrap_or_else(|| default_output_path(self.output_dir, customer_id, start));
        write_document(&output_path, &document)?;

        self.allocator
            .store()
            .record(customer_id, &batch.numbers())?;
        tracing::info!(
            customer_id,
            start,
            path = %output_path.display(),
            "Issued barcode batch"
        );

        Ok(IssueOutcome {
            customer_id: customer_id.to_string(),
            batch,
            output_path,
        })
    }
}

fn write_document(path: &Path, document: &str) -> Result<(), IssueError> {
    let write_err = |source| IssueError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, document).map_err(write_err)
}
