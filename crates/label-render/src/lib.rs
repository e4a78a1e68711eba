//! Barcode and QR label rendering.
//!
//! Provides EAN-13 and QR rasterization, text labels drawn under the
//! symbol, and an HTML sheet that embeds a batch of rendered barcodes.

pub mod compose;
pub mod ean13;
pub mod font;
pub mod qr;
pub mod renderer;
pub mod sheet;
pub mod text;

// Re-exports for convenience
pub use font::load_font;
pub use renderer::{
    BarcodeRenderer, RasterRenderer, RenderOptions, Symbology, encode_png, save_jpeg,
};
pub use sheet::{HtmlSheet, Sheet, SheetEntry, SheetRenderer};

/// Errors that can occur while rendering a label or sheet.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Invalid barcode data: {0}")]
    InvalidData(String),

    #[error("QR encode error: {0}")]
    Qr(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Font error: {0}")]
    Font(String),
}
