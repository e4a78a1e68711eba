//! Symbol rendering behind the [`BarcodeRenderer`] seam.

use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageFormat};

use crate::compose;
use crate::ean13::Ean13;
use crate::qr;
use crate::text::DEFAULT_FONT_SIZE;
use crate::RenderError;

/// Which symbol to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbology {
    #[default]
    Ean13,
    Qr,
}

impl FromStr for Symbology {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "barcode" | "ean13" => Ok(Self::Ean13),
            "qr" | "qrcode" => Ok(Self::Qr),
            other => Err(RenderError::InvalidData(format!(
                "image type must be one of: barcode, qr (got {other:?})"
            ))),
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ean13 => f.write_str("barcode"),
            Self::Qr => f.write_str("qr"),
        }
    }
}

/// Options controlling symbol size and the text drawn under it.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Pixels per barcode module.
    pub scale: u32,

    /// Height of the EAN-13 data bars, in modules.
    pub bar_height: u32,

    /// Target width of a QR symbol in pixels.
    pub qr_width: u32,

    /// White border added around the finished image.
    pub border: u32,

    /// Print the encoded digits under the symbol.
    pub include_text: bool,

    /// Extra text printed under the digits.
    pub label: Option<String>,

    /// Text size in pixels.
    pub font_size: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            bar_height: 50,
            qr_width: 200,
            border: 10,
            include_text: true,
            label: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the extra label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = (!label.is_empty()).then_some(label);
        self
    }

    /// Builder: set pixels per module.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    /// Builder: set the border width.
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Builder: toggle the human-readable digits.
    pub fn with_include_text(mut self, val: bool) -> Self {
        self.include_text = val;
        self
    }
}

/// Turns a digit string into a raster image.
pub trait BarcodeRenderer {
    fn render(
        &self,
        symbology: Symbology,
        data: &str,
        options: &RenderOptions,
    ) -> Result<DynamicImage, RenderError>;
}

/// Renders EAN-13 and QR symbols with `image`/`qrcode`.
///
/// Without a font the symbol is rendered bare and text is skipped.
pub struct RasterRenderer {
    font: Option<FontVec>,
}

impl RasterRenderer {
    pub fn new(font: Option<FontVec>) -> Self {
        Self { font }
    }

    pub fn without_font() -> Self {
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

impl BarcodeRenderer for RasterRenderer {
    fn render(
        &self,
        symbology: Symbology,
        data: &str,
        options: &RenderOptions,
    ) -> Result<DynamicImage, RenderError> {
        let scale = options.scale.max(1);
        let (symbol, digits) = match symbology {
            Symbology::Ean13 => {
                let code = Ean13::new(data)?;
                (code.render(scale, options.bar_height * scale), code.text())
            }
            Symbology::Qr => (qr::generate_qr(data, options.qr_width)?, data.to_string()),
        };

        let mut lines: Vec<&str> = Vec::new();
        if options.include_text {
            lines.push(&digits);
        }
        if let Some(label) = options.label.as_deref() {
            lines.push(label);
        }

        let image = match (&self.font, lines.is_empty()) {
            (_, true) => DynamicImage::ImageLuma8(symbol),
            (Some(font), false) => {
                compose::stack_text(&symbol, &lines, font, PxScale::from(options.font_size))
            }
            (None, false) => {
                tracing::warn!(%symbology, data, "No font loaded, rendering symbol without text");
                DynamicImage::ImageLuma8(symbol)
            }
        };

        Ok(compose::add_border(&image, options.border))
    }
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, RenderError> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Save an image as JPEG, flattening any alpha channel.
pub fn save_jpeg(image: &DynamicImage, path: &Path) -> Result<(), RenderError> {
    DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, ImageFormat::Jpeg)?;
    Ok(())
}
