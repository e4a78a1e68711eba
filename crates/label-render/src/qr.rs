//! QR code rasterization for labels.

use image::{GrayImage, Luma};
use qrcode::QrCode;

use crate::RenderError;

/// Light modules kept around the QR symbol.
pub const QUIET_ZONE: u32 = 4;

/// Render `data` as a QR code no wider than `target_width` pixels.
///
/// Each module is scaled by the largest whole factor that fits, with a
/// minimum of one pixel per module.
pub fn generate_qr(data: &str, target_width: u32) -> Result<GrayImage, RenderError> {
    if data.is_empty() {
        return Err(RenderError::InvalidData("QR data must not be empty".into()));
    }

    let code = QrCode::new(data.as_bytes()).map_err(|e| RenderError::Qr(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;
    let total_modules = module_count + QUIET_ZONE * 2;

    let scale = (target_width / total_modules).max(1);
    let img_size = total_modules * scale;

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let x = (i as u32) % module_count + QUIET_ZONE;
        let y = (i as u32) / module_count + QUIET_ZONE;
        for dx in 0..scale {
            for dy in 0..scale {
                img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
            }
        }
    }

    tracing::debug!(module_count, scale, img_size, "Rendered QR code");
    Ok(img)
}
