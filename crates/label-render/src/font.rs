//! Label font loading.

use std::path::Path;

use ab_glyph::FontVec;

use crate::RenderError;

/// Load a TTF/OTF font from `path`, or from the first installed system font
/// when no path is given.
pub fn load_font(path: Option<&Path>) -> Result<FontVec, RenderError> {
    let data = match path {
        Some(path) => std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("failed to read {}: {e}", path.display())))?,
        None => load_system_font_data()?,
    };
    parse_font(data)
}

/// Parse raw TTF/OTF bytes.
pub fn parse_font(data: Vec<u8>) -> Result<FontVec, RenderError> {
    FontVec::try_from_vec(data)
        .map_err(|_| RenderError::Font("failed to parse font data (TTF/OTF)".to_string()))
}

fn load_system_font_data() -> Result<Vec<u8>, RenderError> {
    for path in system_font_candidates() {
        if let Ok(data) = std::fs::read(path) {
            tracing::info!(path = %path, "Using system font for labels");
            return Ok(data);
        }
    }
    Err(RenderError::Font(
        "no usable label font found (set a font path or install system fonts)".to_string(),
    ))
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/Library/Fonts/Arial.ttf",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        ]
    }
}
