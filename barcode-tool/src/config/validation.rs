//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_FONT_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(ttf|otf|ttc)$").unwrap());

/// Maximum length of the default label.
const MAX_LABEL_LEN: usize = 64;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "BARCODE_LEDGER_BACKEND" => {
            if value != "json" && value != "sqlite" {
                return Err("must be 'json' or 'sqlite'".into());
            }
        }
        "BARCODE_OUTPUT_DIR" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "BARCODE_FONT_PATH" => {
            if !value.is_empty() && !RE_FONT_FILE.is_match(value) {
                return Err("must point to a .ttf, .otf or .ttc file".into());
            }
        }
        "BARCODE_DEFAULT_LABEL" => {
            if value.chars().count() > MAX_LABEL_LEN {
                return Err(format!("must be at most {MAX_LABEL_LEN} characters"));
            }
        }
        "BARCODE_SCALE" => validate_int_range(value, 1, 10)?,
        "BARCODE_BORDER" => validate_int_range(value, 0, 100)?,
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: u32, max: u32) -> Result<(), String> {
    let v: u32 = value.parse().map_err(|_| "must be a non-negative integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_backend() {
        assert!(validate_setting("BARCODE_LEDGER_BACKEND", "json").is_ok());
        assert!(validate_setting("BARCODE_LEDGER_BACKEND", "sqlite").is_ok());
        assert!(validate_setting("BARCODE_LEDGER_BACKEND", "redis").is_err());
    }

    #[test]
    fn test_valid_font_path() {
        assert!(validate_setting("BARCODE_FONT_PATH", "").is_ok());
        assert!(validate_setting("BARCODE_FONT_PATH", "fonts/Arial.TTF").is_ok());
        assert!(validate_setting("BARCODE_FONT_PATH", "/usr/share/fonts/x.otf").is_ok());
        assert!(validate_setting("BARCODE_FONT_PATH", "arial.woff2").is_err());
    }

    #[test]
    fn test_valid_ranges() {
        assert!(validate_setting("BARCODE_SCALE", "1").is_ok());
        assert!(validate_setting("BARCODE_SCALE", "0").is_err());
        assert!(validate_setting("BARCODE_SCALE", "two").is_err());
        assert!(validate_setting("BARCODE_BORDER", "0").is_ok());
        assert!(validate_setting("BARCODE_BORDER", "-1").is_err());
        assert!(validate_setting("BARCODE_BORDER", "101").is_err());
    }

    #[test]
    fn test_label_length() {
        assert!(validate_setting("BARCODE_DEFAULT_LABEL", "Demo").is_ok());
        assert!(validate_setting("BARCODE_DEFAULT_LABEL", &"x".repeat(65)).is_err());
    }
}
