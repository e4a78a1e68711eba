use std::path::PathBuf;
use std::sync::LazyLock;

use label_render::text::sanitize_label;
use label_render::{BarcodeRenderer, RenderOptions, Symbology, save_jpeg};
use regex::Regex;

use crate::bootstrap;
use crate::cli::GenerateArgs;
use crate::config::AppConfig;

/// Digits accepted for a one-off image; EAN-13 pads them to 12.
static RE_GENERATE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,11}$").unwrap());

/// Check a one-off number: digits only and fewer than 12 of them.
pub fn validate_number(number: &str) -> Result<&str, anyhow::Error> {
    if !RE_GENERATE_NUMBER.is_match(number) {
        anyhow::bail!("Number must be digits only and less than 12 characters");
    }
    Ok(number)
}

/// Zero-pad to the 12 data digits both symbologies encode.
pub fn padded_data(number: &str) -> String {
    format!("{number:0>12}")
}

pub fn run(config: &AppConfig, args: GenerateArgs) -> Result<(), anyhow::Error> {
    let number = validate_number(&args.number)?;
    let symbology: Symbology = args.image_type.parse()?;
    let label = sanitize_label(&args.label);

    let renderer = bootstrap::build_renderer(config);
    let options = RenderOptions::new()
        .with_scale(config.scale)
        .with_border(config.border)
        .with_label(label);
    let image = renderer.render(symbology, &padded_data(number), &options)?;

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{number}.jpg")));
    save_jpeg(&image, &output_path)?;
    tracing::debug!(%symbology, path = %output_path.display(), "Saved image");
    println!("Barcode saved to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_number_cases() {
        assert!(validate_number("1").is_ok());
        assert!(validate_number("12345678901").is_ok());
        assert!(validate_number("123456789012").is_err());
        assert!(validate_number("").is_err());
        assert!(validate_number("12 34").is_err());
    }

    #[test]
    fn padded_data_is_twelve_digits() {
        assert_eq!(padded_data("123456"), "000000123456");
        assert_eq!(padded_data("12345678901"), "012345678901");
    }

    #[test]
    fn run_writes_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.jpg");
        let config = AppConfig {
            font_path: Some(dir.path().join("missing.ttf")),
            ..AppConfig::default()
        };
        let args = GenerateArgs {
            number: "123456".into(),
            label: "Box 1".into(),
            output: Some(output.clone()),
            image_type: "qr".into(),
        };
        run(&config, args).unwrap();
        assert!(image::open(&output).is_ok());
    }

    #[test]
    fn run_rejects_unknown_type() {
        let args = GenerateArgs {
            number: "123456".into(),
            label: String::new(),
            output: None,
            image_type: "pdf417".into(),
        };
        assert!(run(&AppConfig::default(), args).is_err());
    }
}
