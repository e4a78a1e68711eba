//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

const DEFS: &[DefTuple] = &[
    (
        "BARCODE_LEDGER_PATH",
        "",
        "Ledger location (empty: data_store.json or data_store.db by backend)",
    ),
    ("BARCODE_LEDGER_BACKEND", "json", "Ledger backend: json or sqlite"),
    ("BARCODE_OUTPUT_DIR", "outputs", "Directory for generated HTML sheets"),
    ("BARCODE_FONT_PATH", "", "TTF/OTF font for labels (empty: system font)"),
    ("BARCODE_DEFAULT_LABEL", "Demo", "Label printed under issued barcodes"),
    ("BARCODE_SCALE", "2", "Pixels per barcode module"),
    ("BARCODE_BORDER", "10", "White border around each image in pixels"),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::validate_setting;

    #[test]
    fn every_default_passes_validation() {
        for def in DEFAULT_SETTINGS.values() {
            assert!(
                validate_setting(def.key, def.default).is_ok(),
                "default for {} is invalid",
                def.key
            );
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn unknown_key_has_no_default() {
        assert_eq!(get_default("BARCODE_LABEL"), None);
        assert_eq!(get_default("BARCODE_DEFAULT_LABEL"), Some("Demo"));
    }
}
