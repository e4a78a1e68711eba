//! HTML sheet assembly for a batch of rendered barcodes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Local};
use image::DynamicImage;

use crate::RenderError;
use crate::renderer::encode_png;

/// One barcode on a sheet.
#[derive(Debug, Clone)]
pub struct SheetEntry {
    pub label: String,
    pub number: String,
    pub image: DynamicImage,
}

/// A titled, ordered set of barcodes.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub title: String,
    pub entries: Vec<SheetEntry>,
    pub generated_at: DateTime<Local>,
}

impl Sheet {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
            generated_at: Local::now(),
        }
    }

    pub fn push(&mut self, entry: SheetEntry) {
        self.entries.push(entry);
    }
}

/// Turns a sheet into a text document.
pub trait SheetRenderer {
    fn render(&self, sheet: &Sheet) -> Result<String, RenderError>;
}

/// Standalone HTML page with every barcode embedded as a PNG data URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSheet;

const STYLE: &str = "body{font-family:sans-serif;margin:24px}\
.sheet{display:flex;flex-wrap:wrap;gap:24px}\
figure.barcode{margin:0;text-align:center;page-break-inside:avoid}\
figcaption{margin-top:4px;font-size:14px}\
footer{margin-top:24px;color:#808080;font-size:12px}";

impl SheetRenderer for HtmlSheet {
    fn render(&self, sheet: &Sheet) -> Result<String, RenderError> {
        let title = escape_html(&sheet.title);
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!(
            "<title>{title}</title>\n<style>{}</style>\n",
            STYLE
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{title}</h1>\n<div class=\"sheet\">\n"));

        for entry in &sheet.entries {
            let png = encode_png(&entry.image)?;
            let data = STANDARD.encode(png);
            let label = escape_html(&entry.label);
            let number = escape_html(&entry.number);
            html.push_str(&format!(
                "<figure class=\"barcode\">\n\
                 <img src=\"data:image/png;base64,{data}\" alt=\"{number}\" \
                 width=\"{}\" height=\"{}\">\n\
                 <figcaption><span class=\"label\">{label}</span> \
                 <span class=\"number\">{number}</span></figcaption>\n\
                 </figure>\n",
                entry.image.width(),
                entry.image.height(),
            ));
        }

        let generated = sheet.generated_at.format("%Y-%m-%d %H:%M");
        html.push_str(&format!(
            "</div>\n<footer>Generated {generated}</footer>\n</body>\n</html>\n"
        ));
        Ok(html)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
