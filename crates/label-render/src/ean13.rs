//! EAN-13 symbol encoding and rasterization.

use image::{GrayImage, Luma};

use crate::RenderError;

/// Digits encoded by the symbol, excluding the check digit.
pub const DATA_LEN: usize = 12;

/// Modules in the symbol itself: guards, middle bar and 12 encoded digits.
pub const SYMBOL_MODULES: u32 = 95;

/// Light modules required left of the start guard.
pub const LEFT_QUIET_ZONE: u32 = 11;

/// Light modules required right of the end guard.
pub const RIGHT_QUIET_ZONE: u32 = 7;

/// Extra height (in modules) of the guard bars below the data bars.
pub const GUARD_EXTENSION: u32 = 5;

/// L-code bit patterns, most significant bit first.
const L_CODES: [u8; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

/// Parity of left-half digits 2-7, selected by the first digit. `true` is G.
const PARITY: [[bool; 6]; 10] = [
    [false, false, false, false, false, false],
    [false, false, true, false, true, true],
    [false, false, true, true, false, true],
    [false, false, true, true, true, false],
    [false, true, false, false, true, true],
    [false, true, true, false, false, true],
    [false, true, true, true, false, false],
    [false, true, false, true, false, true],
    [false, true, false, true, true, false],
    [false, true, true, false, true, false],
];

/// Zero-pad a digit string to the 12 data digits of an EAN-13 symbol.
pub fn pad_data(data: &str) -> Result<String, RenderError> {
    if data.is_empty() || !data.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RenderError::InvalidData(format!(
            "EAN-13 data must be decimal digits, got {data:?}"
        )));
    }
    if data.len() > DATA_LEN {
        return Err(RenderError::InvalidData(format!(
            "EAN-13 data must be at most {} digits, got {}",
            DATA_LEN,
            data.len()
        )));
    }
    Ok(format!("{:0>width$}", data, width = DATA_LEN))
}

/// Compute the check digit for 12 data digits.
pub fn check_digit(data: &[u8; DATA_LEN]) -> u8 {
    let sum: u32 = data
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// A fully encoded EAN-13 symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ean13 {
    digits: [u8; 13],
}

impl Ean13 {
    /// Build a symbol from up to 12 data digits, zero-padded on the left.
    pub fn new(data: &str) -> Result<Self, RenderError> {
        let padded = pad_data(data)?;
        let mut body = [0u8; DATA_LEN];
        for (slot, b) in body.iter_mut().zip(padded.bytes()) {
            *slot = b - b'0';
        }
        let mut digits = [0u8; 13];
        digits[..DATA_LEN].copy_from_slice(&body);
        digits[DATA_LEN] = check_digit(&body);
        Ok(Self { digits })
    }

    /// The 13 human-readable digits, check digit included.
    pub fn text(&self) -> String {
        self.digits.iter().map(|d| char::from(b'0' + d)).collect()
    }

    /// Module pattern of the symbol, `true` for a dark module.
    pub fn modules(&self) -> Vec<bool> {
        let mut out = Vec::with_capacity(SYMBOL_MODULES as usize);
        push_bits(&mut out, 0b101, 3);

        let parity = PARITY[usize::from(self.digits[0])];
        for (i, &d) in self.digits[1..7].iter().enumerate() {
            let l = L_CODES[usize::from(d)];
            let code = if parity[i] { g_code(l) } else { l };
            push_bits(&mut out, code, 7);
        }

        push_bits(&mut out, 0b01010, 5);

        for &d in &self.digits[7..] {
            push_bits(&mut out, r_code(L_CODES[usize::from(d)]), 7);
        }

        push_bits(&mut out, 0b101, 3);
        out
    }

    /// Rasterize the symbol with quiet zones.
    ///
    /// Each module is `module_width` pixels wide; data bars are
    /// `bar_height` pixels tall and guard bars extend below them.
    pub fn render(&self, module_width: u32, bar_height: u32) -> GrayImage {
        let module_width = module_width.max(1);
        let guard_extra = GUARD_EXTENSION * module_width;
        let width = (LEFT_QUIET_ZONE + SYMBOL_MODULES + RIGHT_QUIET_ZONE) * module_width;
        let height = bar_height + guard_extra;
        let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));

        for (i, dark) in self.modules().into_iter().enumerate() {
            if !dark {
                continue;
            }
            let i = i as u32;
            let bottom = if is_guard_module(i) { height } else { bar_height };
            let x0 = (LEFT_QUIET_ZONE + i) * module_width;
            for x in x0..x0 + module_width {
                for y in 0..bottom {
                    img.put_pixel(x, y, Luma([0u8]));
                }
            }
        }

        img
    }
}

fn push_bits(out: &mut Vec<bool>, bits: u8, len: u32) {
    for shift in (0..len).rev() {
        out.push((bits >> shift) & 1 == 1);
    }
}

fn r_code(l: u8) -> u8 {
    !l & 0x7F
}

fn g_code(l: u8) -> u8 {
    r_code(l).reverse_bits() >> 1
}

fn is_guard_module(i: u32) -> bool {
    i < 3 || (45..50).contains(&i) || i >= SYMBOL_MODULES - 3
}
