//! Code classification and UPC conversion.
//!
//! A numeric string typed (or matched) at the register is classified by
//! length into one of three shapes:
//!
//! - **PLU**: 4-5 digits, produce lookup code
//! - **UPC**: 11-12 digits, retail barcode (12th digit is the checksum)
//! - **SKU**: 14 digits, internal code; stripping the 2-digit prefix
//!   yields a full UPC
//!
//! Everything here is a pure, total function: invalid input yields `None`,
//! never a panic. Strings are never mutated in place; conversions return
//! new strings.

use serde::Serialize;
use std::fmt;

/// Shape classification of a numeric code string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// 4-5 digit produce lookup code.
    Plu,
    /// 11-12 digit retail barcode.
    Upc,
    /// 14 digit internal code.
    Sku,
    /// No specific classification; the renderer falls back to a generic
    /// 1-D symbology and then to a 2-D code.
    #[default]
    None,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Classification::Plu => "plu",
            Classification::Upc => "upc",
            Classification::Sku => "sku",
            Classification::None => "none",
        };
        write!(f, "{}", value)
    }
}

fn digits_of_len(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// PLU shape: `^\d{4,5}$`.
pub fn is_plu(s: &str) -> bool {
    digits_of_len(s, 4, 5)
}

/// UPC shape: `^\d{11,12}$`.
pub fn is_upc(s: &str) -> bool {
    digits_of_len(s, 11, 12)
}

/// SKU shape: `^\d{14}$`.
pub fn is_sku(s: &str) -> bool {
    digits_of_len(s, 14, 14)
}

/// Classify a string by code shape.
pub fn classify(s: &str) -> Classification {
    if is_plu(s) {
        Classification::Plu
    } else if is_upc(s) {
        Classification::Upc
    } else if is_sku(s) {
        Classification::Sku
    } else {
        Classification::None
    }
}

/// Convert a 14-digit SKU to a 12-digit UPC by stripping its 2-digit
/// prefix. Returns `None` unless the input has SKU shape.
pub fn sku_to_upc(s: &str) -> Option<String> {
    if is_sku(s) {
        Some(sku_to_upc_unchecked(s))
    } else {
        None
    }
}

/// SKU conversion without the shape check. Callers must have already
/// classified the input as SKU.
pub fn sku_to_upc_unchecked(s: &str) -> String {
    s.chars().skip(2).collect()
}

/// Convert a 4-5 digit PLU to a full UPC: left-pad with zeros to 11
/// digits, then append the UPC-A check digit. Returns `None` unless the
/// input has PLU shape, so feeding an already-converted 12-digit UPC back
/// in can never double-transform.
pub fn plu_to_upc(s: &str) -> Option<String> {
    if is_plu(s) {
        Some(plu_to_upc_unchecked(s))
    } else {
        None
    }
}

/// PLU conversion without the shape check. Callers must have already
/// classified the input as PLU.
///
/// The check digit is always defined for an 11-digit all-digit string;
/// the 11-digit return path exists only to keep this total if that
/// invariant is ever broken upstream.
pub fn plu_to_upc_unchecked(s: &str) -> String {
    let mut upc = pad_to_11(s);
    if let Some(cd) = upc_check_digit(&upc) {
        upc.push((b'0' + cd) as char);
    }
    upc
}

/// Compute the UPC-A check digit for an 11-digit code.
///
/// Returns `None` unless the input matches `^\d{11,12}$`. The input is
/// left-padded with zeros to 11 digits first. Sum of digits at even
/// 0-indexed positions times 3, plus the sum at odd positions, mod 10;
/// a remainder of 0 gives check digit 0, otherwise `10 - remainder`.
pub fn upc_check_digit(s: &str) -> Option<u8> {
    if !is_upc(s) {
        return None;
    }
    let padded = pad_to_11(s);
    let mut even = 0u32;
    let mut odd = 0u32;
    for (i, b) in padded.bytes().enumerate() {
        let d = u32::from(b - b'0');
        if i % 2 == 0 {
            even += d;
        } else {
            odd += d;
        }
    }
    let rem = (even * 3 + odd) % 10;
    let cd = if rem == 0 { 0 } else { 10 - rem };
    Some(cd as u8)
}

/// Render a 12-digit UPC with its conventional grouping: quadrant digit,
/// manufacturer code, product code, check digit, separated by spaces.
/// Returns `None` unless the input is exactly 12 digits.
pub fn pretty_upc(s: &str) -> Option<String> {
    if !digits_of_len(s, 12, 12) {
        return None;
    }
    Some(format!("{} {} {} {}", &s[0..1], &s[1..6], &s[6..11], &s[11..12]))
}

fn pad_to_11(s: &str) -> String {
    if s.len() >= 11 {
        s.to_string()
    } else {
        format!("{}{}", "0".repeat(11 - s.len()), s)
    }
}

/// A code string resolved into everything the rendering layer needs: its
/// classification, the derived scannable UPC where one exists, and the
/// spaced display form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DerivedCode {
    /// The code string as entered or matched.
    pub raw: String,
    pub classification: Classification,
    /// Full 12-digit UPC derived from the raw value, when the shape
    /// allows one. `None` means the renderer falls back to CODE128 and
    /// then to a 2-D code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    /// Spaced display form of `upc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<String>,
}

/// Derive the scannable code for a raw value.
///
/// PLU values are expanded to a padded UPC with check digit; 11-digit
/// UPCs get their check digit appended; 12-digit UPCs pass through; SKUs
/// are stripped to their embedded UPC. Anything else carries no UPC and
/// the symbology fallback chain is the renderer's concern.
pub fn derive_code(raw: &str) -> DerivedCode {
    let classification = classify(raw);
    let upc = match classification {
        Classification::Plu => Some(plu_to_upc_unchecked(raw)),
        Classification::Upc => {
            if raw.len() == 12 {
                Some(raw.to_string())
            } else {
                // 11 digits: append the check digit to complete the code.
                Some(plu_like_complete(raw))
            }
        }
        Classification::Sku => Some(sku_to_upc_unchecked(raw)),
        Classification::None => None,
    };
    let pretty = upc.as_deref().and_then(pretty_upc);
    DerivedCode {
        raw: raw.to_string(),
        classification,
        upc,
        pretty,
    }
}

fn plu_like_complete(upc11: &str) -> String {
    let mut upc = upc11.to_string();
    if let Some(cd) = upc_check_digit(upc11) {
        upc.push((b'0' + cd) as char);
    }
    upc
}
