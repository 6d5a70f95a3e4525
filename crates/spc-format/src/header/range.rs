//! First/last X decoding with width disambiguation.
//!
//! Bytes 8..24 hold `ffirst`/`flast` either as two little-endian doubles
//! (8..16, 16..24) or as two singles packed into 8..16. Nothing in the header
//! says which, so the double reading is tried first and discarded when either
//! value is absurdly large.

use serde::Serialize;

/// Magnitude above which a double reading is taken to be a misread pair of singles.
pub const WIDTH_SWITCH_LIMIT: f64 = 1e10;

/// Magnitude below which first/last X are trusted for axis reconstruction.
pub const PLAUSIBLE_LIMIT: f64 = 1e6;

/// Encoding width the X range was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldWidth {
    /// Two f64 at offsets 8 and 16.
    Double,
    /// Two f32 at offsets 8 and 12.
    Single,
}

impl FieldWidth {
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::Double => 8,
            Self::Single => 4,
        }
    }
}

/// First and last X values tagged with the width they were read at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XRange {
    pub first: f64,
    pub last: f64,
    pub width: FieldWidth,
}

impl XRange {
    #[must_use]
    pub const fn new(first: f64, last: f64, width: FieldWidth) -> Self {
        Self { first, last, width }
    }

    /// Both ends have magnitude below [`PLAUSIBLE_LIMIT`].
    #[must_use]
    pub fn is_plausible(&self) -> bool {
        self.first.abs() < PLAUSIBLE_LIMIT && self.last.abs() < PLAUSIBLE_LIMIT
    }
}

/// Decode the 16 bytes at header offset 8.
#[must_use]
pub fn decode_x_range(bytes: &[u8; 16]) -> XRange {
    let first = f64::from_le_bytes(array_at(bytes, 0));
    let last = f64::from_le_bytes(array_at(bytes, 8));
    if first.abs() > WIDTH_SWITCH_LIMIT || last.abs() > WIDTH_SWITCH_LIMIT {
        let first = f32::from_le_bytes(array_at(bytes, 0));
        let last = f32::from_le_bytes(array_at(bytes, 4));
        return XRange::new(f64::from(first), f64::from(last), FieldWidth::Single);
    }
    XRange::new(first, last, FieldWidth::Double)
}

/// Encode a range as two singles at the start of a 16-byte field.
///
/// The trailing 8 bytes are left zero.
#[must_use]
pub fn encode_x_range_single(first: f64, last: f64) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..4].copy_from_slice(&(first as f32).to_le_bytes());
    out[4..8].copy_from_slice(&(last as f32).to_le_bytes());
    out
}

fn array_at<const N: usize>(bytes: &[u8; 16], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}
