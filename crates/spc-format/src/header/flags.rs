//! File type flag byte (`ftflgs`).
//!
//! | Bit | Mask | Name   | Meaning                         |
//! |-----|------|--------|---------------------------------|
//! | 0   | 0x01 | TSPREC | precision / even-spacing        |
//! | 1   | 0x02 | TCGRAM | reserved                        |
//! | 2   | 0x04 | TMULTI | multiple Y values per X         |
//! | 3   | 0x08 | TRANDM | randomly spaced X               |
//! | 4   | 0x10 | TORDRD | ordered X data                  |
//! | 5   | 0x20 | TALABS | X axis label present            |
//! | 6   | 0x40 | TXYXYS | interleaved X,Y pairs           |
//! | 7   | 0x80 | TXVALS | explicit X array present        |

use std::fmt;

use serde::Serialize;

/// Bitfield stored in byte 0 of the header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeFlags(u8);

impl TypeFlags {
    pub const EVEN_SPACING: u8 = 0x01;
    pub const RESERVED: u8 = 0x02;
    pub const MULTI_Y: u8 = 0x04;
    pub const RANDOM_X: u8 = 0x08;
    pub const ORDERED_X: u8 = 0x10;
    pub const AXIS_LABELS: u8 = 0x20;
    pub const XY_PAIRS: u8 = 0x40;
    pub const X_ARRAY: u8 = 0x80;

    const NAMES: [(u8, &'static str); 8] = [
        (Self::EVEN_SPACING, "TSPREC"),
        (Self::RESERVED, "TCGRAM"),
        (Self::MULTI_Y, "TMULTI"),
        (Self::RANDOM_X, "TRANDM"),
        (Self::ORDERED_X, "TORDRD"),
        (Self::AXIS_LABELS, "TALABS"),
        (Self::XY_PAIRS, "TXYXYS"),
        (Self::X_ARRAY, "TXVALS"),
    ];

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    /// Copy of these flags with `mask` set.
    #[must_use]
    pub const fn with(self, mask: u8) -> Self {
        Self(self.0 | mask)
    }

    #[must_use]
    pub const fn is_evenly_spaced(self) -> bool {
        self.contains(Self::EVEN_SPACING)
    }

    /// Nominally signals an explicit X array. Axis reconstruction does not
    /// consult this bit.
    #[must_use]
    pub const fn has_x_array(self) -> bool {
        self.contains(Self::X_ARRAY)
    }

    /// Names of the bits that are set, lowest bit first.
    pub fn set_names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(mask, _)| self.contains(*mask))
            .map(|(_, name)| name)
    }
}

impl From<u8> for TypeFlags {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl fmt::Display for TypeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x} ({:08b})", self.0, self.0)
    }
}
