//! The fixed 512-byte main header.
//!
//! # Structure
//!
//! | Offset | Length | Field   | Description                          |
//! |--------|--------|---------|--------------------------------------|
//! | 0      | 1      | ftflgs  | [`TypeFlags`]                        |
//! | 1      | 1      | fversn  | file version                         |
//! | 2      | 1      | fexper  | [`ExperimentType`] code              |
//! | 3      | 1      | fexp    | fraction scaling exponent            |
//! | 4-7    | 4      | fnpts   | point count (u32 LE)                 |
//! | 8-23   | 16     | ffirst/flast | [`XRange`], width resolved on read |
//! | 28-31  | 4      | fnsub   | subfile count (u32 LE, 0 read as 1)  |
//!
//! Everything else in the block is opaque and only ever copied.

use serde::Serialize;

use super::experiment::ExperimentType;
use super::flags::TypeFlags;
use super::range::{FieldWidth, XRange, decode_x_range, encode_x_range_single};
use crate::error::{Result, SpcError};

/// Header block length in bytes.
pub const HEADER_LEN: usize = 512;

const FLAGS_OFFSET: usize = 0;
const VERSION_OFFSET: usize = 1;
const EXPERIMENT_OFFSET: usize = 2;
const EXPONENT_OFFSET: usize = 3;
const POINTS_OFFSET: usize = 4;
const RANGE_OFFSET: usize = 8;
const SUBFILES_OFFSET: usize = 28;

/// Decoded main header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub flags: TypeFlags,
    pub version: u8,
    /// Raw `fexper` byte; see [`Header::experiment_type`].
    pub experiment_code: u8,
    pub fraction_exponent: u8,
    pub point_count: u32,
    pub x_range: XRange,
    pub subfile_count: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            flags: TypeFlags::from_bits(TypeFlags::EVEN_SPACING),
            version: 1,
            experiment_code: ExperimentType::General.code(),
            fraction_exponent: 0,
            point_count: 0,
            x_range: XRange::new(400.0, 4000.0, FieldWidth::Single),
            subfile_count: 1,
        }
    }
}

impl Header {
    /// Header describing `point_count` evenly spaced points from `first` to `last`.
    #[must_use]
    pub fn new(point_count: u32, first: f64, last: f64) -> Self {
        Self {
            point_count,
            x_range: XRange::new(first, last, FieldWidth::Single),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_experiment(mut self, experiment: ExperimentType) -> Self {
        self.experiment_code = experiment.code();
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Known experiment type, if the code is one of the defined ones.
    #[must_use]
    pub fn experiment_type(&self) -> Option<ExperimentType> {
        ExperimentType::from_code(self.experiment_code)
    }

    /// Encode as a fresh header block.
    ///
    /// The even-spacing flag is always set, X is written as singles and the
    /// subfile count as 1. Bytes not listed in the layout are zero.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut block = [0u8; HEADER_LEN];
        block[FLAGS_OFFSET] = self.flags.with(TypeFlags::EVEN_SPACING).bits();
        block[VERSION_OFFSET] = self.version;
        block[EXPERIMENT_OFFSET] = self.experiment_code;
        block[EXPONENT_OFFSET] = self.fraction_exponent;
        block[POINTS_OFFSET..POINTS_OFFSET + 4].copy_from_slice(&self.point_count.to_le_bytes());
        block[RANGE_OFFSET..RANGE_OFFSET + 16].copy_from_slice(&encode_x_range_single(
            self.x_range.first,
            self.x_range.last,
        ));
        block[SUBFILES_OFFSET..SUBFILES_OFFSET + 4].copy_from_slice(&1u32.to_le_bytes());
        block
    }
}

/// Decode the main header from the start of `data`.
///
/// Fails only when `data` is shorter than [`HEADER_LEN`]. Implausible values
/// are returned as read.
pub fn decode_header(data: &[u8]) -> Result<Header> {
    let block: &[u8; HEADER_LEN] = data
        .get(..HEADER_LEN)
        .and_then(|slice| <&[u8; HEADER_LEN]>::try_from(slice).ok())
        .ok_or_else(|| SpcError::too_small(data.len()))?;

    let mut range_bytes = [0u8; 16];
    range_bytes.copy_from_slice(&block[RANGE_OFFSET..RANGE_OFFSET + 16]);

    Ok(Header {
        flags: TypeFlags::from_bits(block[FLAGS_OFFSET]),
        version: block[VERSION_OFFSET],
        experiment_code: block[EXPERIMENT_OFFSET],
        fraction_exponent: block[EXPONENT_OFFSET],
        point_count: read_u32(block, POINTS_OFFSET),
        x_range: decode_x_range(&range_bytes),
        subfile_count: read_u32(block, SUBFILES_OFFSET).max(1),
    })
}

fn read_u32(block: &[u8; HEADER_LEN], offset: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&block[offset..offset + 4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_header(points: u32, first: f64, last: f64) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[0] = 0x01;
        data[1] = 0x4b;
        data[2] = 4;
        data[4..8].copy_from_slice(&points.to_le_bytes());
        data[8..16].copy_from_slice(&first.to_le_bytes());
        data[16..24].copy_from_slice(&last.to_le_bytes());
        data
    }

    #[test]
    fn test_too_small() {
        let err = decode_header(&[0u8; HEADER_LEN - 1]).unwrap_err();
        assert!(matches!(
            err,
            SpcError::FormatTooSmall { len: 511, min: 512 }
        ));
    }

    #[test]
    fn test_decode_double_header() {
        let header = decode_header(&raw_header(1000, 400.0, 4000.0)).unwrap();
        assert!(header.flags.is_evenly_spaced());
        assert_eq!(header.version, 0x4b);
        assert_eq!(header.experiment_type(), Some(ExperimentType::FourierTransform));
        assert_eq!(header.point_count, 1000);
        assert_eq!(header.x_range, XRange::new(400.0, 4000.0, FieldWidth::Double));
        assert_eq!(header.subfile_count, 1);
    }

    #[test]
    fn test_subfile_count_read() {
        let mut data = raw_header(10, 1.0, 2.0);
        data[28..32].copy_from_slice(&3u32.to_le_bytes());
        assert_eq!(decode_header(&data).unwrap().subfile_count, 3);
    }

    #[test]
    fn test_encode_layout() {
        let header = Header::new(500, 400.0, 4000.0)
            .with_experiment(ExperimentType::UvVis)
            .with_flags(TypeFlags::from_bits(TypeFlags::ORDERED_X));
        let block = header.encode();

        assert_eq!(block[0], TypeFlags::ORDERED_X | TypeFlags::EVEN_SPACING);
        assert_eq!(block[2], 6);
        assert_eq!(&block[4..8], &500u32.to_le_bytes());
        assert_eq!(&block[8..12], &400.0f32.to_le_bytes());
        assert_eq!(&block[12..16], &4000.0f32.to_le_bytes());
        assert_eq!(&block[28..32], &1u32.to_le_bytes());
        assert!(block[32..].iter().all(|&b| b == 0));

        let decoded = decode_header(&block).unwrap();
        assert_eq!(decoded.x_range.width, FieldWidth::Single);
        assert_eq!(decoded.x_range.first, 400.0);
        assert_eq!(decoded.x_range.last, 4000.0);
        assert_eq!(decoded.point_count, 500);
    }
}
