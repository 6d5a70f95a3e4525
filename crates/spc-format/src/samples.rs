//! Little-endian float32 sample codec.

/// Bytes per stored Y sample.
pub const SAMPLE_WIDTH: usize = 4;

/// Byte length of `count` samples, or `None` on overflow.
#[must_use]
pub fn payload_len(count: usize) -> Option<usize> {
    count.checked_mul(SAMPLE_WIDTH)
}

/// Decode consecutive f32 values. Trailing bytes short of a whole sample are ignored.
#[must_use]
pub fn decode_samples(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(SAMPLE_WIDTH)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Encode samples as consecutive little-endian f32.
#[must_use]
pub fn encode_samples(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * SAMPLE_WIDTH);
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Decode `count` samples starting at `offset`, if they fit in `data`.
#[must_use]
pub fn samples_at(data: &[u8], offset: usize, count: usize) -> Option<Vec<f32>> {
    let len = payload_len(count)?;
    let end = offset.checked_add(len)?;
    data.get(offset..end).map(decode_samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_partial_sample() {
        let mut bytes = encode_samples(&[1.5, -2.0]);
        bytes.push(0xff);
        assert_eq!(decode_samples(&bytes), vec![1.5, -2.0]);
    }

    #[test]
    fn test_nan_bits_preserved() {
        let odd_nan = f32::from_bits(0x7fc0_1234);
        let bytes = encode_samples(&[odd_nan]);
        assert_eq!(bytes, 0x7fc0_1234u32.to_le_bytes());
        assert_eq!(decode_samples(&bytes)[0].to_bits(), 0x7fc0_1234);
    }

    #[test]
    fn test_samples_at_bounds() {
        let data = encode_samples(&[1.0, 2.0, 3.0]);
        assert_eq!(samples_at(&data, 4, 2), Some(vec![2.0, 3.0]));
        assert_eq!(samples_at(&data, 8, 2), None);
        assert_eq!(samples_at(&data, 12, 0), Some(Vec::new()));
        assert_eq!(samples_at(&data, usize::MAX, 1), None);
    }
}
