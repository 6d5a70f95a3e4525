//! X-axis reconstruction from header fields.
//!
//! The axis is always rebuilt as an evenly spaced sequence from `ffirst` to
//! `flast`. The `TXVALS` flag is not consulted: a plausible header range wins
//! even when the file claims to carry an explicit X array.

use serde::Serialize;
use tracing::{debug, warn};

use crate::header::Header;

/// Placeholder axis used when the header range cannot be trusted.
pub const PLACEHOLDER_FIRST: f64 = 400.0;
pub const PLACEHOLDER_LAST: f64 = 4000.0;

/// Whether the axis came from the header or was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AxisQuality {
    /// Built from the header's first/last X.
    Resolved,
    /// Header range implausible or point count zero; values are fabricated.
    Placeholder,
}

impl AxisQuality {
    /// Quality of the axis `header` describes.
    #[must_use]
    pub fn of(header: &Header) -> Self {
        if header.point_count > 0 && header.x_range.is_plausible() {
            Self::Resolved
        } else {
            Self::Placeholder
        }
    }
}

/// Reconstructed X values together with how they were obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub values: Vec<f64>,
    pub quality: AxisQuality,
}

/// Build `points` X values for `header`.
///
/// `points` is the number of samples actually decoded, never the raw header
/// count, so the axis is bounded by the buffer it came from.
#[must_use]
pub fn build_axis(header: &Header, points: usize) -> Axis {
    let range = header.x_range;
    let quality = AxisQuality::of(header);

    let (first, last) = match quality {
        AxisQuality::Resolved => {
            debug!(
                first = range.first,
                last = range.last,
                points,
                explicit_x = header.flags.has_x_array(),
                "using header X range"
            );
            (range.first, range.last)
        }
        AxisQuality::Placeholder => {
            warn!(
                first = range.first,
                last = range.last,
                points,
                "header X values implausible, substituting placeholder axis"
            );
            (PLACEHOLDER_FIRST, PLACEHOLDER_LAST)
        }
    };

    Axis {
        values: linspace(first, last, points),
        quality,
    }
}

/// `count` evenly spaced values from `start` to `stop`, both inclusive.
#[must_use]
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = stop;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{FieldWidth, XRange};

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(400.0, 4000.0, 1000);
        assert_eq!(values.len(), 1000);
        assert_eq!(values[0], 400.0);
        assert_eq!(values[999], 4000.0);
        assert!((values[1] - values[0] - 3600.0 / 999.0).abs() < 1e-9);
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        assert!(linspace(5.0, 9.0, 0).is_empty());
    }

    #[test]
    fn test_resolved_axis_ignores_x_array_flag() {
        let mut header = Header::new(11, 0.0, 10.0);
        header.flags = crate::header::TypeFlags::from_bits(crate::header::TypeFlags::X_ARRAY);
        let axis = build_axis(&header, 11);
        assert_eq!(axis.quality, AxisQuality::Resolved);
        assert_eq!(axis.values, linspace(0.0, 10.0, 11));
    }

    #[test]
    fn test_placeholder_on_implausible_range() {
        let mut header = Header::new(50, 0.0, 10.0);
        header.x_range = XRange::new(2e6, 10.0, FieldWidth::Double);
        let axis = build_axis(&header, 50);
        assert_eq!(axis.quality, AxisQuality::Placeholder);
        assert_eq!(axis.values.len(), 50);
        assert_eq!(axis.values[0], PLACEHOLDER_FIRST);
        assert_eq!(axis.values[49], PLACEHOLDER_LAST);
    }

    #[test]
    fn test_placeholder_on_zero_points() {
        let header = Header::new(0, 1.0, 2.0);
        assert_eq!(AxisQuality::of(&header), AxisQuality::Placeholder);
        let axis = build_axis(&header, 0);
        assert_eq!(axis.quality, AxisQuality::Placeholder);
        assert!(axis.values.is_empty());
    }

    #[test]
    fn test_axis_length_follows_decoded_samples() {
        let header = Header::new(u32::MAX, 100.0, 200.0);
        assert_eq!(AxisQuality::of(&header), AxisQuality::Resolved);
        let axis = build_axis(&header, 5);
        assert_eq!(axis.values, vec![100.0, 125.0, 150.0, 175.0, 200.0]);
    }
}
