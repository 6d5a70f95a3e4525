//! Sample transforms applied before writing.

/// Replace every sample below `threshold` with `threshold`.
///
/// Used to flatten negative peaks. NaN samples are left as they are.
#[must_use]
pub fn clip_below(values: &[f32], threshold: f32) -> Vec<f32> {
    values
        .iter()
        .map(|&v| if v < threshold { threshold } else { v })
        .collect()
}

/// Number of samples [`clip_below`] would change.
#[must_use]
pub fn count_below(values: &[f32], threshold: f32) -> usize {
    values.iter().filter(|&&v| v < threshold).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_below() {
        let values = [-3.0, 0.0, 2.5, -0.1, f32::NAN];
        let clipped = clip_below(&values, 0.0);
        assert_eq!(&clipped[..4], &[0.0, 0.0, 2.5, 0.0]);
        assert!(clipped[4].is_nan());
        assert_eq!(count_below(&values, 0.0), 2);
    }

    #[test]
    fn test_clip_to_positive_threshold() {
        assert_eq!(clip_below(&[1.0, 5.0, 9.0], 5.0), vec![5.0, 5.0, 9.0]);
    }
}
