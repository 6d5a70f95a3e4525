//! Locating the Y sample payload.
//!
//! The header does not say where the samples start. Reading tries a fixed
//! list of candidate offsets and falls back to "everything after the header".
//! Writing must find the bytes that actually hold the samples that were
//! parsed, so it runs a chain of [`LocatorStrategy`] implementations: an
//! exact comparison at the candidate offsets, then a correlation scan over
//! every 4-byte aligned offset.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, SpcError};
use crate::header::HEADER_LEN;
use crate::samples::{SAMPLE_WIDTH, decode_samples, payload_len, samples_at};
use crate::types::SpcWriterOptions;

/// Offsets tried, in order, for the start of the payload.
pub const CANDIDATE_OFFSETS: [usize; 5] = [512, 256, 128, 64, 32];

/// Where the parsed samples were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PayloadSource {
    /// A full `point_count` slice at one of [`CANDIDATE_OFFSETS`].
    Candidate { offset: usize },
    /// Whole samples between the header and end of file.
    Tail { offset: usize },
}

impl PayloadSource {
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Candidate { offset } | Self::Tail { offset } => offset,
        }
    }
}

/// Samples read during parse.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadSlice {
    pub source: PayloadSource,
    pub samples: Vec<f32>,
}

/// Read `point_count` samples for a fresh parse.
///
/// The first candidate offset whose slice fits is taken without inspecting
/// the values. When none fits, the bytes after the header are read as whole
/// samples.
pub fn locate_for_parse(data: &[u8], point_count: usize) -> Result<PayloadSlice> {
    for offset in CANDIDATE_OFFSETS {
        if let Some(samples) = samples_at(data, offset, point_count) {
            debug!(offset, points = point_count, "payload at candidate offset");
            return Ok(PayloadSlice {
                source: PayloadSource::Candidate { offset },
                samples,
            });
        }
    }

    let tail = data.get(HEADER_LEN..).unwrap_or_default();
    let points = tail.len() / SAMPLE_WIDTH;
    if points == 0 {
        return Err(SpcError::NoPayloadFound);
    }
    warn!(
        expected = point_count,
        found = points,
        "payload does not fit at any candidate offset, reading tail"
    );
    Ok(PayloadSlice {
        source: PayloadSource::Tail { offset: HEADER_LEN },
        samples: decode_samples(&tail[..points * SAMPLE_WIDTH]),
    })
}

/// One way of finding known samples inside a buffer.
pub trait LocatorStrategy {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Byte offset at which `expected` is stored in `data`, if found.
    fn locate(&self, data: &[u8], expected: &[f32]) -> Option<usize>;

    /// Whether a hit means the payload was not where the reader put it.
    fn is_fallback(&self) -> bool {
        false
    }
}

/// Elementwise closeness test, `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1e-5,
            absolute: 1e-6,
        }
    }
}

impl Tolerance {
    /// `b` is the reference value. Equal infinities are close; NaN never is.
    #[must_use]
    pub fn is_close(&self, a: f32, b: f32) -> bool {
        if a == b {
            return true;
        }
        let (a, b) = (f64::from(a), f64::from(b));
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }

    #[must_use]
    pub fn all_close(&self, actual: &[f32], expected: &[f32]) -> bool {
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected)
                .all(|(&a, &b)| self.is_close(a, b))
    }
}

/// Compare the slice at each candidate offset against the expected samples.
#[derive(Debug, Clone)]
pub struct CandidateMatch {
    pub offsets: Vec<usize>,
    pub tolerance: Tolerance,
}

impl Default for CandidateMatch {
    fn default() -> Self {
        Self {
            offsets: CANDIDATE_OFFSETS.to_vec(),
            tolerance: Tolerance::default(),
        }
    }
}

impl CandidateMatch {
    pub const NAME: &'static str = "candidate-match";
}

impl LocatorStrategy for CandidateMatch {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn locate(&self, data: &[u8], expected: &[f32]) -> Option<usize> {
        self.offsets.iter().copied().find(|&offset| {
            samples_at(data, offset, expected.len())
                .is_some_and(|found| self.tolerance.all_close(&found, expected))
        })
    }
}

/// Scan every 4-byte aligned offset for a slice strongly correlated with
/// the expected samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationScan {
    /// Pearson coefficient that must be exceeded.
    pub threshold: f64,
}

impl Default for CorrelationScan {
    fn default() -> Self {
        Self { threshold: 0.99 }
    }
}

impl CorrelationScan {
    pub const NAME: &'static str = "correlation-scan";
}

impl LocatorStrategy for CorrelationScan {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn is_fallback(&self) -> bool {
        true
    }

    fn locate(&self, data: &[u8], expected: &[f32]) -> Option<usize> {
        let len = payload_len(expected.len())?;
        let last = data.len().checked_sub(len)?;
        let reference = Centered::new(expected.iter().map(|&v| f64::from(v)))?;

        (0..=last).step_by(SAMPLE_WIDTH).find(|&offset| {
            let window = decode_samples(&data[offset..offset + len]);
            reference
                .correlation(window.iter().map(|&v| f64::from(v)))
                .is_some_and(|r| r > self.threshold)
        })
    }
}

/// Mean-centred copy of a series for repeated Pearson correlations.
struct Centered {
    deviations: Vec<f64>,
    norm: f64,
}

impl Centered {
    fn new(values: impl ExactSizeIterator<Item = f64> + Clone) -> Option<Self> {
        let n = values.len();
        if n < 2 {
            return None;
        }
        let mean = values.clone().sum::<f64>() / n as f64;
        let deviations: Vec<f64> = values.map(|v| v - mean).collect();
        let norm = deviations.iter().map(|d| d * d).sum::<f64>().sqrt();
        (norm.is_finite() && norm > 0.0).then_some(Self { deviations, norm })
    }

    /// Pearson coefficient against `other`; `None` when undefined.
    fn correlation(&self, other: impl ExactSizeIterator<Item = f64> + Clone) -> Option<f64> {
        let other = Centered::new(other)?;
        if other.deviations.len() != self.deviations.len() {
            return None;
        }
        let dot: f64 = self
            .deviations
            .iter()
            .zip(&other.deviations)
            .map(|(a, b)| a * b)
            .sum();
        let r = dot / (self.norm * other.norm);
        r.is_finite().then_some(r)
    }
}

/// Pearson correlation coefficient of two equal-length series.
#[must_use]
pub fn pearson(a: &[f32], b: &[f32]) -> Option<f64> {
    Centered::new(a.iter().map(|&v| f64::from(v)))?.correlation(b.iter().map(|&v| f64::from(v)))
}

/// Offset found by a [`LocatorChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadMatch {
    pub offset: usize,
    pub strategy: &'static str,
}

/// Ordered list of strategies; the first hit wins.
pub struct LocatorChain {
    strategies: Vec<Box<dyn LocatorStrategy + Send + Sync>>,
}

impl LocatorChain {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: impl LocatorStrategy + Send + Sync + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Chain used by the writer: exact candidates, then (if enabled) the scan.
    #[must_use]
    pub fn from_options(options: &SpcWriterOptions) -> Self {
        let chain = Self::new().with_strategy(CandidateMatch {
            offsets: CANDIDATE_OFFSETS.to_vec(),
            tolerance: Tolerance {
                relative: options.relative_tolerance,
                absolute: options.absolute_tolerance,
            },
        });
        if options.correlation_scan {
            chain.with_strategy(CorrelationScan {
                threshold: options.correlation_threshold,
            })
        } else {
            chain
        }
    }

    /// Find `expected` in `data`.
    pub fn locate(&self, data: &[u8], expected: &[f32]) -> Result<PayloadMatch> {
        for strategy in &self.strategies {
            if let Some(offset) = strategy.locate(data, expected) {
                let name = strategy.name();
                if strategy.is_fallback() {
                    info!(offset, strategy = name, "located payload");
                } else {
                    debug!(offset, strategy = name, "located payload");
                }
                return Ok(PayloadMatch {
                    offset,
                    strategy: name,
                });
            }
            debug!(strategy = strategy.name(), "payload not found");
        }
        Err(SpcError::PayloadLocationNotFound {
            samples: expected.len(),
        })
    }
}

impl Default for LocatorChain {
    fn default() -> Self {
        Self::from_options(&SpcWriterOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::encode_samples;

    fn buffer_with(offset: usize, samples: &[f32], total: usize) -> Vec<u8> {
        let mut data = vec![0u8; total];
        let bytes = encode_samples(samples);
        data[offset..offset + bytes.len()].copy_from_slice(&bytes);
        data
    }

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| (i as f32 * 0.37).sin() * 10.0 + 3.0).collect()
    }

    #[test]
    fn test_parse_prefers_first_fitting_candidate() {
        let samples = ramp(10);
        let data = buffer_with(512, &samples, 512 + 40);
        let slice = locate_for_parse(&data, 10).unwrap();
        assert_eq!(slice.source, PayloadSource::Candidate { offset: 512 });
        assert_eq!(slice.samples, samples);
    }

    #[test]
    fn test_parse_falls_back_to_smaller_candidate() {
        // 100 points need 400 bytes: 512 and 256 do not fit in 600, 128 does
        let data = vec![0u8; 600];
        let slice = locate_for_parse(&data, 100).unwrap();
        assert_eq!(slice.source, PayloadSource::Candidate { offset: 128 });
        assert_eq!(slice.samples.len(), 100);
    }

    #[test]
    fn test_parse_tail_fallback() {
        let data = vec![0u8; 512 + 4 * 7 + 3];
        let slice = locate_for_parse(&data, 1000).unwrap();
        assert_eq!(slice.source, PayloadSource::Tail { offset: 512 });
        assert_eq!(slice.samples.len(), 7);
    }

    #[test]
    fn test_parse_no_payload() {
        let err = locate_for_parse(&[0u8; 515], 1000).unwrap_err();
        assert!(matches!(err, SpcError::NoPayloadFound));
    }

    #[test]
    fn test_tolerance() {
        let tol = Tolerance::default();
        assert!(tol.is_close(100.0, 100.0005));
        assert!(!tol.is_close(100.0, 100.01));
        assert!(tol.is_close(0.0, 0.000_000_5));
        assert!(tol.is_close(f32::INFINITY, f32::INFINITY));
        assert!(!tol.is_close(f32::NAN, f32::NAN));
        assert!(!tol.all_close(&[1.0], &[1.0, 2.0]));
    }

    #[test]
    fn test_candidate_match_skips_wrong_data() {
        let samples = ramp(16);
        // fits at 512 too, but only 256 holds the samples
        let data = buffer_with(256, &samples, 512 + 64);
        let found = CandidateMatch::default().locate(&data, &samples);
        assert_eq!(found, Some(256));
    }

    #[test]
    fn test_correlation_scan_finds_unaligned_candidate() {
        let samples = ramp(32);
        let data = buffer_with(700, &samples, 1024);
        assert_eq!(CandidateMatch::default().locate(&data, &samples), None);
        assert_eq!(CorrelationScan::default().locate(&data, &samples), Some(700));
    }

    #[test]
    fn test_correlation_scan_accepts_scaled_copy() {
        let samples = ramp(32);
        let scaled: Vec<f32> = samples.iter().map(|v| v * 2.0 + 1.0).collect();
        let data = buffer_with(40, &scaled, 512);
        assert_eq!(CorrelationScan::default().locate(&data, &samples), Some(40));
    }

    #[test]
    fn test_correlation_scan_includes_last_offset() {
        let samples = ramp(8);
        let data = buffer_with(480, &samples, 512);
        assert_eq!(CorrelationScan::default().locate(&data, &samples), Some(480));
    }

    #[test]
    fn test_pearson() {
        let a = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&a, &a).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&a, &[4.0, 3.0, 2.0, 1.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&a, &[5.0; 4]), None);
        assert_eq!(pearson(&a, &[1.0, f32::NAN, 3.0, 4.0]), None);
        assert_eq!(pearson(&a, &[1.0, 2.0]), None);
    }

    #[test]
    fn test_chain_reports_strategy() {
        let samples = ramp(32);
        let data = buffer_with(700, &samples, 1024);
        let found = LocatorChain::default().locate(&data, &samples).unwrap();
        assert_eq!(found.offset, 700);
        assert_eq!(found.strategy, CorrelationScan::NAME);
    }

    #[test]
    fn test_only_scan_is_fallback() {
        assert!(!CandidateMatch::default().is_fallback());
        assert!(CorrelationScan::default().is_fallback());

        let samples = ramp(16);
        let data = buffer_with(512, &samples, 576);
        let found = LocatorChain::default().locate(&data, &samples).unwrap();
        assert_eq!(found.offset, 512);
        assert_eq!(found.strategy, CandidateMatch::NAME);
    }

    #[test]
    fn test_chain_without_scan_fails() {
        let samples = ramp(32);
        let data = buffer_with(700, &samples, 1024);
        let options = SpcWriterOptions::default().without_correlation_scan();
        let err = LocatorChain::from_options(&options)
            .locate(&data, &samples)
            .unwrap_err();
        assert!(matches!(err, SpcError::PayloadLocationNotFound { samples: 32 }));
    }
}
