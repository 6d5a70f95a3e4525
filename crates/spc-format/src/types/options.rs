//! Reader and writer options.

/// Options for reading SPC files.
#[derive(Debug, Clone, Default)]
pub struct SpcReaderOptions {
    /// Fail with [`PlaceholderRejected`](crate::SpcError::PlaceholderRejected)
    /// instead of substituting a placeholder axis (default: false).
    pub strict: bool,
}

impl SpcReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict parsing.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Options for the byte-preserving writer.
#[derive(Debug, Clone)]
pub struct SpcWriterOptions {
    /// Relative tolerance for the exact candidate match (default: 1e-5).
    pub relative_tolerance: f64,
    /// Absolute tolerance for the exact candidate match (default: 1e-6).
    pub absolute_tolerance: f64,
    /// Pearson coefficient the correlation scan must exceed (default: 0.99).
    pub correlation_threshold: f64,
    /// Fall back to scanning every aligned offset (default: true).
    pub correlation_scan: bool,
}

impl Default for SpcWriterOptions {
    fn default() -> Self {
        Self {
            relative_tolerance: 1e-5,
            absolute_tolerance: 1e-6,
            correlation_threshold: 0.99,
            correlation_scan: true,
        }
    }
}

impl SpcWriterOptions {
    /// Create writer options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate match tolerances.
    #[must_use]
    pub fn with_tolerance(mut self, relative: f64, absolute: f64) -> Self {
        self.relative_tolerance = relative;
        self.absolute_tolerance = absolute;
        self
    }

    /// Set the correlation threshold.
    #[must_use]
    pub fn with_correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = threshold;
        self
    }

    /// Only accept exact matches at the candidate offsets.
    #[must_use]
    pub fn without_correlation_scan(mut self) -> Self {
        self.correlation_scan = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_defaults() {
        let opts = SpcWriterOptions::default();
        assert_eq!(opts.relative_tolerance, 1e-5);
        assert_eq!(opts.absolute_tolerance, 1e-6);
        assert_eq!(opts.correlation_threshold, 0.99);
        assert!(opts.correlation_scan);
    }

    #[test]
    fn test_builders() {
        let opts = SpcWriterOptions::new()
            .with_tolerance(1e-3, 1e-4)
            .with_correlation_threshold(0.95)
            .without_correlation_scan();
        assert_eq!(opts.relative_tolerance, 1e-3);
        assert_eq!(opts.absolute_tolerance, 1e-4);
        assert_eq!(opts.correlation_threshold, 0.95);
        assert!(!opts.correlation_scan);

        assert!(SpcReaderOptions::new().strict().strict);
        assert!(!SpcReaderOptions::default().strict);
    }
}
