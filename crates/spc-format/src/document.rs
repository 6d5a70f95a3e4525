//! Parsed or synthesized spectrum.

use serde::Serialize;
use tracing::warn;

use crate::axis::AxisQuality;
use crate::header::Header;
use crate::locate::PayloadSource;
use crate::units::{XUnit, classify};

/// A spectrum together with the header it came from.
///
/// `x_values` and `y_values` always have the same length. When the document
/// was parsed from a file, the original bytes are kept unchanged so that a
/// later write can preserve everything outside the sample payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    header: Header,
    x_values: Vec<f64>,
    y_values: Vec<f32>,
    x_unit: XUnit,
    axis_quality: AxisQuality,
    payload_source: Option<PayloadSource>,
    #[serde(skip)]
    original: Option<Vec<u8>>,
}

impl Document {
    pub(crate) fn parsed(
        header: Header,
        x_values: Vec<f64>,
        y_values: Vec<f32>,
        axis_quality: AxisQuality,
        payload_source: PayloadSource,
        original: Vec<u8>,
    ) -> Self {
        let (x_values, y_values) = reconcile(x_values, y_values);
        let x_unit = classify(header.experiment_code, &x_values);
        Self {
            header,
            x_values,
            y_values,
            x_unit,
            axis_quality,
            payload_source: Some(payload_source),
            original: Some(original),
        }
    }

    /// Build a document for a new spectrum with no backing file.
    ///
    /// Lengths are truncated to the shorter of the two sequences.
    #[must_use]
    pub fn synthetic(header: Header, x_values: Vec<f64>, y_values: Vec<f32>) -> Self {
        let (x_values, y_values) = reconcile(x_values, y_values);
        let x_unit = classify(header.experiment_code, &x_values);
        Self {
            header,
            x_values,
            y_values,
            x_unit,
            axis_quality: AxisQuality::Resolved,
            payload_source: None,
            original: None,
        }
    }

    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    #[must_use]
    pub fn y_values(&self) -> &[f32] {
        &self.y_values
    }

    #[must_use]
    pub fn x_unit(&self) -> XUnit {
        self.x_unit
    }

    #[must_use]
    pub fn axis_quality(&self) -> AxisQuality {
        self.axis_quality
    }

    /// Whether the axis was substituted because the header was implausible.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.axis_quality == AxisQuality::Placeholder
    }

    /// Where the samples were read from; `None` for synthetic documents.
    #[must_use]
    pub fn payload_source(&self) -> Option<PayloadSource> {
        self.payload_source
    }

    /// The bytes this document was parsed from.
    #[must_use]
    pub fn original(&self) -> Option<&[u8]> {
        self.original.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.y_values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y_values.is_empty()
    }

    /// Split into the `(x, y, unit)` triple consumed by callers.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f32>, XUnit) {
        (self.x_values, self.y_values, self.x_unit)
    }
}

/// Truncate both sequences to the shorter length.
fn reconcile(mut x: Vec<f64>, mut y: Vec<f32>) -> (Vec<f64>, Vec<f32>) {
    if x.len() != y.len() {
        let len = x.len().min(y.len());
        warn!(x = x.len(), y = y.len(), len, "truncating to matching lengths");
        x.truncate(len);
        y.truncate(len);
    }
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::linspace;
    use crate::header::ExperimentType;

    #[test]
    fn test_synthetic_truncates() {
        let doc = Document::synthetic(
            Header::new(3, 1.0, 3.0),
            linspace(1.0, 3.0, 3),
            vec![0.5, 0.25],
        );
        assert_eq!(doc.x_values(), &[1.0, 2.0]);
        assert_eq!(doc.y_values(), &[0.5, 0.25]);
        assert_eq!(doc.len(), 2);
        assert!(doc.original().is_none());
        assert!(doc.payload_source().is_none());
    }

    #[test]
    fn test_synthetic_unit() {
        let header = Header::new(10, 200.0, 800.0).with_experiment(ExperimentType::FourierTransform);
        let doc = Document::synthetic(header, linspace(200.0, 800.0, 10), vec![0.0; 10]);
        assert_eq!(doc.x_unit(), XUnit::Wavenumber);
        assert!(!doc.is_placeholder());
    }

    #[test]
    fn test_into_parts() {
        let doc = Document::synthetic(Header::new(2, 2.5, 25.0), vec![2.5, 25.0], vec![1.0, 2.0]);
        let (x, y, unit) = doc.into_parts();
        assert_eq!(x, vec![2.5, 25.0]);
        assert_eq!(y, vec![1.0, 2.0]);
        assert_eq!(unit, XUnit::Micrometer);
    }
}
