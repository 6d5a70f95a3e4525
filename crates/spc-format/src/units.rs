//! X-axis unit classification.
//!
//! The unit is never stored in the header. It is inferred from the
//! experiment type when that is decisive, otherwise from where the axis sits.
//!
//! | fexper | rule           | unit  |
//! |--------|----------------|-------|
//! | 4      | always         | cm⁻¹  |
//! | 5      | mean > 1000    | nm, else cm⁻¹ |
//! | 6      | always         | nm    |
//! | other  | range heuristic | -    |

use std::fmt;

use serde::{Serialize, Serializer};

use crate::header::ExperimentType;

/// Physical unit of the X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XUnit {
    /// Wavenumber, cm⁻¹.
    Wavenumber,
    /// Wavelength in nanometres.
    Nanometer,
    /// Wavelength in micrometres.
    Micrometer,
}

impl XUnit {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wavenumber => "cm⁻¹",
            Self::Nanometer => "nm",
            Self::Micrometer => "μm",
        }
    }
}

impl fmt::Display for XUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for XUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Summary of an axis used by the range heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisStats {
    pub mean: f64,
    /// `last - first`; negative for descending axes.
    pub span: f64,
}

impl AxisStats {
    /// Statistics for `values`, or `None` when empty.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (&first, &last) = (values.first()?, values.last()?);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self {
            mean,
            span: last - first,
        })
    }
}

/// Classify the X unit for an axis.
///
/// An empty axis has mean 0 for the experiment-type rules and is reported
/// as wavenumber by the range heuristic.
#[must_use]
pub fn classify(experiment_code: u8, x_values: &[f64]) -> XUnit {
    let stats = AxisStats::from_values(x_values).unwrap_or(AxisStats {
        mean: 0.0,
        span: 0.0,
    });
    match experiment_code {
        ExperimentType::FT_IR | ExperimentType::NIR | ExperimentType::UV_VIS => {
            classify_stats(experiment_code, stats)
        }
        _ if x_values.is_empty() => XUnit::Wavenumber,
        _ => guess_from_range(stats),
    }
}

/// Classify from precomputed statistics.
#[must_use]
pub fn classify_stats(experiment_code: u8, stats: AxisStats) -> XUnit {
    match experiment_code {
        ExperimentType::FT_IR => XUnit::Wavenumber,
        ExperimentType::NIR if stats.mean > 1000.0 => XUnit::Nanometer,
        ExperimentType::NIR => XUnit::Wavenumber,
        ExperimentType::UV_VIS => XUnit::Nanometer,
        _ => guess_from_range(stats),
    }
}

/// First matching rule wins.
#[must_use]
pub fn guess_from_range(stats: AxisStats) -> XUnit {
    let AxisStats { mean, span } = stats;
    if (200.0..=1000.0).contains(&mean) && span < 2000.0 {
        XUnit::Nanometer
    } else if (1000.0..=3000.0).contains(&mean) && span < 3000.0 {
        XUnit::Nanometer
    } else if (2.0..=30.0).contains(&mean) && span < 50.0 {
        XUnit::Micrometer
    } else if (400.0..=15000.0).contains(&mean) {
        XUnit::Wavenumber
    } else if mean < 100.0 {
        XUnit::Micrometer
    } else if mean < 4000.0 {
        XUnit::Nanometer
    } else {
        XUnit::Wavenumber
    }
}
