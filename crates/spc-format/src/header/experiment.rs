//! Experiment type codes (`fexper`, header byte 2).

use std::fmt;

use serde::Serialize;

/// Instrument modality recorded in the header.
///
/// Only the codes 0 through 13 are defined; anything else is kept as a raw
/// byte by [`Header`](super::Header).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExperimentType {
    General,
    GasChromatography,
    Chromatography,
    Hplc,
    FourierTransform,
    NearInfrared,
    UvVis,
    XRay,
    MassSpectrometry,
    Nmr,
    Esr,
    Fluorescence,
    Atomic,
    DiodeArray,
}

impl ExperimentType {
    /// FT-IR, FT-NIR and FT-Raman.
    pub const FT_IR: u8 = 4;
    pub const NIR: u8 = 5;
    pub const UV_VIS: u8 = 6;

    /// Look up a known code.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::General,
            1 => Self::GasChromatography,
            2 => Self::Chromatography,
            3 => Self::Hplc,
            4 => Self::FourierTransform,
            5 => Self::NearInfrared,
            6 => Self::UvVis,
            7 => Self::XRay,
            8 => Self::MassSpectrometry,
            9 => Self::Nmr,
            10 => Self::Esr,
            11 => Self::Fluorescence,
            12 => Self::Atomic,
            13 => Self::DiodeArray,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::General => "General SPC",
            Self::GasChromatography => "Gas Chromatography",
            Self::Chromatography => "General Chromatography",
            Self::Hplc => "HPLC Chromatography",
            Self::FourierTransform => "FT-IR, FT-NIR, FT-Raman",
            Self::NearInfrared => "NIR",
            Self::UvVis => "UV-VIS",
            Self::XRay => "X-ray",
            Self::MassSpectrometry => "Mass Spectrometry",
            Self::Nmr => "NMR Spectroscopy or FT-NMR",
            Self::Esr => "ESR Spectroscopy",
            Self::Fluorescence => "Fluorescence Spectroscopy",
            Self::Atomic => "Atomic Spectroscopy",
            Self::DiodeArray => "Chromatography Diode Array",
        }
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
