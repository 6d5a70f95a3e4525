//! Galactic SPC spectroscopy file reader and byte-preserving writer.
//!
//! The SPC header is only partly self-describing: the X range may be stored
//! as doubles or singles, the axis unit is not stored at all, and the
//! payload offset is not fixed. This crate resolves those ambiguities on
//! read and, on write, replaces only the Y samples so that every other byte
//! of the original file is preserved.
//!
//! # Features
//!
//! - Header decoding with double/single X range disambiguation
//! - Evenly spaced X axis reconstruction with an explicit placeholder flag
//! - Payload location by candidate offsets, exact match and correlation scan
//! - X unit inference (cm⁻¹, nm, μm) from experiment type and axis range
//! - Patch-based writing that touches only the payload bytes
//! - Synthesis of minimal new files
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use spc_format::{processing, read_spc, write_spc};
//!
//! let doc = read_spc(Path::new("sample.spc")).unwrap();
//! println!("{} points in {}", doc.len(), doc.x_unit());
//!
//! let clipped = processing::clip_below(doc.y_values(), 0.0);
//! write_spc(Path::new("sample_clipped.spc"), &doc, &clipped).unwrap();
//! ```
//!
//! # Synthesizing
//!
//! ```
//! use spc_format::{Header, ExperimentType, parse, synthesize};
//!
//! let header = Header::new(3, 400.0, 4000.0).with_experiment(ExperimentType::FourierTransform);
//! let bytes = synthesize(&header, &[400.0, 2200.0, 4000.0], &[1.0, 2.0, 3.0]);
//! let doc = parse(&bytes).unwrap();
//! assert_eq!(doc.y_values(), &[1.0, 2.0, 3.0]);
//! assert_eq!(doc.x_unit().label(), "cm⁻¹");
//! ```

pub mod axis;
mod document;
mod error;
pub mod header;
pub mod locate;
pub mod patch;
pub mod processing;
mod reader;
pub mod samples;
mod types;
pub mod units;
mod writer;

// Re-export error types
pub use error::{Result, SpcError};

// Re-export core types
pub use axis::AxisQuality;
pub use document::Document;
pub use header::{ExperimentType, FieldWidth, HEADER_LEN, Header, TypeFlags, XRange};
pub use locate::PayloadSource;
pub use types::{SpcReaderOptions, SpcWriterOptions};
pub use units::XUnit;

// Re-export reader functionality
pub use reader::{SpcReader, parse, parse_with_options, read_spc, read_spc_with_options};

// Re-export writer functionality
pub use writer::{
    SpcWriter, plan_write, synthesize, synthesize_document, write, write_spc,
    write_spc_with_options, write_with_options,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
