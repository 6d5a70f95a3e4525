//! SPC file writer.
//!
//! Two paths produce bytes:
//! - [`write`] patches a parsed document's original buffer, replacing only
//!   the Y payload and preserving every other byte.
//! - [`synthesize`] builds a minimal new file when there is no original.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::document::Document;
use crate::error::{Result, SpcError};
use crate::header::Header;
use crate::locate::LocatorChain;
use crate::patch::{Patch, PatchSet};
use crate::samples::encode_samples;
use crate::types::SpcWriterOptions;

/// Plan the patches that replace `doc`'s samples with `new_y`.
///
/// Fails with [`SpcError::LengthMismatch`] if the sample count differs,
/// [`SpcError::NoOriginalToPreserve`] for synthetic documents, and
/// [`SpcError::PayloadLocationNotFound`] when the original samples cannot
/// be found in the original bytes.
pub fn plan_write(doc: &Document, new_y: &[f32], options: &SpcWriterOptions) -> Result<PatchSet> {
    if new_y.len() != doc.y_values().len() {
        return Err(SpcError::length_mismatch(doc.y_values().len(), new_y.len()));
    }
    let original = doc.original().ok_or(SpcError::NoOriginalToPreserve)?;

    let found = LocatorChain::from_options(options).locate(original, doc.y_values())?;

    let mut patches = PatchSet::new(original.len());
    patches.push(Patch::new(found.offset, encode_samples(new_y)))?;
    debug!(
        offset = found.offset,
        samples = new_y.len(),
        strategy = found.strategy,
        "planned payload patch"
    );
    Ok(patches)
}

/// Replace the Y samples of a parsed document, preserving all other bytes.
pub fn write(doc: &Document, new_y: &[f32]) -> Result<Vec<u8>> {
    write_with_options(doc, new_y, &SpcWriterOptions::default())
}

/// Replace the Y samples of a parsed document with explicit options.
pub fn write_with_options(
    doc: &Document,
    new_y: &[f32],
    options: &SpcWriterOptions,
) -> Result<Vec<u8>> {
    let patches = plan_write(doc, new_y, options)?;
    let original = doc.original().ok_or(SpcError::NoOriginalToPreserve)?;
    patches.apply(original)
}

/// Build a new file from a header template and samples.
///
/// Flags, version, experiment type and fraction exponent are taken from
/// `header`. The point count is `y.len()`, the X range comes from the ends of
/// `x` (or the header when `x` is empty), and the samples follow the
/// 512-byte header directly.
#[must_use]
pub fn synthesize(header: &Header, x: &[f64], y: &[f32]) -> Vec<u8> {
    let mut header = header.clone();
    header.point_count = u32::try_from(y.len()).unwrap_or(u32::MAX);
    if let (Some(&first), Some(&last)) = (x.first(), x.last()) {
        header.x_range.first = first;
        header.x_range.last = last;
    }

    let block = header.encode();
    let mut out = Vec::with_capacity(block.len() + y.len() * 4);
    out.extend_from_slice(&block);
    out.extend_from_slice(&encode_samples(y));
    out
}

/// Synthesize a file holding a document's current spectrum.
#[must_use]
pub fn synthesize_document(doc: &Document) -> Vec<u8> {
    synthesize(doc.header(), doc.x_values(), doc.y_values())
}

/// SPC file writer.
pub struct SpcWriter<W: Write> {
    writer: BufWriter<W>,
    options: SpcWriterOptions,
}

impl<W: Write> SpcWriter<W> {
    /// Create a new SPC writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options: SpcWriterOptions::default(),
        }
    }

    /// Create a new SPC writer with options.
    pub fn with_options(writer: W, options: SpcWriterOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Write `doc`'s original bytes with the samples replaced by `new_y`.
    pub fn write_patched(mut self, doc: &Document, new_y: &[f32]) -> Result<()> {
        let bytes = write_with_options(doc, new_y, &self.options)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a freshly synthesized file for `doc`.
    pub fn write_synthesized(mut self, doc: &Document) -> Result<()> {
        self.writer.write_all(&synthesize_document(doc))?;
        self.writer.flush()?;
        Ok(())
    }
}

impl SpcWriter<File> {
    /// Create an SPC file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Self::create_with_options(path, SpcWriterOptions::default())
    }

    /// Create an SPC file with options.
    pub fn create_with_options(path: &Path, options: SpcWriterOptions) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_options(file, options))
    }
}

/// Write `doc` with new samples to `path`.
///
/// The bytes are produced before the file is created, so a failed write
/// leaves no partial file behind.
pub fn write_spc(path: &Path, doc: &Document, new_y: &[f32]) -> Result<()> {
    write_spc_with_options(path, doc, new_y, &SpcWriterOptions::default())
}

/// Write `doc` with new samples to `path` with explicit options.
pub fn write_spc_with_options(
    path: &Path,
    doc: &Document,
    new_y: &[f32],
    options: &SpcWriterOptions,
) -> Result<()> {
    let bytes = write_with_options(doc, new_y, options)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::linspace;
    use crate::header::{ExperimentType, HEADER_LEN, TypeFlags};
    use crate::reader::parse;
    use crate::samples::decode_samples;

    fn spectrum(n: usize) -> Vec<f32> {
        (0..n).map(|i| (i as f32 / 40.0).cos() * 50.0).collect()
    }

    #[test]
    fn test_synthesize_layout() {
        let header = Header::default()
            .with_experiment(ExperimentType::NearInfrared)
            .with_flags(TypeFlags::from_bits(0));
        let y = spectrum(10);
        let bytes = synthesize(&header, &linspace(1100.0, 2500.0, 10), &y);

        assert_eq!(bytes.len(), HEADER_LEN + 40);
        assert_eq!(bytes[0], TypeFlags::EVEN_SPACING);
        assert_eq!(bytes[2], 5);
        assert_eq!(&bytes[4..8], &10u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &1100.0f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &2500.0f32.to_le_bytes());
        assert_eq!(decode_samples(&bytes[HEADER_LEN..]), y);
    }

    #[test]
    fn test_synthesize_empty_x_uses_header_range() {
        let header = Header::new(0, 2.5, 25.0);
        let bytes = synthesize(&header, &[], &[1.0, 2.0]);
        assert_eq!(&bytes[8..12], &2.5f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &25.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
    }

    #[test]
    fn test_write_identity_is_byte_identical() {
        let original = synthesize(&Header::default(), &linspace(400.0, 4000.0, 64), &spectrum(64));
        let doc = parse(&original).unwrap();
        let out = write(&doc, doc.y_values()).unwrap();
        assert_eq!(out, original);
    }

    #[test]
    fn test_length_mismatch() {
        let original = synthesize(&Header::default(), &linspace(400.0, 4000.0, 64), &spectrum(64));
        let doc = parse(&original).unwrap();
        let err = write(&doc, &spectrum(63)).unwrap_err();
        assert!(matches!(err, SpcError::LengthMismatch { expected: 64, actual: 63 }));
    }

    #[test]
    fn test_no_original() {
        let doc = Document::synthetic(Header::new(3, 1.0, 3.0), linspace(1.0, 3.0, 3), vec![1.0; 3]);
        let err = write(&doc, &[2.0; 3]).unwrap_err();
        assert!(matches!(err, SpcError::NoOriginalToPreserve));
    }

    #[test]
    fn test_plan_touches_only_payload() {
        let original = synthesize(&Header::default(), &linspace(400.0, 4000.0, 16), &spectrum(16));
        let doc = parse(&original).unwrap();
        let plan = plan_write(&doc, &[0.0; 16], &SpcWriterOptions::default()).unwrap();
        assert_eq!(plan.touched().collect::<Vec<_>>(), vec![HEADER_LEN..HEADER_LEN + 64]);
    }

    #[test]
    fn test_writer_to_vec() {
        let original = synthesize(&Header::default(), &linspace(400.0, 4000.0, 8), &spectrum(8));
        let doc = parse(&original).unwrap();
        let mut out = Vec::new();
        SpcWriter::new(&mut out)
            .write_patched(&doc, &[7.0; 8])
            .unwrap();
        assert_eq!(&out[..HEADER_LEN], &original[..HEADER_LEN]);
        assert_eq!(decode_samples(&out[HEADER_LEN..]), vec![7.0; 8]);
    }
}
