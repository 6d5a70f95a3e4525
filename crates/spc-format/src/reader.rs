//! SPC file reader.
//!
//! Provides functionality to parse SPC buffers and files into a [`Document`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::axis::{AxisQuality, build_axis};
use crate::document::Document;
use crate::error::{Result, SpcError};
use crate::header::decode_header;
use crate::locate::locate_for_parse;
use crate::types::SpcReaderOptions;

/// Parse an SPC buffer with default options.
///
/// Implausible header ranges do not fail; the document is marked
/// [`AxisQuality::Placeholder`] instead.
pub fn parse(data: &[u8]) -> Result<Document> {
    parse_with_options(data, &SpcReaderOptions::default())
}

/// Parse an SPC buffer.
pub fn parse_with_options(data: &[u8], options: &SpcReaderOptions) -> Result<Document> {
    let header = decode_header(data)?;
    debug!(
        flags = %header.flags,
        version = header.version,
        experiment = header.experiment_code,
        points = header.point_count,
        first = header.x_range.first,
        last = header.x_range.last,
        width = ?header.x_range.width,
        subfiles = header.subfile_count,
        "decoded header"
    );

    if options.strict && AxisQuality::of(&header) == AxisQuality::Placeholder {
        return Err(SpcError::PlaceholderRejected {
            first: header.x_range.first,
            last: header.x_range.last,
        });
    }

    let payload = locate_for_parse(data, header.point_count as usize)?;
    let axis = build_axis(&header, payload.samples.len());

    let document = Document::parsed(
        header,
        axis.values,
        payload.samples,
        axis.quality,
        payload.source,
        data.to_vec(),
    );
    debug!(
        points = document.len(),
        unit = %document.x_unit(),
        quality = ?document.axis_quality(),
        "parsed spectrum"
    );
    Ok(document)
}

/// SPC file reader.
pub struct SpcReader<R: Read> {
    reader: BufReader<R>,
    options: SpcReaderOptions,
}

impl<R: Read> SpcReader<R> {
    /// Create a new SPC reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            options: SpcReaderOptions::default(),
        }
    }

    /// Create a new SPC reader with options.
    pub fn with_options(reader: R, options: SpcReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the entire input into memory and parse it.
    pub fn read_document(mut self) -> Result<Document> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        parse_with_options(&data, &self.options)
    }
}

impl SpcReader<File> {
    /// Open an SPC file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, SpcReaderOptions::default())
    }

    /// Open an SPC file with options.
    pub fn open_with_options(path: &Path, options: SpcReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpcError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                SpcError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read an SPC file from a path.
pub fn read_spc(path: &Path) -> Result<Document> {
    SpcReader::open(path)?.read_document()
}

/// Read an SPC file with options.
pub fn read_spc_with_options(path: &Path, options: SpcReaderOptions) -> Result<Document> {
    SpcReader::open_with_options(path, options)?.read_document()
}
