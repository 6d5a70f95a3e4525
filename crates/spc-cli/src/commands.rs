//! Command implementations. Each one consumes the library only through
//! `parse`, `write` and `synthesize`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use spc_format::processing::{clip_below, count_below};
use spc_format::{
    Document, ExperimentType, Header, SpcReaderOptions, SpcWriterOptions, TypeFlags,
    parse_with_options, synthesize, write_with_options,
};

use crate::summary::print_inspect;
use crate::values::{SampleTable, load_samples};

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Inputs for `patch`.
#[derive(Debug, Clone)]
pub struct PatchRequest {
    pub input: PathBuf,
    pub strict: bool,
    pub output: PathBuf,
    pub values: Option<PathBuf>,
    pub threshold: Option<f32>,
    pub correlation_scan: bool,
}

/// Inputs for `synth`.
#[derive(Debug, Clone)]
pub struct SynthRequest {
    pub values: PathBuf,
    pub output: PathBuf,
    pub first: f64,
    pub last: f64,
    pub experiment: u8,
    pub flags: u8,
}

/// Read and parse an SPC file.
pub fn load_document(path: &Path, strict: bool) -> Result<Document> {
    let data = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let options = if strict {
        SpcReaderOptions::new().strict()
    } else {
        SpcReaderOptions::default()
    };
    let doc = parse_with_options(&data, &options)
        .with_context(|| format!("parse {}", path.display()))?;
    if doc.is_placeholder() {
        warn!(path = %path.display(), "using placeholder X axis");
    }
    Ok(doc)
}

pub fn run_inspect(path: &Path, strict: bool) -> Result<()> {
    let doc = load_document(path, strict)?;
    print_inspect(path, &doc);
    Ok(())
}

pub fn run_export(
    path: &Path,
    strict: bool,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let doc = load_document(path, strict)?;
    match output {
        Some(target) => {
            let file =
                File::create(target).with_context(|| format!("create {}", target.display()))?;
            export(&doc, format, BufWriter::new(file))?;
            info!(path = %target.display(), points = doc.len(), "exported spectrum");
        }
        None => export(&doc, format, io::stdout().lock())?,
    }
    Ok(())
}

/// Write `doc` in the requested format.
pub fn export<W: Write>(doc: &Document, format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => export_csv(doc, writer),
        ExportFormat::Json => export_json(doc, writer),
    }
}

/// `x,y` rows with a header line.
pub fn export_csv<W: Write>(doc: &Document, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["x", "y"])?;
    for (x, y) in doc.x_values().iter().zip(doc.y_values()) {
        csv.write_record([x.to_string(), y.to_string()])?;
    }
    csv.flush()?;
    Ok(())
}

/// The whole parsed document, including header fields and provenance.
pub fn export_json<W: Write>(doc: &Document, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, doc)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn run_patch(request: &PatchRequest) -> Result<()> {
    let span = info_span!("patch", input = %request.input.display());
    let _guard = span.enter();

    let doc = load_document(&request.input, request.strict)?;
    let new_y = replacement_samples(&doc, request)?;
    let options = if request.correlation_scan {
        SpcWriterOptions::default()
    } else {
        SpcWriterOptions::default().without_correlation_scan()
    };
    let bytes = write_with_options(&doc, &new_y, &options)
        .with_context(|| format!("patch {}", request.input.display()))?;
    fs::write(&request.output, &bytes)
        .with_context(|| format!("write {}", request.output.display()))?;
    info!(
        output = %request.output.display(),
        samples = new_y.len(),
        "wrote patched file"
    );
    println!(
        "Wrote {} ({} samples replaced, {} bytes)",
        request.output.display(),
        new_y.len(),
        bytes.len()
    );
    Ok(())
}

/// New Y values for a patch, from a values file or by clipping.
pub fn replacement_samples(doc: &Document, request: &PatchRequest) -> Result<Vec<f32>> {
    match (&request.values, request.threshold) {
        (Some(path), None) => {
            let table = load_samples(path)?;
            if table.x.is_some() {
                warn!("ignoring X column in values file; the original axis is kept");
            }
            Ok(table.y)
        }
        (None, Some(threshold)) => {
            let clipped = count_below(doc.y_values(), threshold);
            info!(threshold, clipped, "clipping samples below threshold");
            Ok(clip_below(doc.y_values(), threshold))
        }
        (Some(_), Some(_)) => bail!("--values and --threshold cannot be combined"),
        (None, None) => bail!("either --values or --threshold is required"),
    }
}

pub fn run_synth(request: &SynthRequest) -> Result<()> {
    let table = load_samples(&request.values)?;
    let bytes = synth_bytes(&table, request);
    fs::write(&request.output, &bytes)
        .with_context(|| format!("write {}", request.output.display()))?;
    println!(
        "Wrote {} ({} samples, {} bytes)",
        request.output.display(),
        table.len(),
        bytes.len()
    );
    Ok(())
}

/// Build a new file from loaded samples and header settings.
pub fn synth_bytes(table: &SampleTable, request: &SynthRequest) -> Vec<u8> {
    if ExperimentType::from_code(request.experiment).is_none() {
        warn!(code = request.experiment, "unknown experiment type code");
    }
    let mut header = Header::new(0, request.first, request.last)
        .with_flags(TypeFlags::from_bits(request.flags));
    header.experiment_code = request.experiment;
    let x = table.x.as_deref().unwrap_or_default();
    synthesize(&header, x, &table.y)
}
