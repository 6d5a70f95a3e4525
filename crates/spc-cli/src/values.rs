//! Loading sample columns from CSV or plain text.
//!
//! Accepted inputs:
//! - one number per line (Y only)
//! - `x,y` rows
//!
//! A non-numeric first row is treated as a header and skipped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};

/// Samples read from a values file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleTable {
    /// X column when the input had two columns.
    pub x: Option<Vec<f64>>,
    pub y: Vec<f32>,
}

impl SampleTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Load samples from a file.
pub fn load_samples(path: &Path) -> Result<SampleTable> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_samples(file).with_context(|| format!("read values from {}", path.display()))
}

/// Read samples from any reader.
pub fn read_samples<R: Read>(reader: R) -> Result<SampleTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut table = SampleTable::default();
    let mut columns: Option<usize> = None;

    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("row {}", index + 1))?;
        let fields: Vec<&str> = record.iter().filter(|field| !field.is_empty()).collect();
        if fields.is_empty() {
            continue;
        }

        let numbers: Option<Vec<f64>> = fields.iter().map(|f| f.parse::<f64>().ok()).collect();
        let Some(numbers) = numbers else {
            if index == 0 {
                continue;
            }
            bail!("row {}: expected numeric values, got {:?}", index + 1, fields);
        };

        let width = *columns.get_or_insert(numbers.len().min(2));
        match (width, numbers.as_slice()) {
            (1, [y]) => table.y.push(*y as f32),
            (2, [x, y, ..]) => {
                table.x.get_or_insert_with(Vec::new).push(*x);
                table.y.push(*y as f32);
            }
            _ => bail!(
                "row {}: expected {} column(s), got {}",
                index + 1,
                width,
                numbers.len()
            ),
        }
    }

    if table.is_empty() {
        bail!("no sample values found");
    }
    Ok(table)
}
