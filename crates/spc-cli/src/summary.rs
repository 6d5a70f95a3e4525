//! Human-readable header dump.

use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use spc_format::{AxisQuality, Document, FieldWidth, PayloadSource};

pub fn print_inspect(path: &Path, doc: &Document) {
    println!("File: {}", path.display());
    println!("{}", inspect_table(doc));
    if doc.is_placeholder() {
        println!("warning: header X range is implausible; X values are a placeholder");
    }
}

/// Table of decoded header fields and spectrum summary.
pub fn inspect_table(doc: &Document) -> Table {
    let header = doc.header();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);

    let flag_names: Vec<&str> = header.flags.set_names().collect();
    let experiment = match header.experiment_type() {
        Some(kind) => format!("{} ({kind})", header.experiment_code),
        None => format!("{} (Unknown)", header.experiment_code),
    };
    let width = match header.x_range.width {
        FieldWidth::Double => "double",
        FieldWidth::Single => "single",
    };
    let payload = match doc.payload_source() {
        Some(PayloadSource::Candidate { offset }) => format!("offset {offset}"),
        Some(PayloadSource::Tail { offset }) => format!("offset {offset} (tail fallback)"),
        None => "none".to_string(),
    };
    let axis = match doc.axis_quality() {
        AxisQuality::Resolved => "resolved from header",
        AxisQuality::Placeholder => "placeholder",
    };

    let rows: Vec<(&str, String)> = vec![
        ("Flags", format!("{} [{}]", header.flags, flag_names.join(", "))),
        ("Version", format!("0x{:02x}", header.version)),
        ("Experiment type", experiment),
        ("Fraction exponent", header.fraction_exponent.to_string()),
        ("Point count", header.point_count.to_string()),
        (
            "X range",
            format!("{} .. {} ({width})", header.x_range.first, header.x_range.last),
        ),
        ("Subfiles", header.subfile_count.to_string()),
        ("Payload", payload),
        ("X axis", axis.to_string()),
        ("X unit", doc.x_unit().to_string()),
        ("Samples", doc.len().to_string()),
        ("Y range", y_range(doc.y_values())),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field), Cell::new(value)]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn y_range(values: &[f32]) -> String {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        "n/a".to_string()
    } else {
        format!("{min} .. {max}")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_range() {
        assert_eq!(y_range(&[1.0, -2.5, f32::NAN, 4.0]), "-2.5 .. 4");
        assert_eq!(y_range(&[]), "n/a");
    }
}
