//! Integration tests for the command implementations.

use std::fs;
use std::path::Path;

use spc_cli::commands::{
    PatchRequest, SynthRequest, export_csv, export_json, load_document, run_patch, run_synth,
    synth_bytes,
};
use spc_cli::summary::inspect_table;
use spc_cli::values::SampleTable;

fn synth_request(dir: &Path, experiment: u8) -> SynthRequest {
    SynthRequest {
        values: dir.join("values.csv"),
        output: dir.join("synth.spc"),
        first: 400.0,
        last: 4000.0,
        experiment,
        flags: 0,
    }
}

fn write_values(path: &Path, values: &[f32]) {
    let body: String = values.iter().map(|v| format!("{v}\n")).collect();
    fs::write(path, format!("y\n{body}")).unwrap();
}

#[test]
fn test_synth_then_patch_with_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let values: Vec<f32> = (0..50).map(|i| (i as f32 - 25.0) * 2.0).collect();
    write_values(&dir.path().join("values.csv"), &values);

    let request = synth_request(dir.path(), 4);
    run_synth(&request).unwrap();
    let original = fs::read(&request.output).unwrap();

    let patched = dir.path().join("patched.spc");
    run_patch(&PatchRequest {
        input: request.output.clone(),
        strict: true,
        output: patched.clone(),
        values: None,
        threshold: Some(0.0),
        correlation_scan: true,
    })
    .unwrap();

    let out = fs::read(&patched).unwrap();
    assert_eq!(out.len(), original.len());
    assert_eq!(&out[..512], &original[..512]);

    let doc = load_document(&patched, true).unwrap();
    assert!(doc.y_values().iter().all(|&y| y >= 0.0));
    assert_eq!(doc.y_values()[49], values[49]);
}

#[test]
fn test_patch_with_wrong_length_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_values(&dir.path().join("values.csv"), &[1.0, 2.0, 3.0]);
    let request = synth_request(dir.path(), 0);
    run_synth(&request).unwrap();

    let replacement = dir.path().join("replacement.csv");
    write_values(&replacement, &[1.0, 2.0]);
    let output = dir.path().join("never.spc");
    let err = run_patch(&PatchRequest {
        input: request.output.clone(),
        strict: false,
        output: output.clone(),
        values: Some(replacement),
        threshold: None,
        correlation_scan: true,
    })
    .unwrap_err();

    assert!(format!("{err:#}").contains("sample count mismatch"));
    assert!(!output.exists());
}

#[test]
fn test_patch_requires_a_source() {
    let dir = tempfile::tempdir().unwrap();
    write_values(&dir.path().join("values.csv"), &[1.0, 2.0, 3.0]);
    let request = synth_request(dir.path(), 0);
    run_synth(&request).unwrap();

    let err = run_patch(&PatchRequest {
        input: request.output.clone(),
        strict: false,
        output: dir.path().join("out.spc"),
        values: None,
        threshold: None,
        correlation_scan: true,
    })
    .unwrap_err();
    assert!(err.to_string().contains("--values or --threshold"));
}

#[test]
fn test_export_csv_and_json() {
    let table = SampleTable {
        x: Some(vec![200.0, 500.0, 800.0]),
        y: vec![0.5, 1.5, 2.5],
    };
    let dir = tempfile::tempdir().unwrap();
    let request = synth_request(dir.path(), 6);
    fs::write(&request.output, synth_bytes(&table, &request)).unwrap();
    let doc = load_document(&request.output, false).unwrap();

    let mut csv = Vec::new();
    export_csv(&doc, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv, "x,y\n200,0.5\n500,1.5\n800,2.5\n");

    let mut json = Vec::new();
    export_json(&doc, &mut json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["x_unit"], "nm");
    assert_eq!(value["y_values"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["header"]["experiment_code"], 6);
    assert_eq!(value["axis_quality"], "Resolved");
}

#[test]
fn test_inspect_table_lists_fields() {
    let table = SampleTable {
        x: None,
        y: vec![1.0; 10],
    };
    let dir = tempfile::tempdir().unwrap();
    let request = synth_request(dir.path(), 4);
    fs::write(&request.output, synth_bytes(&table, &request)).unwrap();
    let doc = load_document(&request.output, false).unwrap();

    let rendered = inspect_table(&doc).to_string();
    assert!(rendered.contains("FT-IR, FT-NIR, FT-Raman"));
    assert!(rendered.contains("TSPREC"));
    assert!(rendered.contains("cm⁻¹"));
    assert!(rendered.contains("offset 512"));
}
