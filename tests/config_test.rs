//! Tests for config module

#[path = "common/mod.rs"]
mod common;

use common::*;
use eprints_xml::config::ResolvedConfigFile;
use eprints_xml::mapper;
use eprints_xml::records::load_records;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_drives_transform() {
    let temp_dir = TempDir::new().unwrap();
    let export = temp_dir.path().join("export.jsonl");
    create_test_file(&export, SAMPLE_EXPORT_JSONL);
    let config_path = temp_dir.path().join("run.toml");

    let config_content = format!(
        r#"
input = "{}"
output_dir = "{}"
base_file_name = "edoc-vmware-data-"
chunk_size = 1
"#,
        export.display(),
        temp_dir.path().join("out").display()
    );
    fs::write(&config_path, config_content).unwrap();

    let config = ResolvedConfigFile::from_toml_file(&config_path).unwrap();
    let records = load_records(&config.input).unwrap();
    let mut reporter = RecordingReporter::default();
    let paths = mapper::transform(
        &config.resolved.output_dir,
        &config.resolved.base_file_name,
        &records,
        Some(config.resolved.chunk_size),
        &mut reporter,
    )
    .unwrap();

    assert_eq!(paths.len(), 2);
    assert!(temp_dir
        .path()
        .join("out/edoc-vmware-data-2.xml")
        .exists());
}

#[test]
fn test_config_invalid_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("run.toml");
    fs::write(&config_path, "input = \"unterminated\n").unwrap();

    assert!(ResolvedConfigFile::from_toml_file(&config_path).is_err());
}

#[test]
fn test_config_nonexistent_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ResolvedConfigFile::from_toml_file(&temp_dir.path().join("nonexistent.toml"));
    assert!(result.is_err());
}
