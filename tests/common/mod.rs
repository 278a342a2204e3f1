//! Common test utilities for integration tests

use eprints_xml::models::Record;
use eprints_xml::report::Reporter;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reporter that remembers every event it receives
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub chunks: Vec<(PathBuf, usize)>,
    pub finished: Option<(usize, usize)>,
    pub stripped: Option<BTreeSet<String>>,
}

impl Reporter for RecordingReporter {
    fn chunk_written(&mut self, path: &Path, records: usize) {
        self.chunks.push((path.to_path_buf(), records));
    }

    fn transform_finished(&mut self, files: usize, records: usize) {
        self.finished = Some((files, records));
    }

    fn tags_stripped(&mut self, _kept: &BTreeSet<String>, removed: &BTreeSet<String>, _output: &Path) {
        self.stripped = Some(removed.clone());
    }
}

/// Helper function to create a test file in a directory
#[allow(dead_code)]
pub fn create_test_file(path: &Path, content: &str) {
    let parent = path.parent().unwrap();
    fs::create_dir_all(parent).unwrap();
    fs::File::create(path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
}

/// Builds a record from a JSON object literal
#[allow(dead_code)]
pub fn record(value: serde_json::Value) -> Record {
    Record::try_from(value).unwrap()
}

/// `count` scalar-only records numbered from 1
#[allow(dead_code)]
pub fn numbered_records(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| record(serde_json::json!({"eprintid": i, "title": format!("Title {i}")})))
        .collect()
}

/// Allow-list from string slices
#[allow(dead_code)]
pub fn tag_set(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

/// Export as written by an index dump, one hit per line
#[allow(dead_code)]
pub const SAMPLE_EXPORT_JSONL: &str = r#"{"_index":"edoc","_id":"1","_source":{"eprintid":1,"title":"Alpha","divisions_names":["Biology"],"contributors":[{"id":"c1","name":{"family":"Doe","given":"Jane","honorific":null},"orcid":null}],"documents":[{"format":"application/pdf","files":[{"filename":"a.pdf","filesize":100},{"filename":"b.pdf","filesize":200}]}]}}
{"_index":"edoc","_id":"2","_source":{"eprintid":2,"title":"Beta","divisions_names":[],"contributors":[],"documents":[]}}
"#;

/// EPrints file with three fields per record
#[allow(dead_code)]
pub const SAMPLE_EPRINTS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<eprints>
  <eprint xmlns="http://eprints.org/ep2/data/2.0">
    <a>first</a>
    <b>second</b>
    <c>third</c>
  </eprint>
  <eprint xmlns="http://eprints.org/ep2/data/2.0">
    <a>fourth</a>
    <b>fifth</b>
    <c>
      <item>sixth</item>
    </c>
  </eprint>
</eprints>
"#;
