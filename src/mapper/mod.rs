mod record;
mod sink;

// Re-export public API
pub use record::map_record;
pub use sink::{output_path, write_documents};

use crate::constants::{DEFAULT_CHUNK_SIZE, EPRINTS_ROOT};
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::report::Reporter;
use crate::xml::Element;
use std::path::{Path, PathBuf};

/// Maps records into `eprints` documents of at most `chunk_size` records each.
///
/// Chunks are consecutive slices of the input, so the last document holds
/// the remainder. An empty input yields no documents.
///
/// # Errors
///
/// Returns `InvalidInput` for a zero chunk size and `UnknownElement` as soon
/// as any record holds an unsupported value shape.
pub fn map_records(records: &[Record], chunk_size: usize) -> AppResult<Vec<Element>> {
    if chunk_size == 0 {
        return Err(AppError::InvalidInput(
            "Chunk size must be greater than 0".into(),
        ));
    }

    records
        .chunks(chunk_size)
        .map(|chunk| {
            let mut root = Element::new(EPRINTS_ROOT);
            for record in chunk {
                root.push(map_record(record)?);
            }
            Ok(root)
        })
        .collect()
}

/// Transforms records into EPrints XML files.
///
/// Writes `{output_dir}/{base_file_name}{n}.xml` for n = 1, 2, ... with at
/// most `chunk_size` records per file (1000 when `None`).
///
/// Every chunk is mapped before the first file is written, so a record with
/// an unsupported value shape aborts the run without producing any output.
///
/// # Arguments
///
/// * `output_dir` - Directory receiving the XML files
/// * `base_file_name` - File name prefix, followed by the 1-based chunk index
/// * `records` - Records to transform
/// * `chunk_size` - Maximum number of records per file
/// * `reporter` - Receives per-file record counts and the completion signal
///
/// # Returns
///
/// The paths of the written files, in chunk order.
pub fn transform(
    output_dir: &Path,
    base_file_name: &str,
    records: &[Record],
    chunk_size: Option<usize>,
    reporter: &mut dyn Reporter,
) -> AppResult<Vec<PathBuf>> {
    let documents = map_records(records, chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE))?;
    let paths = write_documents(&documents, output_dir, base_file_name, reporter)?;
    reporter.transform_finished(paths.len(), records.len());
    Ok(paths)
}
