use crate::constants::OUTPUT_EXTENSION;
use crate::errors::{AppError, AppResult};
use crate::report::Reporter;
use crate::xml::{write_document, Element};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the `index`-th output file: `{output_dir}/{base_file_name}{index}.xml`.
pub fn output_path(output_dir: &Path, base_file_name: &str, index: usize) -> PathBuf {
    output_dir.join(format!("{base_file_name}{index}.{OUTPUT_EXTENSION}"))
}

/// Writes each document to its own file, numbering files from 1.
///
/// The output directory is created when missing and existing files are
/// overwritten. Every file is written and closed before the next one is
/// opened; the reporter is told the record count of each file.
///
/// # Returns
///
/// The written paths, in chunk order.
pub fn write_documents(
    documents: &[Element],
    output_dir: &Path,
    base_file_name: &str,
    reporter: &mut dyn Reporter,
) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| {
        AppError::IoError(format!(
            "Failed to create output directory {}: {e}",
            output_dir.display()
        ))
    })?;

    let mut paths = Vec::with_capacity(documents.len());
    for (offset, document) in documents.iter().enumerate() {
        let path = output_path(output_dir, base_file_name, offset + 1);
        write_document(document, &path)?;
        reporter.chunk_written(&path, document.children.len());
        paths.push(path);
    }
    Ok(paths)
}
