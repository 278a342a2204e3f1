use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Receives progress events from the mapper and the tag filter.
///
/// A reporter is created per invocation and passed explicitly into the
/// component doing the work.
pub trait Reporter {
    /// A chunk of `records` records was written to `path`.
    fn chunk_written(&mut self, path: &Path, records: usize);

    /// All chunks were written.
    fn transform_finished(&mut self, files: usize, records: usize);

    /// The tag filter stored its result in `output`.
    fn tags_stripped(&mut self, kept: &BTreeSet<String>, removed: &BTreeSet<String>, output: &Path);
}

/// Reports through `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn chunk_written(&mut self, path: &Path, records: usize) {
        info!(
            file = %path.display(),
            records = records,
            "Transformed and stored records"
        );
    }

    fn transform_finished(&mut self, files: usize, records: usize) {
        info!(files = files, records = records, "Finished transformation");
    }

    fn tags_stripped(&mut self, kept: &BTreeSet<String>, removed: &BTreeSet<String>, output: &Path) {
        info!(kept = ?kept, "Kept XML elements");
        info!(removed = ?removed, "Removed XML elements");
        info!(output = %output.display(), "Stored result");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_reporter_runs() {
        let mut reporter = TracingReporter;
        reporter.chunk_written(Path::new("out/data-1.xml"), 1000);
        reporter.transform_finished(1, 1000);
        let kept: BTreeSet<String> = ["title".to_string()].into_iter().collect();
        reporter.tags_stripped(&kept, &BTreeSet::new(), Path::new("output-data.xml"));
    }
}
