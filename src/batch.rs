use crate::airtable::TextFile;
use crate::{Pipeline, TxpixError};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened over a batch of documents
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Documents whose pages were all written
    pub rendered: usize,
    /// Documents abandoned after an error
    pub skipped: usize,
    /// Page images written across all documents
    pub pages: usize,
}

/// Every `.txt` file below `dir`, depth first, with the entries of each directory
/// visited in name order
pub fn find_text_files(dir: &Path) -> Result<Vec<PathBuf>, TxpixError> {
    let mut found = Vec::new();
    visit(dir, &mut found)?;
    Ok(found)
}

fn visit(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), TxpixError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            visit(&path, found)?;
        } else if path.extension().is_some_and(|ext| ext == "txt") {
            found.push(path);
        }
    }
    Ok(())
}

/// `notes/day1.txt` with output `out` becomes `out/day1`, which pages are then named after
pub fn output_base(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    output_dir.join(stem)
}

/// Render every text file below `input_dir` into `output_dir`, creating it if needed.
/// A document that fails is logged and skipped; only failing to list the input or to
/// create the output directory aborts the batch.
pub fn render_directory<R: Rng + ?Sized>(
    pipeline: &Pipeline,
    input_dir: &Path,
    output_dir: &Path,
    rng: &mut R,
) -> Result<BatchReport, TxpixError> {
    fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    for path in find_text_files(input_dir)? {
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable document");
                report.skipped += 1;
                continue;
            }
        };

        match pipeline.build(&data, &output_base(&path, output_dir), rng) {
            Ok(pages) => {
                report.rendered += 1;
                report.pages += pages.len();
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    source = ?std::error::Error::source(&err),
                    "skipping document"
                );
                report.skipped += 1;
            }
        }
    }

    info!(
        rendered = report.rendered,
        skipped = report.skipped,
        pages = report.pages,
        "batch finished"
    );
    Ok(report)
}

/// Write each fetched passage to `<dir>/<name>.txt`. Failures are logged and the
/// remaining files are still written. Returns the paths that were written.
pub fn write_text_files(dir: &Path, files: &[TextFile]) -> Vec<PathBuf> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(format!("{}.txt", file.name));
        match fs::write(&path, &file.body) {
            Ok(()) => {
                info!(path = %path.display(), "text file saved");
                written.push(path);
            }
            Err(err) => warn!(path = %path.display(), error = %err, "failed to write text file"),
        }
    }
    written
}
