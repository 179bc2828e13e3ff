use std::fmt::Write;
use std::path::{Path, PathBuf};

use report_core::{total_headlines, HeadlineResult};

use crate::persist::{AtomicFileWriter, PersistError};

pub const EXPORT_FILENAME: &str = "headline_results.txt";

const DOCUMENT_TITLE: &str = "Management report headline results";
const RULE: &str = "========================================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub category_count: usize,
    pub headline_count: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Flat text rendition: category headers, numbered titles and strategy lines.
pub fn render_results_text(results: &[HeadlineResult]) -> String {
    let mut buffer = String::new();
    let _ = write!(buffer, "{DOCUMENT_TITLE}\n\n{RULE}\n\n");
    for result in results {
        let _ = write!(buffer, "[{}]\n\n", result.kind);
        for (index, headline) in result.headlines.iter().enumerate() {
            let _ = writeln!(buffer, "{}. {}", index + 1, headline.title);
            let _ = write!(buffer, "   - Strategy: {}\n\n", headline.strategy);
        }
        let _ = write!(buffer, "{RULE}\n\n");
    }
    buffer
}

pub fn export_results(
    output_dir: &Path,
    results: &[HeadlineResult],
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    let output_path = writer.write(EXPORT_FILENAME, &render_results_text(results))?;
    Ok(ExportSummary {
        category_count: results.len(),
        headline_count: total_headlines(results),
        output_path,
    })
}
