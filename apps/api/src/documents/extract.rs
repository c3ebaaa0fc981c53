//! Text sources for the two uploaded documents: a PDF résumé and a CSV job description.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error extracting CV text: {0}")]
    Pdf(String),

    #[error("Error extracting JD text: {0}")]
    Table(#[from] csv::Error),

    #[error("Extraction task failed: {0}")]
    Task(String),
}

/// Reduces uploaded document bytes to raw text for screening.
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn cv_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
    async fn jd_text(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF CV via `pdf-extract`, CSV job description via `csv`.
pub struct FileTextSource;

#[async_trait]
impl TextSource for FileTextSource {
    async fn cv_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let owned = bytes.to_vec();
        // pdf-extract is CPU-bound and synchronous
        let text = tokio::task::spawn_blocking(move || pdf_to_text(&owned))
            .await
            .map_err(|e| ExtractionError::Task(e.to_string()))??;
        debug!(chars = text.len(), "Extracted CV text");
        Ok(text)
    }

    async fn jd_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = csv_to_text(bytes)?;
        debug!(chars = text.len(), "Extracted JD text");
        Ok(text)
    }
}

pub fn pdf_to_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Flattens a CSV table to text.
///
/// Bytes are read as ISO-8859-1. The first row is a header and is left out.
/// Cells are trimmed; empty cells and rows are skipped. Cells join with a
/// space and rows with a newline. The Windows-1252 apostrophe (0x92) that
/// Latin-1 decodes to U+0092 is mapped back to `'`.
pub fn csv_to_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let decoded = decode_latin1(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<&str> = record
            .iter()
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .collect();
        if !cells.is_empty() {
            lines.push(cells.join(" "));
        }
    }

    Ok(lines.join("\n").replace('\u{0092}', "'"))
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_skips_header_and_empty_rows() {
        let csv = b"Title,Description\nBackend Engineer,Python and SQL\n,\n,Docker a plus\n";
        let text = csv_to_text(csv).unwrap();
        assert_eq!(text, "Backend Engineer Python and SQL\nDocker a plus");
    }

    #[test]
    fn test_csv_handles_quoted_cells_and_ragged_rows() {
        let csv = b"a,b,c\n\"Python, SQL\",\"  React  \"\nonly one\n";
        let text = csv_to_text(csv).unwrap();
        assert_eq!(text, "Python, SQL React\nonly one");
    }

    #[test]
    fn test_csv_decodes_latin1_and_smart_apostrophe() {
        let mut csv = b"jd\nWe\x92re hiring a d\xe9veloppeur\n".to_vec();
        csv.extend_from_slice(b"Java\n");
        let text = csv_to_text(&csv).unwrap();
        assert_eq!(text, "We're hiring a d\u{00e9}veloppeur\nJava");
    }

    #[test]
    fn test_csv_header_only_is_empty() {
        assert_eq!(csv_to_text(b"Job Description\n").unwrap(), "");
        assert_eq!(csv_to_text(b"").unwrap(), "");
    }

    #[test]
    fn test_pdf_garbage_is_typed_error() {
        let err = pdf_to_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
        assert!(err.to_string().starts_with("Error extracting CV text"));
    }

    #[tokio::test]
    async fn test_file_text_source_reads_jd() {
        let text = FileTextSource
            .jd_text(b"h\nKubernetes,AWS\n")
            .await
            .unwrap();
        assert_eq!(text, "Kubernetes AWS");
    }
}
