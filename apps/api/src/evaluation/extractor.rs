//! Resume text extraction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
}

/// Extracts plain text from an uploaded PDF, pages concatenated in document
/// order. Works on the in-memory upload buffer; nothing touches disk.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, ExtractError> {
    Ok(pdf_extract::extract_text_from_mem(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let result = extract_resume_text(b"definitely not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_extraction_error_has_a_message() {
        let err = extract_resume_text(&[0u8; 16]).unwrap_err();
        assert!(err.to_string().starts_with("could not read PDF"));
    }
}
