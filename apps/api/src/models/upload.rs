//! Uploaded file representation. Transient — exists only for one request.

use bytes::Bytes;

/// Declared format of an upload, derived from the filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Docx,
}

impl FileFormat {
    pub fn from_filename(name: &str) -> Option<Self> {
        let ext = name.rsplit('.').next()?;
        if ext.eq_ignore_ascii_case("pdf") {
            Some(FileFormat::Pdf)
        } else if ext.eq_ignore_ascii_case("docx") {
            Some(FileFormat::Docx)
        } else {
            None
        }
    }

    /// Cross-check the declared format against the file's magic bytes.
    /// PDF headers may be preceded by junk, so the scan covers the first 1 KiB.
    pub fn matches_magic(&self, bytes: &[u8]) -> bool {
        match self {
            FileFormat::Pdf => bytes
                .windows(5)
                .take(1024)
                .any(|window| window == b"%PDF-"),
            // DOCX is a ZIP container
            FileFormat::Docx => bytes.starts_with(b"PK\x03\x04"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "PDF",
            FileFormat::Docx => "DOCX",
        }
    }
}

/// Raw upload bytes plus the declared format.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub format: FileFormat,
    pub bytes: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_filename() {
        assert_eq!(
            FileFormat::from_filename("resume.pdf"),
            Some(FileFormat::Pdf)
        );
        assert_eq!(
            FileFormat::from_filename("Resume.DOCX"),
            Some(FileFormat::Docx)
        );
        assert_eq!(FileFormat::from_filename("resume.txt"), None);
        assert_eq!(FileFormat::from_filename("resume"), None);
    }

    #[test]
    fn test_pdf_magic_allows_leading_junk() {
        assert!(FileFormat::Pdf.matches_magic(b"%PDF-1.7 rest"));
        assert!(FileFormat::Pdf.matches_magic(b"\xef\xbb\xbf%PDF-1.4"));
        assert!(!FileFormat::Pdf.matches_magic(b"PK\x03\x04"));
    }

    #[test]
    fn test_docx_magic_requires_zip_header() {
        assert!(FileFormat::Docx.matches_magic(b"PK\x03\x04rest"));
        assert!(!FileFormat::Docx.matches_magic(b"%PDF-1.7"));
    }
}
