//! Input type detection: URL prefix, magic bytes, extension fallback
//!
//! Detection order matters: URL check first, then content sniffing for
//! files that exist, then the extension as a last resort. Anything
//! unmapped is `Unsupported` and must be rejected by the caller.

use std::io::Read;
use std::path::Path;

use crate::types::SourceType;

/// Magic-byte probe window; content sniffing never reads past this
const SNIFF_LEN: usize = 4096;

/// Check whether the input is a web URL
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Detect the input kind for a path or URL.
///
/// A path that does not exist on disk is `Unsupported` even when its
/// extension would otherwise map to a loader.
pub fn detect_input(input: &str) -> SourceType {
    if is_url(input) {
        return SourceType::Url;
    }

    let path = Path::new(input);
    if !path.exists() {
        return SourceType::Unsupported;
    }

    if let Some(prefix) = read_prefix(path) {
        if let Some(kind) = sniff_magic(&prefix) {
            return kind;
        }
    }

    extension_fallback(path)
}

/// Read at most [`SNIFF_LEN`] bytes of the file for content sniffing,
/// so large uploads are not slurped whole just to check a signature
fn read_prefix(path: &Path) -> Option<Vec<u8>> {
    let file = std::fs::File::open(path).ok()?;
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut prefix).ok()?;
    Some(prefix)
}

/// Classify file content by magic bytes.
///
/// Returns None when the signature is ambiguous (e.g. a bare ZIP that is
/// not a DOCX) so the extension fallback can decide.
pub fn sniff_magic(data: &[u8]) -> Option<SourceType> {
    if data.starts_with(b"%PDF") {
        return Some(SourceType::Pdf);
    }
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        return Some(SourceType::Image);
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        // JPEG
        return Some(SourceType::Image);
    }
    if data.starts_with(b"PK\x03\x04") {
        // OOXML container: DOCX carries word/ entries near the front
        let probe_len = data.len().min(SNIFF_LEN);
        if contains_subslice(&data[..probe_len], b"word/") {
            return Some(SourceType::Docx);
        }
        return None;
    }
    None
}

fn contains_subslice(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Map a file extension to a source type via MIME guessing
fn extension_fallback(path: &Path) -> SourceType {
    let mime = mime_guess::from_path(path).first();

    match mime {
        Some(mime) => match (mime.type_().as_str(), mime.subtype().as_str()) {
            ("text", "plain") => SourceType::Txt,
            ("application", "pdf") => SourceType::Pdf,
            ("application", "msword") => SourceType::Docx,
            ("application", "vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                SourceType::Docx
            }
            ("image", "png") | ("image", "jpeg") => SourceType::Image,
            _ => SourceType::Unsupported,
        },
        None => path
            .extension()
            .and_then(|e| e.to_str())
            .map(SourceType::from_extension)
            .unwrap_or(SourceType::Unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://en.wikipedia.org/wiki/Data_science"));
        assert!(!is_url("ftp://example.com"));
        assert!(!is_url("/tmp/notes.txt"));
    }

    #[test]
    fn test_url_detected_before_filesystem() {
        assert_eq!(detect_input("https://example.com/page"), SourceType::Url);
    }

    #[test]
    fn test_missing_file_is_unsupported() {
        assert_eq!(
            detect_input("/nonexistent/path/document.pdf"),
            SourceType::Unsupported
        );
    }

    #[test]
    fn test_sniff_magic() {
        assert_eq!(sniff_magic(b"%PDF-1.7 rest"), Some(SourceType::Pdf));
        assert_eq!(
            sniff_magic(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
            Some(SourceType::Image)
        );
        assert_eq!(sniff_magic(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(SourceType::Image));
        assert_eq!(sniff_magic(b"plain old text"), None);

        let mut docx = b"PK\x03\x04".to_vec();
        docx.extend_from_slice(b"......word/document.xml......");
        assert_eq!(sniff_magic(&docx), Some(SourceType::Docx));

        // A ZIP without word/ entries is ambiguous
        assert_eq!(sniff_magic(b"PK\x03\x04 other archive"), None);
    }

    #[test]
    fn test_extension_fallback_for_text_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        writeln!(file, "hello world").unwrap();
        assert_eq!(
            detect_input(file.path().to_str().unwrap()),
            SourceType::Txt
        );
    }

    #[test]
    fn test_pdf_content_wins_over_extension() {
        // Magic bytes take precedence over a misleading extension
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        file.write_all(b"%PDF-1.4 fake body").unwrap();
        assert_eq!(
            detect_input(file.path().to_str().unwrap()),
            SourceType::Pdf
        );
    }

    #[test]
    fn test_large_file_detected_from_prefix() {
        // body well past the sniff window; the signature alone decides
        let mut file = tempfile::Builder::new()
            .suffix(".bin")
            .tempfile()
            .unwrap();
        file.write_all(b"%PDF-1.5\n").unwrap();
        file.write_all(&vec![b'x'; SNIFF_LEN * 4]).unwrap();
        assert_eq!(
            detect_input(file.path().to_str().unwrap()),
            SourceType::Pdf
        );
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let file = tempfile::Builder::new()
            .suffix(".xyz")
            .tempfile()
            .unwrap();
        assert_eq!(
            detect_input(file.path().to_str().unwrap()),
            SourceType::Unsupported
        );
    }
}
