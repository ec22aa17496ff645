//! Image OCR loader backed by the tesseract CLI

use std::process::Command;

use async_trait::async_trait;

use super::{paragraphs_to_records, title_from_path, DocumentLoader};
use crate::error::{Error, Result};
use crate::types::{DocumentRecord, SourceType};

/// Runs tesseract over an image and loads the recognized text.
///
/// Construction probes for the binary; a missing install surfaces as
/// [`Error::LoaderUnavailable`] so image ingestion degrades cleanly
/// instead of failing at load time.
pub struct ImageLoader {
    binary: String,
}

impl ImageLoader {
    pub fn new() -> Result<Self> {
        Self::with_binary("tesseract")
    }

    pub fn with_binary(binary: &str) -> Result<Self> {
        let probe = Command::new(binary).arg("--version").output();
        match probe {
            Ok(out) if out.status.success() => Ok(Self {
                binary: binary.to_string(),
            }),
            Ok(out) => Err(Error::loader_unavailable(
                "image",
                format!("{binary} --version exited with {}", out.status),
            )),
            Err(e) => Err(Error::loader_unavailable(
                "image",
                format!("{binary} not found: {e}"),
            )),
        }
    }

    fn run_ocr(&self, input: &str) -> Result<String> {
        // "stdout" as the output base makes tesseract print the text
        let output = Command::new(&self.binary)
            .arg(input)
            .arg("stdout")
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Internal(format!(
                "tesseract failed on {input}: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl DocumentLoader for ImageLoader {
    async fn load(&self, input: &str) -> Result<Vec<DocumentRecord>> {
        if !std::path::Path::new(input).exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("image not found: {input}"),
            )));
        }

        let binary = self.binary.clone();
        let path = input.to_string();
        let text = tokio::task::spawn_blocking(move || {
            ImageLoader { binary }.run_ocr(&path)
        })
        .await
        .map_err(|e| Error::Internal(format!("ocr task failed: {e}")))??;

        let title = title_from_path(input);
        Ok(paragraphs_to_records(&text, input, &title, SourceType::Image))
    }

    fn name(&self) -> &str {
        "image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_reports_unavailable() {
        let result = ImageLoader::with_binary("definitely-not-a-real-ocr-binary");
        assert!(matches!(result, Err(Error::LoaderUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_missing_image_is_io_error() {
        // skip when tesseract is not installed in the environment
        let Ok(loader) = ImageLoader::new() else {
            return;
        };
        let result = loader.load("/nonexistent/scan.png").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
