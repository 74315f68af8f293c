//! Text extraction from scanned notes. Engines are compile-time optional:
//! the `pdf` feature pulls in `pdf-extract`, the `ocr` feature pulls in
//! Tesseract via `leptess`.

use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("no extraction engine for .{extension} files; rebuild with --features {feature}")]
    CapabilityMissing {
        extension: String,
        feature: &'static str,
    },
    #[error("extraction failed: {0}")]
    Engine(String),
}

/// Boundary to whatever produces text from a file. The pipeline only sees
/// this trait, so tests can substitute a canned implementation.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Extension-dispatched extractor backed by the compiled-in engines.
#[derive(Debug)]
pub struct FormatExtractor;

impl FormatExtractor {
    /// Checks at startup that every extension the scan is configured for has
    /// an engine compiled in, so a missing capability surfaces before any
    /// file is touched instead of as silent empty text per file.
    pub fn new(extensions: &[String]) -> Result<Self, ExtractError> {
        for ext in extensions {
            let ext = ext.to_lowercase();
            if ext == "pdf" && !cfg!(feature = "pdf") {
                return Err(ExtractError::CapabilityMissing {
                    extension: ext,
                    feature: "pdf",
                });
            }
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) && !cfg!(feature = "ocr") {
                return Err(ExtractError::CapabilityMissing {
                    extension: ext,
                    feature: "ocr",
                });
            }
        }
        Ok(Self)
    }
}

impl TextExtractor for FormatExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let text = match ext.as_str() {
            "pdf" => {
                info!("Extracting text from PDF: {}", path.display());
                pdf_text(path)?
            }
            e if IMAGE_EXTENSIONS.contains(&e) => {
                info!("Extracting text from image: {}", path.display());
                ocr_text(path)?
            }
            _ => return Err(ExtractError::Unsupported(ext)),
        };

        debug!("Extracted {} characters from {}", text.len(), path.display());
        Ok(text)
    }
}

#[cfg(feature = "pdf")]
fn pdf_text(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Engine(e.to_string()))
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(_path: &Path) -> Result<String, ExtractError> {
    Err(ExtractError::CapabilityMissing {
        extension: "pdf".to_string(),
        feature: "pdf",
    })
}

#[cfg(feature = "ocr")]
fn ocr_text(path: &Path) -> Result<String, ExtractError> {
    let mut tess = leptess::LepTess::new(None, "eng")
        .map_err(|e| ExtractError::Engine(e.to_string()))?;
    tess.set_image(path)
        .map_err(|e| ExtractError::Engine(e.to_string()))?;
    tess.get_utf8_text()
        .map_err(|e| ExtractError::Engine(e.to_string()))
}

#[cfg(not(feature = "ocr"))]
fn ocr_text(path: &Path) -> Result<String, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    Err(ExtractError::CapabilityMissing {
        extension: ext,
        feature: "ocr",
    })
}
