//! OCR integration
//!
//! Recognition runs through an explicit [`OcrSession`] handle with a
//! create → recognize → release lifecycle. The engine itself sits behind the
//! [`Recognizer`] trait; [`TesseractRecognizer`] drives the `tesseract` CLI.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by the OCR layer
#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine binary could not be started
    #[error("OCR engine `{command}` is not available (is it installed?): {source}")]
    Unavailable {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The engine ran but reported a failure
    #[error("OCR engine failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
    #[error("Image not found: {}", .0.display())]
    MissingImage(PathBuf),
    /// `recognize` was called after `release`
    #[error("OCR session has already been released")]
    Released,
}

/// OCR engine options (the `ocr` section of the config file)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrOptions {
    /// Engine executable
    pub command: String,
    /// Recognition language(s), e.g. "eng" or "eng+deu"
    pub language: String,
    /// Page segmentation mode
    pub psm: u8,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: "eng".to_string(),
            psm: 3,
        }
    }
}

/// A recognition engine
pub trait Recognizer {
    /// Recognize the text of one image
    fn recognize(&mut self, image: &Path) -> Result<String, OcrError>;

    /// Free engine resources. Called once by [`OcrSession::release`].
    fn release(&mut self) {}
}

/// Recognizer backed by the `tesseract` command-line tool
#[derive(Debug, Clone, Default)]
pub struct TesseractRecognizer {
    options: OcrOptions,
}

impl TesseractRecognizer {
    pub fn new(options: OcrOptions) -> Self {
        Self { options }
    }
}

impl Recognizer for TesseractRecognizer {
    fn recognize(&mut self, image: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.options.command)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.options.language)
            .arg("--psm")
            .arg(self.options.psm.to_string())
            .output()
            .map_err(|source| OcrError::Unavailable {
                command: self.options.command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// An explicit OCR handle. Create it, recognize any number of images, then
/// release it (dropping the session releases it as well).
pub struct OcrSession<R: Recognizer> {
    recognizer: Option<R>,
    recognized: usize,
}

impl<R: Recognizer> OcrSession<R> {
    pub fn create(recognizer: R) -> Self {
        debug!("OCR session created");
        Self {
            recognizer: Some(recognizer),
            recognized: 0,
        }
    }

    /// Recognize an image and return its non-empty lines
    pub fn recognize(&mut self, image: &Path) -> Result<Vec<String>, OcrError> {
        let recognizer = self.recognizer.as_mut().ok_or(OcrError::Released)?;
        if !image.is_file() {
            return Err(OcrError::MissingImage(image.to_path_buf()));
        }

        info!(image = %image.display(), "running OCR");
        let text = recognizer.recognize(image)?;
        self.recognized += 1;

        let lines = crate::split_lines(&text);
        debug!(lines = lines.len(), "OCR finished");
        Ok(lines)
    }

    /// Release the engine. Further `recognize` calls fail with `Released`.
    pub fn release(&mut self) {
        if let Some(mut recognizer) = self.recognizer.take() {
            recognizer.release();
            debug!(images = self.recognized, "OCR session released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.recognizer.is_none()
    }

    /// Images recognized so far
    pub fn recognized(&self) -> usize {
        self.recognized
    }
}

impl<R: Recognizer> Drop for OcrSession<R> {
    fn drop(&mut self) {
        self.release();
    }
}

/// True when a file name ends with one of the image suffixes
pub fn is_image_path(path: &Path, image_patterns: &[&str]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    image_patterns.iter().any(|p| name.ends_with(p))
}
