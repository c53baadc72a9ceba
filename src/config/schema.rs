//! Config schema and deserialization

use crate::ocr::OcrOptions;
use serde::Deserialize;
use std::path::Path;

/// Per-path override configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverride {
    /// Glob patterns this override applies to
    pub files: Vec<String>,

    /// Optional readability threshold for matched files
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Optional strict mode for matched files
    #[serde(default)]
    pub strict: Option<bool>,
}

/// Root config structure for .legiblerc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Minimum readability score (exit 1 if below). Default: none
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Fail when a document is not well-formed or not noise free
    #[serde(default)]
    pub strict: Option<bool>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Text document suffixes (default: .txt, .text, .md)
    #[serde(default)]
    pub file_patterns: Vec<String>,

    /// Image suffixes routed through OCR
    #[serde(default)]
    pub image_patterns: Vec<String>,

    /// Root directory to search for documents (relative to the CLI path)
    #[serde(default)]
    pub text_root: Option<String>,

    /// OCR engine settings
    #[serde(default)]
    pub ocr: Option<OcrOptions>,

    /// Per-path configuration overrides
    #[serde(default)]
    pub overrides: Vec<ConfigOverride>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<f64>, cli_strict: bool) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if cli_strict {
            self.strict = Some(true);
        }
        self
    }

    /// Get effective config for a specific file path, applying overrides
    pub fn effective_for_file(&self, file_path: &Path) -> EffectiveConfig {
        let mut effective = EffectiveConfig {
            threshold: self.threshold,
            strict: self.strict.unwrap_or(false),
        };

        for override_cfg in &self.overrides {
            if Self::matches_override(file_path, &override_cfg.files) {
                if let Some(threshold) = override_cfg.threshold {
                    effective.threshold = Some(threshold);
                }
                if let Some(strict) = override_cfg.strict {
                    effective.strict = strict;
                }
            }
        }

        effective
    }

    fn matches_override(file_path: &Path, patterns: &[String]) -> bool {
        let path_str = file_path.to_string_lossy();
        patterns.iter().any(|pattern| match globset::Glob::new(pattern) {
            Ok(glob) => {
                glob.compile_matcher().is_match(file_path)
                    || path_str.contains(pattern.trim_start_matches("**/"))
            }
            Err(_) => false,
        })
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.strict.is_none() {
            self.strict = base.strict;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.file_patterns.is_empty() {
            self.file_patterns = base.file_patterns;
        }
        if self.image_patterns.is_empty() {
            self.image_patterns = base.image_patterns;
        }
        if self.text_root.is_none() {
            self.text_root = base.text_root;
        }
        if self.ocr.is_none() {
            self.ocr = base.ocr;
        }

        // Base overrides come first so the child's win
        let mut all_overrides = base.overrides;
        all_overrides.append(&mut self.overrides);
        self.overrides = all_overrides;
    }

    /// Text document suffixes
    pub fn get_file_patterns(&self) -> Vec<&str> {
        if self.file_patterns.is_empty() {
            DEFAULT_FILE_PATTERNS.to_vec()
        } else {
            self.file_patterns.iter().map(String::as_str).collect()
        }
    }

    /// Image suffixes handed to OCR
    pub fn get_image_patterns(&self) -> Vec<&str> {
        if self.image_patterns.is_empty() {
            DEFAULT_IMAGE_PATTERNS.to_vec()
        } else {
            self.image_patterns.iter().map(String::as_str).collect()
        }
    }

    pub fn ocr_options(&self) -> OcrOptions {
        self.ocr.clone().unwrap_or_default()
    }

    pub fn is_strict(&self) -> bool {
        self.strict.unwrap_or(false)
    }
}

pub const DEFAULT_FILE_PATTERNS: &[&str] = &[".txt", ".text", ".md"];

pub const DEFAULT_IMAGE_PATTERNS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".tif", ".tiff", ".bmp", ".gif", ".webp",
];

/// Effective configuration for a specific file (after applying overrides)
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveConfig {
    pub threshold: Option<f64>,
    pub strict: bool,
}
