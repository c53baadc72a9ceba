//! Analysis engine - turns documents into analysis results

use crate::config::Config;
use crate::nlp::{LexiconTagger, Tagger};
use crate::ocr::{self, OcrOptions, OcrSession, Recognizer, TesseractRecognizer};
use crate::{AnalysisResult, SourceKind, TextInput};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::noise::LineNoiseValidator;
use super::readability::ReadabilityCalculator;
use super::TextAnalyzer;

/// Main analysis engine: reads documents, runs OCR on images and scores the text
pub struct AnalysisEngine<T = LexiconTagger> {
    analyzer: TextAnalyzer<T>,
    noise: LineNoiseValidator,
    /// OCR settings that take precedence over the config's `ocr` section
    ocr: Option<OcrOptions>,
}

impl AnalysisEngine {
    /// Create a new analysis engine
    pub fn new() -> Self {
        Self {
            analyzer: TextAnalyzer::new(),
            noise: LineNoiseValidator::new(),
            ocr: None,
        }
    }
}

impl<T: Tagger> AnalysisEngine<T> {
    /// Use a custom tagger
    pub fn with_tagger<U: Tagger>(self, tagger: U) -> AnalysisEngine<U> {
        AnalysisEngine {
            analyzer: TextAnalyzer::with_tagger(tagger),
            noise: self.noise,
            ocr: self.ocr,
        }
    }

    /// Set OCR options
    pub fn with_ocr_options(mut self, options: OcrOptions) -> Self {
        self.ocr = Some(options);
        self
    }

    /// Analyze a document on disk. Files matching the image patterns go
    /// through OCR, everything else is read as UTF-8 text.
    pub fn analyze(&self, path: &Path, config: Option<&Config>) -> Result<AnalysisResult> {
        let default_config = Config::default();
        let cfg = config.unwrap_or(&default_config);

        if ocr::is_image_path(path, &cfg.get_image_patterns()) {
            let options = self.ocr.clone().unwrap_or_else(|| cfg.ocr_options());
            return self.analyze_image(path, TesseractRecognizer::new(options));
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?;
        Ok(self.analyze_source(&text, path, SourceKind::Text))
    }

    /// Run one OCR session over an image and analyze the recognized lines
    pub fn analyze_image<R: Recognizer>(&self, path: &Path, recognizer: R) -> Result<AnalysisResult> {
        let mut session = OcrSession::create(recognizer);
        let lines = session
            .recognize(path)
            .with_context(|| format!("Failed to recognize image: {}", path.display()))?;
        session.release();

        Ok(self.analyze_input(&TextInput::Lines(lines), path, SourceKind::Image))
    }

    /// Analyze raw text (e.g. stdin). `virtual_path` names the document in reports.
    pub fn analyze_source(&self, text: &str, virtual_path: &Path, kind: SourceKind) -> AnalysisResult {
        self.analyze_input(&TextInput::from_raw(text), virtual_path, kind)
    }

    /// Analyze an already split sequence of lines
    pub fn analyze_lines<S: AsRef<str>>(
        &self,
        lines: &[S],
        virtual_path: &Path,
        kind: SourceKind,
    ) -> AnalysisResult {
        let input = TextInput::Lines(lines.iter().map(|l| l.as_ref().to_string()).collect());
        self.analyze_input(&input, virtual_path, kind)
    }

    /// Analyze any text input
    pub fn analyze_input(&self, input: &TextInput, path: &Path, kind: SourceKind) -> AnalysisResult {
        let report = self.analyzer.analyze(input);
        let lines = input.lines();
        let noise = self.noise.find_noise(&lines);
        let cleaned = self.analyzer.clean(input);
        let stats = ReadabilityCalculator::stats(&cleaned, lines.len());

        debug!(
            path = %path.display(),
            valid = report.is_valid,
            noise_free = noise.is_none(),
            readability = %report.readability,
            "document analyzed"
        );

        AnalysisResult {
            file_path: path.to_path_buf(),
            source_kind: kind,
            reading_level: report.readability.level(),
            report,
            noise_free: noise.is_none(),
            noise,
            stats,
        }
    }

    /// Analyze multiple documents sequentially
    pub fn analyze_many(&self, paths: &[&Path], config: Option<&Config>) -> Vec<Result<AnalysisResult>> {
        paths.iter().map(|p| self.analyze(p, config)).collect()
    }

    /// Analyze multiple documents in parallel using rayon
    pub fn analyze_parallel(
        &self,
        paths: &[PathBuf],
        config: Option<&Config>,
    ) -> Vec<Result<AnalysisResult>>
    where
        T: Sync,
    {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze(p, config)).collect()
    }
}

impl AnalysisEngine {
    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[AnalysisResult]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats::default();
        }

        let scores: Vec<f64> = results
            .iter()
            .filter_map(|r| r.report.readability.score())
            .collect();
        let average_readability = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        AggregateStats {
            documents_analyzed: results.len(),
            valid_documents: results.iter().filter(|r| r.report.is_valid).count(),
            noise_free_documents: results.iter().filter(|r| r.noise_free).count(),
            average_readability,
            total_words: results.iter().map(|r| r.stats.words).sum(),
            total_suggestions: results.iter().map(|r| r.report.suggestions.len()).sum(),
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregate statistics from multiple document analyses
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of documents analyzed
    pub documents_analyzed: usize,
    /// Documents that passed the well-formedness check
    pub valid_documents: usize,
    /// Documents without noisy lines
    pub noise_free_documents: usize,
    /// Mean readability over documents with a numeric score
    pub average_readability: Option<f64>,
    /// Total words across all documents
    pub total_words: usize,
    /// Total suggestions across all documents
    pub total_suggestions: usize,
}
