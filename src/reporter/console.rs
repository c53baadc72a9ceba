//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::readability::{ReadabilityCalculator, READABILITY_TARGET};
use crate::{AnalysisResult, Language, Readability};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, result: &AnalysisResult) {
        self.print_header(result);
        self.print_readability(result);
        self.print_checks(result);
        self.print_suggestions(result);
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[AnalysisResult], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (one line per document)
    pub fn report_quiet(&self, result: &AnalysisResult) {
        println!("{}", self.quiet_line(result));
    }

    /// `path: score (valid|invalid, noise|clean)`
    pub fn quiet_line(&self, result: &AnalysisResult) -> String {
        let score = match result.report.readability {
            Readability::Score(s) => format!("{:.2}", s),
            Readability::TooShort => "too-short".to_string(),
        };
        let valid = if result.report.is_valid { "valid" } else { "invalid" };
        let noise = if result.noise_free { "clean" } else { "noisy" };
        format!(
            "{}: {} ({}, {})",
            result.file_path.display(),
            score,
            self.paint_flag(valid, result.report.is_valid),
            self.paint_flag(noise, result.noise_free)
        )
    }

    fn print_header(&self, result: &AnalysisResult) {
        println!();
        println!(
            "{}",
            format!("📄 Text Quality Analysis: {}", result.file_path.display()).bold()
        );
        println!(
            "   Source: {} | Lines: {} | Words: {} | Sentences: {}",
            result.source_kind, result.stats.lines, result.stats.words, result.stats.sentences
        );
        println!();
    }

    fn print_readability(&self, result: &AnalysisResult) {
        match result.report.readability {
            Readability::Score(score) => {
                println!("   Readability: {}", self.create_score_bar(score));
                if let Some(level) = result.reading_level {
                    println!(
                        "   {} {}",
                        level.to_string().bold(),
                        ReadabilityCalculator::level_description(level).dimmed()
                    );
                }
            }
            Readability::TooShort => {
                println!("   Readability: {}", result.report.readability.to_string().dimmed());
            }
        }
        if self.verbose {
            println!(
                "   {}",
                format!("{} syllables over {} words", result.stats.syllables, result.stats.words)
                    .dimmed()
            );
        }
        println!();
    }

    fn print_checks(&self, result: &AnalysisResult) {
        println!("   {}", "Checks:".bold());

        let report = &result.report;
        self.print_check("Well-formed", report.is_valid, None);
        self.print_check(
            "Language",
            report.language == Language::English,
            Some(report.language.to_string()),
        );
        self.print_check(
            "No repeated sentences",
            !report.is_redundant,
            None,
        );
        let noise_detail = result
            .noise
            .as_ref()
            .map(|n| format!("L{}: {} \"{}\"", n.line, n.kind, n.excerpt));
        self.print_check("Noise free", result.noise_free, noise_detail);
        println!();
    }

    fn print_check(&self, name: &str, passed: bool, detail: Option<String>) {
        let icon = if passed { "✓".green() } else { "✗".red() };
        match detail {
            Some(detail) => println!("   {} {} {}", icon, name, detail.dimmed()),
            None => println!("   {} {}", icon, name),
        }
    }

    fn print_suggestions(&self, result: &AnalysisResult) {
        if result.report.suggestions.is_empty() {
            return;
        }
        println!("   {}", "Suggestions:".bold());
        for suggestion in &result.report.suggestions {
            println!("   {} {}", "→".cyan(), suggestion);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Documents analyzed:  {}",
            stats.documents_analyzed.to_string().bold()
        );
        match stats.average_readability {
            Some(avg) => println!("   Average readability: {}", self.create_score_bar(avg)),
            None => println!("   Average readability: {}", "n/a".dimmed()),
        }
        println!(
            "   Well-formed:         {}/{}",
            stats.valid_documents, stats.documents_analyzed
        );
        println!(
            "   Noise free:          {}/{}",
            stats.noise_free_documents, stats.documents_analyzed
        );
        println!("   Total words:         {}", stats.total_words);
        println!("   Total suggestions:   {}", stats.total_suggestions);
        println!();
    }

    fn paint_flag(&self, label: &str, good: bool) -> String {
        if !self.use_colors {
            return label.to_string();
        }
        if good {
            label.green().to_string()
        } else {
            label.red().to_string()
        }
    }

    /// Bar over the 0-100 range; the number itself is printed unclamped
    fn create_score_bar(&self, score: f64) -> String {
        let clamped = score.clamp(0.0, 100.0);
        let filled = ((clamped * 20.0) / 100.0) as usize;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>7.2}", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 80.0 {
                bar.green().to_string()
            } else if score >= READABILITY_TARGET {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QualityReport, SourceKind, TextStats};
    use std::path::PathBuf;

    fn result(readability: Readability, valid: bool, noise_free: bool) -> AnalysisResult {
        AnalysisResult {
            file_path: PathBuf::from("scan.txt"),
            source_kind: SourceKind::Image,
            report: QualityReport {
                is_valid: valid,
                language: Language::English,
                is_redundant: false,
                readability,
                suggestions: vec![],
            },
            noise_free,
            noise: None,
            reading_level: readability.level(),
            stats: TextStats::default(),
        }
    }

    #[test]
    fn test_quiet_line() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(
            reporter.quiet_line(&result(Readability::Score(72.456), true, false)),
            "scan.txt: 72.46 (valid, noisy)"
        );
        assert_eq!(
            reporter.quiet_line(&result(Readability::TooShort, false, true)),
            "scan.txt: too-short (invalid, clean)"
        );
    }

    #[test]
    fn test_score_bar_clamps_fill() {
        let reporter = ConsoleReporter::new().without_colors();
        let high = reporter.create_score_bar(121.22);
        assert!(high.starts_with(&format!("[{}]", "█".repeat(20))));
        assert!(high.ends_with("121.22"));

        let low = reporter.create_score_bar(-35.5);
        assert!(low.starts_with(&format!("[{}]", "░".repeat(20))));
        assert!(low.ends_with("-35.50"));

        let half = reporter.create_score_bar(50.0);
        assert!(half.starts_with(&format!("[{}{}]", "█".repeat(10), "░".repeat(10))));
    }
}
