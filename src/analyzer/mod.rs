//! Analyzer module - text quality checks and the document engine

pub mod clean;
pub mod engine;
pub mod noise;
pub mod readability;
pub mod suggestions;
pub mod text;

pub use engine::{AggregateStats, AnalysisEngine};
pub use noise::{is_noise_free, LineNoiseValidator, NoiseFinding, NoiseKind};
pub use readability::ReadabilityCalculator;
pub use text::TextAnalyzer;
