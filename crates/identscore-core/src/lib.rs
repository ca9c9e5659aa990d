pub mod config;
pub mod extractor;
pub mod matcher;
pub mod pipeline;
pub mod scorer;
pub mod segmenter;
pub mod types;
pub mod vocabulary;

pub use config::{Config, ReportFormat};
pub use extractor::{EntitySink, ExcludedIdentifiers, LanguageExtractor};
pub use matcher::DictionaryMatcher;
pub use pipeline::{discover_files, PipelineError, ScoringPipeline};
pub use scorer::{EntityScorer, ScoreBreakdown};
pub use types::*;
pub use vocabulary::Vocabulary;
