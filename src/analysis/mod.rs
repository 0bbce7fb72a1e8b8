//! Log analysis backends
//!
//! One trait, two implementations: a generative backend over a chat
//! completions API and a fixed-content fallback. Selection happens by
//! configuration at startup.

pub mod chat_analyzer;
pub mod log_source;
pub mod static_analyzer;
pub mod traits;

pub use chat_analyzer::ChatAnalyzer;
pub use log_source::{LogSource, SAMPLE_LOG};
pub use static_analyzer::{fallback_analysis, StaticAnalyzer, DEFAULT_BODY, DEFAULT_TITLE};
pub use traits::{LogAnalysis, LogAnalyzer};
