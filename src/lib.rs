//! Resume extractor library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod ranking;
pub mod llm;
pub mod output;

pub use error::{Result, ResumeExtractorError};
pub use config::Config;
