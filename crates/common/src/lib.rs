//! NewsForge Common Library
//!
//! Shared code for all NewsForge services including:
//! - Database models and repository patterns
//! - LLM rewriter client abstraction
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod db;
pub mod errors;
pub mod llm;
pub mod metrics;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Repository;
pub use errors::{AppError, Result};
pub use llm::Rewriter;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default LLM model for article rewriting
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Maximum number of topics attached to a generated article
pub const MAX_TOPICS: usize = 10;
