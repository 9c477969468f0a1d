//! NewsForge pipeline
//!
//! The producer→queue→consumer core:
//! - [`producer_runner`]: fetch a producer's feed, filter by category
//!   keywords, enqueue matches, and record the run on the producer
//! - [`queue_processor`]: claim a queue item, rewrite it through the
//!   LLM, post-process the response, and create a pending article
//! - [`dedup`]: pure dedup planning over normalized titles
//! - [`postprocess`]: LLM response parsing, topic sanitization, and
//!   body annotation
//! - [`scheduler`]: periodic sweep that runs due producers concurrently

pub mod dedup;
pub mod postprocess;
pub mod producer_runner;
pub mod queue_processor;
pub mod scheduler;

pub use dedup::{plan_dedup, DedupEntry, DedupGroup, DedupPlan};
pub use producer_runner::{ProducerRunner, RunSummary};
pub use queue_processor::QueueProcessor;
