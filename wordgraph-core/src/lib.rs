//! Word-graph next-word prediction library.
//!
//! This crate learns which word follows which from submitted text and answers
//! "what word most likely follows this one" queries:
//! - Text normalization into tokens
//! - Incremental merge of word-pair counts into a persisted graph
//! - A derived "best next word" index kept up to date on every merge
//! - A storage interface with in-memory and file-backed implementations

/// Error and result types.
pub mod error;

/// Normalizer, records, merger and the `AutoComplete` facade.
pub mod model;

/// Storage interface (`DocumentStore`) and its implementations.
pub mod store;

/// File and path helpers.
pub mod io;

pub use error::{Error, Result};
pub use model::autocomplete::{AutoComplete, TrainOutcome};
