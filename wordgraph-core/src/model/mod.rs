//! Top-level module of the word-graph predictor.
//!
//! This module provides a first-order (word → next word) predictor, including:
//! - Corpus normalization (`normalizer`)
//! - Persisted record shapes (`records`)
//! - The incremental merge of a corpus into the graph (`merger`)
//! - A high-level training / completion interface (`autocomplete`)

/// High-level interface: train, complete, reset and rebuild over a `DocumentStore`.
pub mod autocomplete;

/// Incremental merge of a token sequence into the persisted word graph.
///
/// Produces the adjacency and prediction write-sets of one training call.
pub mod merger;

/// Text to token sequence transform.
pub mod normalizer;

/// `AdjacencyRecord` and `PredictionRecord`, the two persisted documents.
pub mod records;
