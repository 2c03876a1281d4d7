//! Error types for the word-graph core.

use thiserror::Error;

/// Failures surfaced by training, lookup, reset and the storage layer.
///
/// A corpus that normalizes to fewer than two tokens is not an error:
/// see [`TrainOutcome::Empty`](crate::model::autocomplete::TrainOutcome::Empty).
#[derive(Debug, Error)]
pub enum Error {
	/// The word has never been observed as a predecessor.
	#[error("no prediction for word '{word}'")]
	NotFound { word: String },

	/// At least one of the two bulk writes of a training call was refused.
	///
	/// Each flag tells whether that collection confirmed its write. Nothing is
	/// rolled back, so `adjacency == true` with `predictions == false` leaves a
	/// stale prediction index until the next rebuild.
	#[error("bulk write not acknowledged (adjacency: {adjacency}, predictions: {predictions})")]
	PersistenceUnacknowledged { adjacency: bool, predictions: bool },

	/// The backing storage could not be reached (file system, connection...).
	#[error("storage unavailable: {0}")]
	StorageUnavailable(#[from] std::io::Error),

	/// A stored document could not be encoded or decoded.
	#[error("document codec error: {0}")]
	Codec(#[from] postcard::Error),
}

/// Result type for word-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
