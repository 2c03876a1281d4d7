use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use super::merger::{self, MergePlan};
use super::normalizer::normalize;
use super::records::{AdjacencyRecord, PredictionRecord, ADJACENCY_COLLECTION, PREDICTION_COLLECTION};
use crate::error::{Error, Result};
use crate::store::{Acknowledgment, DocumentStore, WriteOp};

/// Result of a successful training call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainOutcome {
	/// The corpus normalized to fewer than two tokens: nothing to merge,
	/// nothing written.
	Empty,
	/// Both write-sets were acknowledged.
	Merged {
		/// Token pairs folded into the graph.
		pairs: usize,
		/// Words seen as predecessor for the first time.
		inserted: usize,
		/// Already persisted words whose records were updated.
		updated: usize,
	},
}

/// Acknowledgments of the two bulk writes of a training call.
///
/// The two collections are written one after the other without any
/// transaction spanning both: a refused second write does not undo the first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DualWriteAck {
	pub adjacency: Acknowledgment,
	pub predictions: Acknowledgment,
}

impl DualWriteAck {
	/// Returns `true` only if both collections confirmed their write.
	pub fn is_complete(&self) -> bool {
		self.adjacency.acknowledged && self.predictions.acknowledged
	}
}

/// Submits the two write-sets of a merge, adjacency first.
///
/// Best-effort: the prediction set is submitted even when the adjacency set is
/// refused, and nothing is rolled back. Callers must check `is_complete`.
pub fn dual_write<S: DocumentStore>(store: &mut S, plan: MergePlan) -> Result<DualWriteAck> {
	let adjacency = store.bulk_upsert(ADJACENCY_COLLECTION, plan.adjacency)?;
	let predictions = store.bulk_upsert(PREDICTION_COLLECTION, plan.predictions)?;
	Ok(DualWriteAck { adjacency, predictions })
}

/// Next-word predictor backed by a persisted word graph.
///
/// # Responsibilities
/// - Train: normalize a corpus, merge it into the persisted graph, write it back
/// - Complete: return the most frequent successor of a word
/// - Reset the whole graph, or rebuild the prediction index from adjacency
///
/// The store is injected, so the same logic runs over memory or disk.
///
/// # Notes
/// - Every call is one read-modify-write cycle with no isolation: concurrent
///   trainers must be serialized by the caller (the server holds a mutex).
#[derive(Debug)]
pub struct AutoComplete<S: DocumentStore> {
	store: S,
}

impl<S: DocumentStore> AutoComplete<S> {
	/// Creates a predictor over `store`.
	pub fn new(store: S) -> Self {
		Self { store }
	}

	/// Returns the underlying store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// Returns the underlying store, mutably.
	pub fn store_mut(&mut self) -> &mut S {
		&mut self.store
	}

	/// Folds `corpus` into the persisted word graph.
	///
	/// # Behavior
	/// - Normalizes the corpus; fewer than two tokens is a no-op (`Empty`).
	/// - Reads the adjacency and prediction records of the corpus predecessors.
	/// - Merges, then submits both write-sets with `dual_write`.
	///
	/// # Errors
	/// - `PersistenceUnacknowledged` if either bulk write was refused.
	/// - `StorageUnavailable` / `Codec` from the store, propagated as is.
	pub fn train(&mut self, corpus: &str) -> Result<TrainOutcome> {
		let tokens = normalize(corpus);
		if tokens.len() < 2 {
			debug!("corpus has {} token(s), nothing to merge", tokens.len());
			return Ok(TrainOutcome::Empty);
		}

		let predecessors: HashSet<String> = tokens[..tokens.len() - 1].iter().cloned().collect();
		let adjacency: HashMap<String, AdjacencyRecord> = self
			.store
			.find_by_words::<AdjacencyRecord>(ADJACENCY_COLLECTION, &predecessors)?
			.into_iter()
			.map(|record| (record.word.clone(), record))
			.collect();
		let predictions: HashMap<String, PredictionRecord> = self
			.store
			.find_by_words::<PredictionRecord>(PREDICTION_COLLECTION, &predecessors)?
			.into_iter()
			.map(|record| (record.word.clone(), record))
			.collect();

		let plan = merger::merge(&tokens, &adjacency, &predictions);
		let (pairs, inserted, updated) = (plan.pairs, plan.inserted(), plan.updated());

		let ack = dual_write(&mut self.store, plan)?;
		if !ack.is_complete() {
			warn!(
				"training not persisted (adjacency acknowledged: {}, predictions acknowledged: {})",
				ack.adjacency.acknowledged, ack.predictions.acknowledged
			);
			return Err(Error::PersistenceUnacknowledged {
				adjacency: ack.adjacency.acknowledged,
				predictions: ack.predictions.acknowledged,
			});
		}

		info!("trained on {} pairs ({} new words, {} updated)", pairs, inserted, updated);
		Ok(TrainOutcome::Merged { pairs, inserted, updated })
	}

	/// Predicts the word most likely to follow `word`.
	///
	/// The lookup is case-insensitive.
	///
	/// # Errors
	/// - `NotFound` if `word` was never observed as a predecessor.
	pub fn complete(&self, word: &str) -> Result<String> {
		let word = word.to_lowercase();
		let words = HashSet::from([word.clone()]);
		self.store
			.find_by_words::<PredictionRecord>(PREDICTION_COLLECTION, &words)?
			.into_iter()
			.next()
			.map(|record| record.best_successor)
			.ok_or(Error::NotFound { word })
	}

	/// Clears the whole word graph.
	///
	/// Returns `true` only if both collections were dropped.
	pub fn drop_all(&mut self) -> Result<bool> {
		let adjacency = self.store.drop_collection(ADJACENCY_COLLECTION)?;
		let predictions = self.store.drop_collection(PREDICTION_COLLECTION)?;
		info!("dropped word graph (adjacency: {}, predictions: {})", adjacency, predictions);
		Ok(adjacency && predictions)
	}

	/// Rebuilds the prediction index from the adjacency collection.
	///
	/// The prediction collection is dropped, then every prediction is derived
	/// again from its adjacency record. This repairs an index left stale by a
	/// partially acknowledged training, including predictions whose adjacency
	/// write was refused. Returns the number of predictions written.
	///
	/// # Errors
	/// - `PersistenceUnacknowledged` if the prediction write was refused.
	pub fn rebuild_predictions(&mut self) -> Result<usize> {
		let ops: Vec<WriteOp<PredictionRecord>> = self
			.store
			.find_all::<AdjacencyRecord>(ADJACENCY_COLLECTION)?
			.iter()
			.map(|record| WriteOp::Update(PredictionRecord::derive(record)))
			.collect();
		let count = ops.len();

		self.store.drop_collection(PREDICTION_COLLECTION)?;
		let ack = self.store.bulk_upsert(PREDICTION_COLLECTION, ops)?;
		if !ack.acknowledged {
			return Err(Error::PersistenceUnacknowledged { adjacency: true, predictions: false });
		}

		info!("rebuilt {} predictions", count);
		Ok(count)
	}
}
