use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Name of the collection holding `AdjacencyRecord`s.
pub const ADJACENCY_COLLECTION: &str = "CorpusGraph";

/// Name of the collection holding `PredictionRecord`s.
pub const PREDICTION_COLLECTION: &str = "MaxWordGraph";

/// Successor word → number of times it was observed right after a word.
pub type SuccessorCounts = HashMap<String, u64>;

/// Persisted adjacency of a single word.
///
/// Conceptually, this is a node of a first-order Markov chain over words where
/// outgoing edges are weighted by their number of observations.
///
/// ## Invariants
/// - `word` is normalized (lowercase) and unique within its collection
/// - Every successor ever observed after `word` has an entry
/// - Counts never decrease from one merge to the next
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyRecord {
	/// Predecessor word, used as the document key.
	pub word: String,
	/// Observed successors with their occurrence counts.
	/// Example: { "want" => 2, "am" => 1 }
	pub successors: SuccessorCounts,
}

impl AdjacencyRecord {
	/// Creates a record for `word` with the given successor counts.
	pub fn new(word: &str, successors: SuccessorCounts) -> Self {
		Self {
			word: word.to_owned(),
			successors,
		}
	}

	/// Returns the occurrence count of `successor`, 0 when never observed.
	pub fn count(&self, successor: &str) -> u64 {
		self.successors.get(successor).copied().unwrap_or(0)
	}
}

impl Document for AdjacencyRecord {
	fn key(&self) -> &str {
		&self.word
	}
}

/// Persisted "best next word" of a single word.
///
/// This is a derived index over `AdjacencyRecord`, stored separately so a lookup
/// is a single keyed read.
///
/// ## Invariants
/// - `best_count` is the maximum count of the word's adjacency record
/// - `best_successor` reaches `best_count`; on a tie, the successor that got
///   there first keeps it
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PredictionRecord {
	/// Predecessor word, used as the document key.
	pub word: String,
	/// Most frequent successor, empty before the first observation.
	pub best_successor: String,
	/// Occurrence count of `best_successor`.
	pub best_count: u64,
}

impl PredictionRecord {
	/// Creates a prediction with no successor yet (`""`, count 0).
	pub fn empty(word: &str) -> Self {
		Self {
			word: word.to_owned(),
			best_successor: String::new(),
			best_count: 0,
		}
	}

	/// Rebuilds the prediction of a word from its adjacency alone.
	///
	/// Observation order is not persisted, so ties go to the
	/// lexicographically smallest successor.
	pub fn derive(adjacency: &AdjacencyRecord) -> Self {
		let mut prediction = Self::empty(&adjacency.word);
		for (successor, &count) in &adjacency.successors {
			let wins_tie = count == prediction.best_count && *successor < prediction.best_successor;
			if count > prediction.best_count || wins_tie {
				prediction.best_successor = successor.clone();
				prediction.best_count = count;
			}
		}
		prediction
	}

	/// Offers a successor that has just reached `count` occurrences.
	///
	/// The successor takes over only if `count` is strictly greater than the
	/// current best: a successor that merely ties never displaces the one that
	/// got there first.
	///
	/// Returns `true` if the prediction changed.
	pub fn observe(&mut self, successor: &str, count: u64) -> bool {
		if count > self.best_count {
			self.best_successor = successor.to_owned();
			self.best_count = count;
			return true;
		}
		false
	}
}

impl Document for PredictionRecord {
	fn key(&self) -> &str {
		&self.word
	}
}
