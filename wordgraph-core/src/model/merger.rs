use std::collections::HashMap;

use log::debug;

use super::records::{AdjacencyRecord, PredictionRecord, SuccessorCounts};
use crate::store::WriteOp;

/// Write-sets produced by one merge, ready for the two bulk upserts.
///
/// Both vectors hold one op per distinct predecessor of the corpus, in the
/// order the predecessors were first observed.
#[derive(Debug, Default)]
pub struct MergePlan {
	/// Number of consecutive token pairs folded into the graph.
	pub pairs: usize,
	/// Ops for the adjacency collection.
	pub adjacency: Vec<WriteOp<AdjacencyRecord>>,
	/// Ops for the prediction collection.
	pub predictions: Vec<WriteOp<PredictionRecord>>,
}

impl MergePlan {
	/// Returns `true` when the corpus contained no pair at all.
	pub fn is_empty(&self) -> bool {
		self.pairs == 0
	}

	/// Number of words seen for the first time (adjacency inserts).
	pub fn inserted(&self) -> usize {
		self.adjacency.iter().filter(|op| op.is_insert()).count()
	}

	/// Number of already persisted words touched by this merge.
	pub fn updated(&self) -> usize {
		self.adjacency.len() - self.inserted()
	}
}

/// Folds a token sequence into the persisted word graph.
///
/// - `tokens`: normalized corpus.
/// - `existing_adjacency`: persisted adjacency records, keyed by word. Only the
///   records of the corpus predecessors are needed.
/// - `existing_predictions`: persisted predictions, keyed by word.
///
/// # Behavior
/// - Every consecutive pair `(w, next)` adds one occurrence to `w → next`.
/// - The prediction of `w` is offered the cumulative count (persisted plus
///   in-merge) after each occurrence, and only a strictly greater count takes
///   over, so on ties the first successor to reach the count wins.
/// - A predecessor without persisted prediction starts from its adjacency when
///   one exists (stale index), otherwise from an empty prediction.
/// - Persisted words get `Update` ops: adjacency is the additive `combine` of the
///   in-merge and persisted counts, prediction is fully replaced. New words get
///   `Insert` ops.
///
/// # Notes
/// - Inputs are borrowed and never modified.
/// - A corpus shorter than two tokens yields an empty plan.
pub fn merge(
	tokens: &[String],
	existing_adjacency: &HashMap<String, AdjacencyRecord>,
	existing_predictions: &HashMap<String, PredictionRecord>,
) -> MergePlan {
	let mut order: Vec<&str> = Vec::new();
	let mut fresh: HashMap<&str, SuccessorCounts> = HashMap::new();
	let mut predictions: HashMap<&str, PredictionRecord> = HashMap::new();

	for pair in tokens.windows(2) {
		let (word, next) = (pair[0].as_str(), pair[1].as_str());

		let counts = fresh.entry(word).or_insert_with(|| {
			order.push(word);
			SuccessorCounts::new()
		});
		let in_merge = counts.entry(next.to_owned()).or_insert(0);
		*in_merge += 1;

		let persisted = existing_adjacency.get(word).map_or(0, |record| record.count(next));
		let count = persisted + *in_merge;

		predictions
			.entry(word)
			.or_insert_with(|| seed_prediction(word, existing_adjacency, existing_predictions))
			.observe(next, count);
	}

	let mut plan = MergePlan {
		pairs: tokens.len().saturating_sub(1),
		adjacency: Vec::with_capacity(order.len()),
		predictions: Vec::with_capacity(order.len()),
	};

	for word in order {
		let counts = fresh.remove(word).unwrap_or_default();
		plan.adjacency.push(match existing_adjacency.get(word) {
			Some(persisted) => WriteOp::Update(AdjacencyRecord::new(word, combine(&counts, persisted.successors.clone()))),
			None => WriteOp::Insert(AdjacencyRecord::new(word, counts)),
		});

		let prediction = predictions.remove(word).unwrap_or_else(|| PredictionRecord::empty(word));
		plan.predictions.push(if existing_predictions.contains_key(word) {
			WriteOp::Update(prediction)
		} else {
			WriteOp::Insert(prediction)
		});
	}

	debug!(
		"merged {} pairs: {} new words, {} updated words",
		plan.pairs,
		plan.inserted(),
		plan.updated()
	);
	plan
}

/// Adds freshly computed counts into persisted ones.
///
/// - Successors present in both maps get the sum of both counts.
/// - Successors only present in `fresh` are added unchanged.
///
/// This is how repeated trainings accumulate frequencies over the full history
/// instead of overwriting them.
pub fn combine(fresh: &SuccessorCounts, mut persisted: SuccessorCounts) -> SuccessorCounts {
	for (successor, count) in fresh {
		*persisted.entry(successor.clone()).or_insert(0) += *count;
	}
	persisted
}

/// Starting prediction of a predecessor seen for the first time in this merge.
fn seed_prediction(
	word: &str,
	existing_adjacency: &HashMap<String, AdjacencyRecord>,
	existing_predictions: &HashMap<String, PredictionRecord>,
) -> PredictionRecord {
	if let Some(prediction) = existing_predictions.get(word) {
		return prediction.clone();
	}
	match existing_adjacency.get(word) {
		Some(adjacency) => PredictionRecord::derive(adjacency),
		None => PredictionRecord::empty(word),
	}
}
