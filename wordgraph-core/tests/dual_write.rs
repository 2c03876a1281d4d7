use std::collections::HashSet;
use std::io;

use wordgraph_core::model::records::{AdjacencyRecord, PredictionRecord, ADJACENCY_COLLECTION, PREDICTION_COLLECTION};
use wordgraph_core::store::{Acknowledgment, Document, DocumentStore, MemoryStore, WriteOp};
use wordgraph_core::{AutoComplete, Error, Result};

/// Memory store that refuses every bulk write to one collection.
#[derive(Default)]
struct RefusingStore {
	inner: MemoryStore,
	refused: Option<&'static str>,
}

impl DocumentStore for RefusingStore {
	fn find_by_words<D: Document>(&self, collection: &str, words: &HashSet<String>) -> Result<Vec<D>> {
		self.inner.find_by_words(collection, words)
	}

	fn find_all<D: Document>(&self, collection: &str) -> Result<Vec<D>> {
		self.inner.find_all(collection)
	}

	fn bulk_upsert<D: Document>(&mut self, collection: &str, ops: Vec<WriteOp<D>>) -> Result<Acknowledgment> {
		if self.refused == Some(collection) {
			return Ok(Acknowledgment::refused());
		}
		self.inner.bulk_upsert(collection, ops)
	}

	fn drop_collection(&mut self, collection: &str) -> Result<bool> {
		self.inner.drop_collection(collection)
	}
}

/// Store whose connection is always down.
struct UnreachableStore;

fn down() -> Error {
	io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused").into()
}

impl DocumentStore for UnreachableStore {
	fn find_by_words<D: Document>(&self, _: &str, _: &HashSet<String>) -> Result<Vec<D>> {
		Err(down())
	}

	fn find_all<D: Document>(&self, _: &str) -> Result<Vec<D>> {
		Err(down())
	}

	fn bulk_upsert<D: Document>(&mut self, _: &str, _: Vec<WriteOp<D>>) -> Result<Acknowledgment> {
		Err(down())
	}

	fn drop_collection(&mut self, _: &str) -> Result<bool> {
		Err(down())
	}
}

#[test]
fn refused_prediction_write_leaves_adjacency_written() {
	let mut autocomplete = AutoComplete::new(RefusingStore {
		refused: Some(PREDICTION_COLLECTION),
		..RefusingStore::default()
	});

	match autocomplete.train("I want a cat") {
		Err(Error::PersistenceUnacknowledged { adjacency, predictions }) => {
			assert!(adjacency);
			assert!(!predictions);
		}
		other => panic!("expected PersistenceUnacknowledged, got {:?}", other),
	}

	// No rollback: the adjacency side is there, the index is stale.
	assert_eq!(autocomplete.store().inner.len(ADJACENCY_COLLECTION), 3);
	assert!(matches!(autocomplete.complete("i"), Err(Error::NotFound { .. })));

	autocomplete.store_mut().refused = None;
	assert_eq!(autocomplete.rebuild_predictions().unwrap(), 3);
	assert_eq!(autocomplete.complete("i").unwrap(), "want");
}

#[test]
fn refused_adjacency_write_still_submits_predictions() {
	let mut autocomplete = AutoComplete::new(RefusingStore {
		refused: Some(ADJACENCY_COLLECTION),
		..RefusingStore::default()
	});

	let err = autocomplete.train("good morning").unwrap_err();
	assert!(matches!(err, Error::PersistenceUnacknowledged { adjacency: false, predictions: true }));
	assert_eq!(autocomplete.complete("good").unwrap(), "morning");
}

#[test]
fn rebuild_forgets_predictions_without_adjacency() {
	let mut autocomplete = AutoComplete::new(RefusingStore {
		refused: Some(ADJACENCY_COLLECTION),
		..RefusingStore::default()
	});
	autocomplete.train("good morning").unwrap_err();
	assert_eq!(autocomplete.complete("good").unwrap(), "morning");

	autocomplete.store_mut().refused = None;
	assert_eq!(autocomplete.rebuild_predictions().unwrap(), 0);
	assert!(matches!(autocomplete.complete("good"), Err(Error::NotFound { .. })));
	assert_eq!(autocomplete.store().inner.len(PREDICTION_COLLECTION), 0);
}

#[test]
fn next_training_repairs_a_stale_index() {
	let mut autocomplete = AutoComplete::new(RefusingStore {
		refused: Some(PREDICTION_COLLECTION),
		..RefusingStore::default()
	});
	autocomplete.train("i want i want").unwrap_err();

	autocomplete.store_mut().refused = None;
	autocomplete.train("i need").unwrap();

	// want (2 in history) is still ahead of need (1).
	let prediction: Vec<PredictionRecord> = autocomplete.store().find_all(PREDICTION_COLLECTION).unwrap();
	let i = prediction.iter().find(|p| p.word == "i").unwrap();
	assert_eq!((i.best_successor.as_str(), i.best_count), ("want", 2));
	let adjacency: Vec<AdjacencyRecord> = autocomplete.store().find_all(ADJACENCY_COLLECTION).unwrap();
	assert_eq!(adjacency.iter().find(|a| a.word == "i").unwrap().count("need"), 1);
}

#[test]
fn storage_failures_propagate() {
	let mut autocomplete = AutoComplete::new(UnreachableStore);
	assert!(matches!(autocomplete.train("hello there"), Err(Error::StorageUnavailable(_))));
	assert!(matches!(autocomplete.complete("hello"), Err(Error::StorageUnavailable(_))));
	assert!(matches!(autocomplete.drop_all(), Err(Error::StorageUnavailable(_))));
	assert!(matches!(autocomplete.rebuild_predictions(), Err(Error::StorageUnavailable(_))));
}

#[test]
fn empty_corpus_never_touches_the_store() {
	let mut autocomplete = AutoComplete::new(UnreachableStore);
	assert!(autocomplete.train("!!! 123").is_ok());
	assert!(autocomplete.train("single").is_ok());
}
