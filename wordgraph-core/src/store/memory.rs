use std::collections::{HashMap, HashSet};

use super::collection::Collection;
use super::{Acknowledgment, Document, DocumentStore, WriteOp};
use crate::error::Result;

/// A `DocumentStore` that keeps every collection in memory.
///
/// Nothing survives the process. Useful for tests, demos and as the
/// in-memory layer of `FileStore`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	collections: HashMap<String, Collection>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of documents in `collection` (0 if missing).
	pub fn len(&self, collection: &str) -> usize {
		self.collections.get(collection).map_or(0, Collection::len)
	}

	/// Returns the names of the existing collections.
	pub fn collection_names(&self) -> Vec<String> {
		self.collections.keys().cloned().collect()
	}

	pub(crate) fn collection(&self, name: &str) -> Option<&Collection> {
		self.collections.get(name)
	}

	pub(crate) fn insert_collection(&mut self, name: String, collection: Collection) {
		self.collections.insert(name, collection);
	}
}

impl DocumentStore for MemoryStore {
	fn find_by_words<D: Document>(&self, collection: &str, words: &HashSet<String>) -> Result<Vec<D>> {
		match self.collections.get(collection) {
			Some(c) => c.find_by_words(words),
			None => Ok(Vec::new()),
		}
	}

	fn find_all<D: Document>(&self, collection: &str) -> Result<Vec<D>> {
		match self.collections.get(collection) {
			Some(c) => c.find_all(),
			None => Ok(Vec::new()),
		}
	}

	fn bulk_upsert<D: Document>(&mut self, collection: &str, ops: Vec<WriteOp<D>>) -> Result<Acknowledgment> {
		self.collections.entry(collection.to_owned()).or_default().apply(&ops)
	}

	fn drop_collection(&mut self, collection: &str) -> Result<bool> {
		self.collections.remove(collection);
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::records::AdjacencyRecord;

	#[test]
	fn missing_collections_read_as_empty() {
		let store = MemoryStore::new();
		let all: Vec<AdjacencyRecord> = store.find_all("nothing").unwrap();
		assert!(all.is_empty());
		let words = HashSet::from(["i".to_owned()]);
		let found: Vec<AdjacencyRecord> = store.find_by_words("nothing", &words).unwrap();
		assert!(found.is_empty());
	}

	#[test]
	fn upsert_then_drop() {
		let mut store = MemoryStore::new();
		let record = AdjacencyRecord::new("i", [("want".to_owned(), 1)].into());
		let ack = store.bulk_upsert("graph", vec![WriteOp::Insert(record.clone())]).unwrap();
		assert!(ack.acknowledged);
		assert_eq!(store.len("graph"), 1);
		assert_eq!(store.find_all::<AdjacencyRecord>("graph").unwrap(), vec![record]);

		assert!(store.drop_collection("graph").unwrap());
		assert_eq!(store.len("graph"), 0);
		assert!(store.drop_collection("graph").unwrap());
	}
}
