//! Storage interface of the word graph.
//!
//! The graph is persisted as two keyed document collections. The core only
//! relies on four primitives (find by words, find all, bulk conditional upsert,
//! drop) exposed by `DocumentStore`, so any document database can back it:
//! - `MemoryStore`: everything in memory, used by tests and demos
//! - `FileStore`: one postcard file per collection in a data folder

use std::collections::HashSet;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Keyed collection shared by the store implementations.
mod collection;

/// In-memory `DocumentStore`.
pub mod memory;

/// Folder-backed `DocumentStore`.
pub mod file;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A document that can live in a collection.
///
/// The key is the match field of every bulk operation and must be unique
/// within a collection.
pub trait Document: Serialize + DeserializeOwned {
	/// Returns the document key.
	fn key(&self) -> &str;
}

/// One operation of a bulk conditional upsert, matched on the document key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp<D> {
	/// Replace the document stored under the same key, inserting it if missing.
	Update(D),
	/// Insert a document whose key must not exist yet.
	Insert(D),
}

impl<D> WriteOp<D> {
	/// Returns the carried document.
	pub fn document(&self) -> &D {
		match self {
			WriteOp::Update(document) | WriteOp::Insert(document) => document,
		}
	}

	/// Returns `true` for `Insert` ops.
	pub fn is_insert(&self) -> bool {
		matches!(self, WriteOp::Insert(_))
	}
}

/// Storage answer to a bulk conditional upsert.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Acknowledgment {
	/// Whether the whole batch was applied.
	pub acknowledged: bool,
	/// Number of existing documents replaced.
	pub matched: usize,
	/// Number of documents created (inserts and upserted updates).
	pub inserted: usize,
}

impl Acknowledgment {
	/// A refused batch: nothing was written.
	pub fn refused() -> Self {
		Self::default()
	}
}

/// Capability of a keyed document store.
///
/// # Contract
/// - Documents are matched by `Document::key`.
/// - `bulk_upsert` is atomic per collection: either every op is applied and the
///   batch is acknowledged, or nothing is written and the batch is refused.
/// - Reading a collection that does not exist yields no documents.
/// - Connection-level failures are returned as errors and never retried.
pub trait DocumentStore {
	/// Returns the documents of `collection` whose key is one of `words`.
	fn find_by_words<D: Document>(&self, collection: &str, words: &HashSet<String>) -> Result<Vec<D>>;

	/// Returns every document of `collection`.
	fn find_all<D: Document>(&self, collection: &str) -> Result<Vec<D>>;

	/// Applies a batch of ops to `collection`, creating it if needed.
	fn bulk_upsert<D: Document>(&mut self, collection: &str, ops: Vec<WriteOp<D>>) -> Result<Acknowledgment>;

	/// Removes `collection` and all its documents.
	///
	/// Dropping a missing collection is acknowledged as well.
	fn drop_collection(&mut self, collection: &str) -> Result<bool>;
}
