use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Acknowledgment, Document, WriteOp};
use crate::error::Result;

/// A keyed set of postcard-encoded documents.
///
/// Documents are stored encoded so a single collection type can hold any
/// `Document` and be written to disk as is.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct Collection {
	documents: BTreeMap<String, Vec<u8>>,
}

impl Collection {
	pub(crate) fn len(&self) -> usize {
		self.documents.len()
	}

	/// Decodes the documents whose key is in `words`.
	pub(crate) fn find_by_words<D: Document>(&self, words: &HashSet<String>) -> Result<Vec<D>> {
		let mut found = Vec::new();
		for word in words {
			if let Some(bytes) = self.documents.get(word) {
				found.push(postcard::from_bytes(bytes)?);
			}
		}
		Ok(found)
	}

	/// Decodes every document, in key order.
	pub(crate) fn find_all<D: Document>(&self) -> Result<Vec<D>> {
		self.documents
			.values()
			.map(|bytes| postcard::from_bytes(bytes).map_err(Into::into))
			.collect()
	}

	/// Applies a batch of ops, all or nothing.
	///
	/// The batch is encoded and validated first. An `Insert` whose key already
	/// exists, or appears twice in the batch, refuses the whole batch.
	pub(crate) fn apply<D: Document>(&mut self, ops: &[WriteOp<D>]) -> Result<Acknowledgment> {
		let mut encoded = Vec::with_capacity(ops.len());
		let mut inserted_keys = HashSet::new();
		for op in ops {
			let key = op.document().key();
			if op.is_insert() && (self.documents.contains_key(key) || !inserted_keys.insert(key)) {
				return Ok(Acknowledgment::refused());
			}
			encoded.push((key.to_owned(), postcard::to_stdvec(op.document())?));
		}

		let mut ack = Acknowledgment { acknowledged: true, ..Acknowledgment::default() };
		for (key, bytes) in encoded {
			match self.documents.insert(key, bytes) {
				Some(_) => ack.matched += 1,
				None => ack.inserted += 1,
			}
		}
		Ok(ack)
	}
}
