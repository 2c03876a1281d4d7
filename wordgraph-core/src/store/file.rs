use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::collection::Collection;
use super::memory::MemoryStore;
use super::{Acknowledgment, Document, DocumentStore, WriteOp};
use crate::error::Result;
use crate::io;

const EXTENSION: &str = "bin";

/// A `DocumentStore` persisted in a data folder.
///
/// Each collection lives in `<folder>/<collection>.bin`, encoded with
/// `postcard`. All collections are loaded on `open` and served from memory;
/// every acknowledged write rewrites the file of the collection it touched.
///
/// # Notes
/// - A refused batch leaves both memory and disk untouched.
/// - There is no locking between processes sharing the same folder.
#[derive(Debug)]
pub struct FileStore {
	folder: PathBuf,
	memory: MemoryStore,
}

impl FileStore {
	/// Opens (or creates) a store in `folder` and loads every `.bin` collection.
	///
	/// # Errors
	/// - `StorageUnavailable` if the folder cannot be created or read.
	/// - `Codec` if a collection file is corrupted.
	pub fn open<P: AsRef<Path>>(folder: P) -> Result<Self> {
		let folder = folder.as_ref().to_path_buf();
		fs::create_dir_all(&folder)?;

		let mut memory = MemoryStore::new();
		for path in io::list_files(&folder, EXTENSION)? {
			let name = io::get_filename(&path)?;
			let bytes = fs::read(&path)?;
			let collection: Collection = postcard::from_bytes(&bytes)?;
			debug!("loaded collection {} ({} documents)", name, collection.len());
			memory.insert_collection(name, collection);
		}

		info!("opened file store at {}", folder.display());
		Ok(Self { folder, memory })
	}

	/// Returns the number of documents in `collection` (0 if missing).
	pub fn len(&self, collection: &str) -> usize {
		self.memory.len(collection)
	}

	fn path_of(&self, collection: &str) -> PathBuf {
		io::collection_path(&self.folder, collection, EXTENSION)
	}
}

impl DocumentStore for FileStore {
	fn find_by_words<D: Document>(&self, collection: &str, words: &HashSet<String>) -> Result<Vec<D>> {
		self.memory.find_by_words(collection, words)
	}

	fn find_all<D: Document>(&self, collection: &str) -> Result<Vec<D>> {
		self.memory.find_all(collection)
	}

	/// Applies the batch to a staged copy of the collection, writes that copy
	/// to disk, and only then makes it visible. A failed write leaves memory
	/// as it was.
	fn bulk_upsert<D: Document>(&mut self, collection: &str, ops: Vec<WriteOp<D>>) -> Result<Acknowledgment> {
		let mut staged = self.memory.collection(collection).cloned().unwrap_or_default();
		let ack = staged.apply(&ops)?;
		if ack.acknowledged {
			io::write_replace(self.path_of(collection), &postcard::to_stdvec(&staged)?)?;
			self.memory.insert_collection(collection.to_owned(), staged);
		}
		Ok(ack)
	}

	fn drop_collection(&mut self, collection: &str) -> Result<bool> {
		io::remove_if_exists(self.path_of(collection))?;
		self.memory.drop_collection(collection)
	}
}
