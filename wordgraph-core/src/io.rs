use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::env;

/// Builds the path of a collection file inside a data folder.
///
/// Example:
/// `data` + `"CorpusGraph"` + `"bin"` → `data/CorpusGraph.bin`
pub(crate) fn collection_path<P: AsRef<Path>>(folder: P, name: &str, extension: &str) -> PathBuf {
	let mut output = folder.as_ref().join(name);
	output.set_extension(extension);
	output
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/CorpusGraph.bin"` → `"CorpusGraph"`
/// - `"CorpusGraph.bin"` → `"CorpusGraph"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns full paths, sorted for a stable load order.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

/// Replaces the content of `path` without leaving a half-written file.
///
/// Writes a sibling `.tmp` file first, then renames it over `path`.
pub(crate) fn write_replace<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	let tmp = path.with_extension("tmp");
	fs::write(&tmp, bytes)?;
	fs::rename(tmp, path)
}

/// Removes a file, ignoring a file that is already gone.
pub(crate) fn remove_if_exists<P: AsRef<Path>>(path: P) -> io::Result<()> {
	match fs::remove_file(path) {
		Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
		other => other,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collection_path_appends_extension() {
		assert_eq!(collection_path("data", "CorpusGraph", "bin"), PathBuf::from("data/CorpusGraph.bin"));
	}

	#[test]
	fn filename_drops_folder_and_extension() {
		assert_eq!(get_filename("./data/MaxWordGraph.bin").unwrap(), "MaxWordGraph");
	}

	#[test]
	fn other_folders_are_kept_as_is() {
		assert_eq!(normalize_folder("some/data"), PathBuf::from("some/data"));
	}
}
