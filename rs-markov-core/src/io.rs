use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{MarkovError, MarkovResult};

/// Reads a whole source file and splits it into whitespace-delimited tokens.
///
/// - The file is read entirely before any token is returned, so a read
///   failure can never leave a model half trained
/// - Tokens are returned verbatim; normalization is the trainer's job
pub fn read_tokens<P: AsRef<Path>>(filename: P) -> MarkovResult<Vec<String>> {
	let path = filename.as_ref();
	let mut contents = String::new();
	File::open(path)
		.and_then(|mut file| file.read_to_string(&mut contents))
		.map_err(|source| MarkovError::Io { path: path.to_path_buf(), source })?;

	Ok(contents.split_whitespace().map(str::to_owned).collect())
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

/// Lists the stems of all files with a given extension in a directory.
///
/// `data/alice.txt` is listed as `alice`. The result is sorted.
pub fn list_sources<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut sources = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(stem) = path.file_stem() {
				sources.push(stem.to_string_lossy().to_string());
			}
		}
	}

	sources.sort();
	Ok(sources)
}
