use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by training, generation and configuration.
#[derive(Error, Debug)]
pub enum MarkovError {
	#[error("Source '{path}' failed to open: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Source '{0}' is empty")]
	EmptySource(PathBuf),

	#[error("Source '{0}' has already been trained")]
	AlreadyTrained(PathBuf),

	#[error("Invalid state: {0}")]
	InvalidState(String),

	#[error("Insufficient training data: model has no data")]
	InsufficientData,

	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),
}

pub type MarkovResult<T> = Result<T, MarkovError>;
