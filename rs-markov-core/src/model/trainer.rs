use std::path::Path;

use tracing::{debug, info, warn};

use super::prefix_model::PrefixModel;
use super::terminator::should_terminate;
use crate::error::{MarkovError, MarkovResult};
use crate::io::read_tokens;

/// Result of feeding one token stream to a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainOutcome {
	/// The stream was absorbed; `tokens` observations were recorded.
	Absorbed { tokens: usize },
	/// The stream held no token; the model was left untouched.
	Empty,
}

/// Trains `model` on a stream of tokens.
///
/// # Behavior
/// - Starts from the sentence-start window
/// - Each token is lowercased and trimmed, then recorded as a successor of
///   the current window, which then slides by one word
/// - After a sentence-ending token the window is reset to the sentence start
/// - The window reached after each token is inserted even without successor
///
/// Blank tokens are skipped. Training is additive: prefixes and successors
/// already in `model` are kept.
pub fn train<I, S>(model: &mut PrefixModel, tokens: I) -> TrainOutcome
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut tokens = tokens
		.into_iter()
		.map(|token| token.as_ref().trim().to_lowercase())
		.filter(|token| !token.is_empty())
		.peekable();

	if tokens.peek().is_none() {
		return TrainOutcome::Empty;
	}

	let start = model.sentence_start_key();
	let mut window = start.clone();
	model.entry(start.clone());

	let mut count = 0;
	for token in tokens {
		model.entry(window.clone()).add_successor(&token);

		window = if should_terminate(&token) {
			start.clone()
		} else {
			window.slide(&token)
		};
		model.entry(window.clone());
		count += 1;
	}

	debug!(tokens = count, prefixes = model.len(), "token stream absorbed");
	TrainOutcome::Absorbed { tokens: count }
}

/// Splits `text` on whitespace and trains `model` on the result.
pub fn train_text(model: &mut PrefixModel, text: &str) -> TrainOutcome {
	train(model, text.split_whitespace())
}

/// Reads the source at `path` and trains `model` on it.
///
/// # Errors
/// - `MarkovError::Io` if the source cannot be read; the model is untouched
/// - `MarkovError::EmptySource` if it holds no token
pub fn train_source<P: AsRef<Path>>(model: &mut PrefixModel, path: P) -> MarkovResult<usize> {
	let path = path.as_ref();
	let tokens = read_tokens(path)?;

	match train(model, tokens) {
		TrainOutcome::Absorbed { tokens } => {
			info!(source = %path.display(), tokens, "source trained");
			Ok(tokens)
		}
		TrainOutcome::Empty => Err(MarkovError::EmptySource(path.to_path_buf())),
	}
}

/// Builds a fresh model of order `prefix_length` from every source, in order.
///
/// Sources that cannot be read or hold no token are logged and skipped;
/// they never abort the rebuild.
///
/// # Errors
/// Returns `MarkovError::InvalidConfig` if `prefix_length == 0`.
pub fn retrain<P: AsRef<Path>>(prefix_length: usize, sources: &[P]) -> MarkovResult<PrefixModel> {
	let mut model = PrefixModel::new(prefix_length)?;

	for source in sources {
		if let Err(e) = train_source(&mut model, source) {
			warn!(error = %e, "source skipped during retrain");
		}
	}

	info!(prefix_length, sources = sources.len(), prefixes = model.len(), "model retrained");
	Ok(model)
}
