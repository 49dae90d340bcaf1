use rand::Rng;
use tracing::debug;

use super::prefix_model::PrefixModel;
use super::terminator::{is_punctuation, is_terminator, should_terminate};
use crate::error::{MarkovError, MarkovResult};

/// Default bound on the number of words of a single sentence.
pub const DEFAULT_MAX_WORDS: usize = 1000;

/// Generates one sentence by walking `model` from the sentence start.
///
/// # Behavior
/// - Draws a random successor of the current window, then slides the window
/// - Stops after a sentence-ending word, on a window with no successor, or
///   after `max_words` words
/// - A word ending with a terminator is appended as-is, one ending with other
///   punctuation is followed by a line break, any other by a space
/// - The word `i` is written `I`, and the first character is uppercased
///
/// # Errors
/// Returns `MarkovError::InsufficientData` if the model yields no word at all.
pub fn generate_sentence<R: Rng + ?Sized>(
	model: &PrefixModel,
	max_words: usize,
	rng: &mut R,
) -> MarkovResult<String> {
	let mut window = model.sentence_start_key();
	let mut sentence = String::new();

	for _ in 0..max_words {
		let Some(prefix) = model.lookup(&window) else {
			debug!(%window, "unknown prefix, sentence stops");
			break;
		};
		if prefix.successor_count() == 0 {
			debug!(%window, "prefix without successor, sentence stops");
			break;
		}

		let word = prefix.random_successor(rng)?.trim();
		window = window.slide(word);

		let rendered = if word == "i" { "I" } else { word };
		sentence.push_str(rendered);
		match rendered.chars().last() {
			Some(c) if is_terminator(c) => (),
			Some(c) if is_punctuation(c) => sentence.push('\n'),
			_ => sentence.push(' '),
		}

		if should_terminate(rendered) {
			break;
		}
	}

	let sentence = sentence.trim_end();
	let mut chars = sentence.chars();
	match chars.next() {
		Some(first) => Ok(first.to_uppercase().chain(chars).collect()),
		None => Err(MarkovError::InsufficientData),
	}
}

/// Generates `count` sentences.
///
/// # Errors
/// Fails on the first sentence that cannot be generated.
pub fn generate_sentences<R: Rng + ?Sized>(
	model: &PrefixModel,
	count: usize,
	max_words: usize,
	rng: &mut R,
) -> MarkovResult<Vec<String>> {
	(0..count).map(|_| generate_sentence(model, max_words, rng)).collect()
}
