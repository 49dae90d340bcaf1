//! Word classification used at sentence boundaries.

/// Characters ending a sentence.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Characters treated as punctuation, terminators included.
pub const PUNCTUATION: [char; 10] = ['.', ',', '?', '!', ';', ':', '"', '(', ')', '\''];

pub fn is_terminator(c: char) -> bool {
	TERMINATORS.contains(&c)
}

pub fn is_punctuation(c: char) -> bool {
	PUNCTUATION.contains(&c)
}

/// Returns `true` if `word` ends a sentence.
///
/// The word is scanned from its last character backward: a terminator
/// found before any non-punctuation character ends the sentence, so
/// `goodbye.`, `good?.....` and `"why?"` all terminate while `1.5` does not.
/// Words of at most one character never terminate.
pub fn should_terminate(word: &str) -> bool {
	let word = word.trim();
	if word.chars().nth(1).is_none() {
		return false;
	}

	for c in word.chars().rev() {
		if is_terminator(c) {
			return true;
		}
		if !is_punctuation(c) {
			return false;
		}
	}
	false
}
