use serde::{Deserialize, Serialize};

use super::generator::DEFAULT_MAX_WORDS;
use crate::error::{MarkovError, MarkovResult};

/// Externally settable parameters of a `Session`.
///
/// # Invariants
/// - `prefix_length` is always >= 1
/// - `max_words` is always >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
	/// Number of words in a prefix.
	pub prefix_length: usize,

	/// Number of sentences produced per generation request.
	pub sentence_count: usize,

	/// Upper bound on the number of words of one sentence.
	pub max_words: usize,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			prefix_length: 3,
			sentence_count: 1,
			max_words: DEFAULT_MAX_WORDS,
		}
	}
}

impl SessionConfig {
	/// Checks every field.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidConfig` naming the first invalid field.
	pub fn validate(&self) -> MarkovResult<()> {
		if self.prefix_length == 0 {
			return Err(MarkovError::InvalidConfig("prefix length must be >= 1".to_owned()));
		}
		if self.max_words == 0 {
			return Err(MarkovError::InvalidConfig("max words must be >= 1".to_owned()));
		}
		Ok(())
	}
}

/// Parses a prefix length typed by a user.
///
/// # Errors
/// Returns `MarkovError::InvalidConfig` unless `input` is a positive integer.
pub fn parse_prefix_length(input: &str) -> MarkovResult<usize> {
	match input.trim().parse::<i64>() {
		Ok(n) if n >= 1 => usize::try_from(n)
			.map_err(|_| MarkovError::InvalidConfig(format!("prefix length {n} is too large"))),
		Ok(n) => Err(MarkovError::InvalidConfig(format!("prefix length must be >= 1, got {n}"))),
		Err(_) => Err(MarkovError::InvalidConfig(format!("prefix length must be an integer, got '{}'", input.trim()))),
	}
}

/// Parses a sentence count typed by a user.
///
/// # Errors
/// Returns `MarkovError::InvalidConfig` unless `input` is a non-negative integer.
pub fn parse_sentence_count(input: &str) -> MarkovResult<usize> {
	match input.trim().parse::<i64>() {
		Ok(n) if n >= 0 => usize::try_from(n)
			.map_err(|_| MarkovError::InvalidConfig(format!("sentence count {n} is too large"))),
		Ok(n) => Err(MarkovError::InvalidConfig(format!("sentence count must be >= 0, got {n}"))),
		Err(_) => Err(MarkovError::InvalidConfig(format!("sentence count must be an integer, got '{}'", input.trim()))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn default_is_valid() {
		let config = SessionConfig::default();
		assert_eq!(config.prefix_length, 3);
		assert_eq!(config.sentence_count, 1);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn zero_fields_are_rejected() {
		let config = SessionConfig { prefix_length: 0, ..Default::default() };
		assert!(matches!(config.validate(), Err(MarkovError::InvalidConfig(_))));

		let config = SessionConfig { max_words: 0, ..Default::default() };
		assert!(matches!(config.validate(), Err(MarkovError::InvalidConfig(_))));
	}

	#[rstest]
	#[case("1", Some(1))]
	#[case(" 4 ", Some(4))]
	#[case("0", None)]
	#[case("-2", None)]
	#[case("two", None)]
	#[case("", None)]
	fn parses_prefix_length(#[case] input: &str, #[case] expected: Option<usize>) {
		assert_eq!(parse_prefix_length(input).ok(), expected);
	}

	#[rstest]
	#[case("0", Some(0))]
	#[case("12", Some(12))]
	#[case("-1", None)]
	#[case("1.5", None)]
	fn parses_sentence_count(#[case] input: &str, #[case] expected: Option<usize>) {
		assert_eq!(parse_sentence_count(input).ok(), expected);
	}
}
