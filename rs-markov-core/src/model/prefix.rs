use std::fmt;

use rand::Rng;

use serde::Serialize;

use crate::error::{MarkovError, MarkovResult};

/// Ordered sequence of the `n` words preceding a successor.
///
/// Keys compare and hash by content: two independently built keys holding
/// the same words in the same order always address the same `Prefix`.
/// The sentence-start key is made of `n` empty strings.
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrefixKey(Vec<String>);

impl PrefixKey {
	/// Builds a key from its words, oldest first.
	pub fn new<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(words.into_iter().map(Into::into).collect())
	}

	/// The sentence-start sentinel of width `n`.
	pub fn sentence_start(n: usize) -> Self {
		Self(vec![String::new(); n])
	}

	/// Number of words in the key.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns `true` if every word of the key is empty.
	pub fn is_sentence_start(&self) -> bool {
		self.0.iter().all(String::is_empty)
	}

	pub fn words(&self) -> &[String] {
		&self.0
	}

	/// Returns the key shifted by one word: the oldest word is dropped and
	/// `word` becomes the newest. The width is preserved.
	pub fn slide(&self, word: &str) -> Self {
		let mut words = Vec::with_capacity(self.0.len());
		words.extend(self.0.iter().skip(1).cloned());
		words.push(word.to_owned());
		Self(words)
	}
}

impl fmt::Display for PrefixKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]", self.0.join(" "))
	}
}

/// A node of the word chain.
///
/// A `Prefix` owns an immutable `key` and the multiset of every word
/// observed right after that key during training.
///
/// ## Invariants
/// - The key never changes after construction
/// - Successors keep duplicates: a word seen three times is three times as
///   likely to be drawn as a word seen once
#[derive(Serialize, Clone, Debug)]
pub struct Prefix {
	key: PrefixKey,
	successors: Vec<String>,
}

impl Prefix {
	/// Creates a prefix with no recorded successor.
	pub fn new(key: PrefixKey) -> Self {
		Self { key, successors: Vec::new() }
	}

	pub fn key(&self) -> &PrefixKey {
		&self.key
	}

	/// Records one more occurrence of `word` after this prefix.
	pub fn add_successor(&mut self, word: &str) {
		self.successors.push(word.to_owned());
	}

	pub fn successor_count(&self) -> usize {
		self.successors.len()
	}

	/// Every recorded successor, duplicates included, in training order.
	pub fn successors(&self) -> &[String] {
		&self.successors
	}

	/// Draws a successor uniformly over the whole multiset.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidState` if no successor was recorded.
	/// Callers are expected to check `successor_count()` first.
	pub fn random_successor<R: Rng + ?Sized>(&self, rng: &mut R) -> MarkovResult<&str> {
		if self.successors.is_empty() {
			return Err(MarkovError::InvalidState(format!("prefix {} has no successor", self.key)));
		}

		let index = rng.random_range(0..self.successors.len());
		Ok(&self.successors[index])
	}
}

impl PartialEq for Prefix {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

impl Eq for Prefix {}
