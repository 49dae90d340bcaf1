use std::collections::HashMap;

use serde::Serialize;

use super::prefix::{Prefix, PrefixKey};
use crate::error::{MarkovError, MarkovResult};

/// Word-level Markov model of order `n`.
///
/// The `PrefixModel` maps every `n`-word prefix seen during training to
/// the `Prefix` holding its successors.
///
/// # Responsibilities
/// - Own every `Prefix` of the model
/// - Resolve a key to its `Prefix` by content
/// - Create prefixes on demand through `insert_if_absent`
///
/// # Invariants
/// - `n` is always >= 1 and never changes
/// - Every key in `prefixes` has exactly `n` words
/// - The sentence-start prefix is always present
#[derive(Clone, Debug)]
pub struct PrefixModel {
	/// Number of words in a prefix
	n: usize,

	/// Mapping from a key to its prefix
	prefixes: HashMap<PrefixKey, Prefix>,
}

/// Size summary of a model.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelStats {
	pub prefix_length: usize,
	pub prefixes: usize,
	pub successors: usize,
	pub sentence_starts: usize,
}

impl PrefixModel {
	/// Creates an empty model of order `n` holding only the sentence-start prefix.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidConfig` if `n == 0`.
	pub fn new(n: usize) -> MarkovResult<Self> {
		if n == 0 {
			return Err(MarkovError::InvalidConfig("prefix length must be >= 1".to_owned()));
		}

		let mut model = Self { n, prefixes: HashMap::new() };
		model.entry(model.sentence_start_key());
		Ok(model)
	}

	/// Number of words in every key of this model.
	pub fn prefix_length(&self) -> usize {
		self.n
	}

	/// The key of `n` empty strings every sentence starts from.
	pub fn sentence_start_key(&self) -> PrefixKey {
		PrefixKey::sentence_start(self.n)
	}

	/// Exact content lookup.
	pub fn lookup(&self, key: &PrefixKey) -> Option<&Prefix> {
		self.prefixes.get(key)
	}

	/// Returns the prefix stored under `key`, creating an empty one first if needed.
	///
	/// Calling it twice with equal keys always yields the same prefix.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidState` if `key` does not have exactly `n`
	/// words; the model is left unchanged.
	pub fn insert_if_absent(&mut self, key: PrefixKey) -> MarkovResult<&mut Prefix> {
		if key.len() != self.n {
			return Err(MarkovError::InvalidState(format!(
				"prefix {} has {} words, model expects {}",
				key,
				key.len(),
				self.n
			)));
		}
		Ok(self.entry(key))
	}

	/// Unchecked variant of `insert_if_absent` for keys built from
	/// `sentence_start_key` and `PrefixKey::slide`, which keep the width.
	pub(crate) fn entry(&mut self, key: PrefixKey) -> &mut Prefix {
		self.prefixes.entry(key).or_insert_with_key(|key| Prefix::new(key.clone()))
	}

	/// Number of distinct prefixes, sentence start included.
	pub fn len(&self) -> usize {
		self.prefixes.len()
	}

	/// Returns `true` if nothing was recorded after the sentence start.
	pub fn is_empty(&self) -> bool {
		self.lookup(&self.sentence_start_key())
			.is_none_or(|start| start.successor_count() == 0)
	}

	/// Iterates over every prefix in arbitrary order.
	pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
		self.prefixes.values()
	}

	pub fn total_successors(&self) -> usize {
		self.prefixes.values().map(Prefix::successor_count).sum()
	}

	pub fn stats(&self) -> ModelStats {
		ModelStats {
			prefix_length: self.n,
			prefixes: self.len(),
			successors: self.total_successors(),
			sentence_starts: self
				.lookup(&self.sentence_start_key())
				.map_or(0, Prefix::successor_count),
		}
	}
}
