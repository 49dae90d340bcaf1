use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{info, warn};

use super::config::SessionConfig;
use super::generator::generate_sentences;
use super::prefix_model::PrefixModel;
use super::trainer::{retrain, train_source};
use crate::error::{MarkovError, MarkovResult};

/// Ordered list of the sources absorbed into the current model.
#[derive(Clone, Debug, Default)]
pub struct SourceRegistry {
	sources: Vec<PathBuf>,
}

impl SourceRegistry {
	pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
		self.sources.iter().any(|source| source == path.as_ref())
	}

	/// Appends `path`, keeping registration order.
	///
	/// # Errors
	/// Returns `MarkovError::AlreadyTrained` if `path` is already registered.
	pub fn register<P: AsRef<Path>>(&mut self, path: P) -> MarkovResult<()> {
		let path = path.as_ref();
		if self.contains(path) {
			return Err(MarkovError::AlreadyTrained(path.to_path_buf()));
		}
		self.sources.push(path.to_path_buf());
		Ok(())
	}

	pub fn sources(&self) -> &[PathBuf] {
		&self.sources
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}

/// Training and generation context.
///
/// A `Session` bundles the configuration, the active model and the sources
/// it was trained on. It is built once, mutated by training and
/// configuration calls, and read by generation.
///
/// # Invariants
/// - `model.prefix_length() == config.prefix_length`
/// - Every registered source was absorbed into `model` when it was first
///   trained; a source that became unreadable since is skipped by
///   `set_prefix_length` but stays registered
#[derive(Debug)]
pub struct Session {
	config: SessionConfig,
	model: PrefixModel,
	registry: SourceRegistry,
}

impl Session {
	/// Creates an untrained session.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidConfig` if `config` is invalid.
	pub fn new(config: SessionConfig) -> MarkovResult<Self> {
		config.validate()?;
		let model = PrefixModel::new(config.prefix_length)?;
		Ok(Self { config, model, registry: SourceRegistry::default() })
	}

	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	pub fn model(&self) -> &PrefixModel {
		&self.model
	}

	pub fn trained_sources(&self) -> &[PathBuf] {
		self.registry.sources()
	}

	/// Trains the model on one source and registers it.
	///
	/// # Errors
	/// - `MarkovError::AlreadyTrained` if the source was already absorbed
	/// - `MarkovError::Io` if it cannot be read
	/// - `MarkovError::EmptySource` if it holds no token
	///
	/// On error the model and the registry are left unchanged.
	pub fn train<P: AsRef<Path>>(&mut self, path: P) -> MarkovResult<usize> {
		let path = path.as_ref();
		if self.registry.contains(path) {
			return Err(MarkovError::AlreadyTrained(path.to_path_buf()));
		}

		let tokens = train_source(&mut self.model, path)?;
		self.registry.register(path)?;
		Ok(tokens)
	}

	/// Trains every source in order; a failing source never aborts the batch.
	///
	/// Returns one result per source, in input order.
	pub fn train_all<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<MarkovResult<usize>> {
		paths
			.iter()
			.map(|path| {
				let result = self.train(path);
				if let Err(e) = &result {
					warn!(error = %e, "source skipped");
				}
				result
			})
			.collect()
	}

	/// Changes the prefix length and retrains every registered source.
	///
	/// # Errors
	/// Returns `MarkovError::InvalidConfig` if `prefix_length == 0`; the
	/// previous configuration and model are kept.
	pub fn set_prefix_length(&mut self, prefix_length: usize) -> MarkovResult<()> {
		let model = retrain(prefix_length, self.registry.sources())?;
		self.config.prefix_length = prefix_length;
		self.model = model;
		info!(prefix_length, "all sources retrained");
		Ok(())
	}

	pub fn set_sentence_count(&mut self, sentence_count: usize) {
		self.config.sentence_count = sentence_count;
	}

	/// # Errors
	/// Returns `MarkovError::InvalidConfig` if `max_words == 0`.
	pub fn set_max_words(&mut self, max_words: usize) -> MarkovResult<()> {
		if max_words == 0 {
			return Err(MarkovError::InvalidConfig("max words must be >= 1".to_owned()));
		}
		self.config.max_words = max_words;
		Ok(())
	}

	/// Generates `sentence_count` sentences.
	///
	/// # Errors
	/// Returns `MarkovError::InsufficientData` if no source was trained or the
	/// model yields no word.
	pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MarkovResult<Vec<String>> {
		self.generate_count(self.config.sentence_count, rng)
	}

	/// Generates `count` sentences regardless of the configured count.
	pub fn generate_count<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> MarkovResult<Vec<String>> {
		if self.registry.is_empty() || self.model.is_empty() {
			return Err(MarkovError::InsufficientData);
		}
		generate_sentences(&self.model, count, self.config.max_words, rng)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::fs;

	fn session(prefix_length: usize) -> Session {
		Session::new(SessionConfig { prefix_length, ..Default::default() }).unwrap()
	}

	#[test]
	fn registry_rejects_duplicates() {
		let mut registry = SourceRegistry::default();
		registry.register("a.txt").unwrap();
		assert!(matches!(registry.register("a.txt"), Err(MarkovError::AlreadyTrained(_))));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn invalid_config_is_rejected() {
		let config = SessionConfig { prefix_length: 0, ..Default::default() };
		assert!(Session::new(config).is_err());
	}

	#[test]
	fn untrained_session_reports_insufficient_data() {
		let session = session(2);
		let mut rng = StdRng::seed_from_u64(0);
		assert!(matches!(session.generate(&mut rng), Err(MarkovError::InsufficientData)));
	}

	#[test]
	fn training_twice_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("a.txt");
		fs::write(&source, "one two.").unwrap();

		let mut session = session(1);
		assert_eq!(session.train(&source).unwrap(), 2);
		let before = session.model().total_successors();

		assert!(matches!(session.train(&source), Err(MarkovError::AlreadyTrained(_))));
		assert_eq!(session.model().total_successors(), before);
	}

	#[test]
	fn batch_skips_bad_sources() {
		let dir = tempfile::tempdir().unwrap();
		let good = dir.path().join("good.txt");
		let empty = dir.path().join("empty.txt");
		let missing = dir.path().join("missing.txt");
		fs::write(&good, "hello world.").unwrap();
		fs::write(&empty, "").unwrap();

		let mut session = session(1);
		let results = session.train_all(&[missing.clone(), empty.clone(), good.clone()]);

		assert!(matches!(results[0], Err(MarkovError::Io { .. })));
		assert!(matches!(results[1], Err(MarkovError::EmptySource(_))));
		assert_eq!(results[2].as_ref().ok(), Some(&2));
		assert_eq!(session.trained_sources(), [good]);
	}

	#[test]
	fn invalid_prefix_length_keeps_state() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("a.txt");
		fs::write(&source, "one two three.").unwrap();

		let mut session = session(2);
		session.train(&source).unwrap();
		let stats = session.model().stats();

		assert!(session.set_prefix_length(0).is_err());
		assert_eq!(session.config().prefix_length, 2);
		assert_eq!(session.model().stats(), stats);
	}

	#[test]
	fn prefix_length_change_retrains_everything() {
		let dir = tempfile::tempdir().unwrap();
		let first = dir.path().join("first.txt");
		let second = dir.path().join("second.txt");
		fs::write(&first, "the cat sat. the cat ran.").unwrap();
		fs::write(&second, "a dog barked loudly.").unwrap();

		let mut session = session(1);
		session.train_all(&[&first, &second]);
		session.set_prefix_length(2).unwrap();

		assert_eq!(session.config().prefix_length, 2);
		assert!(session.model().prefixes().all(|prefix| prefix.key().len() == 2));
		assert_eq!(session.trained_sources(), [first, second]);
		assert_eq!(session.model().stats().sentence_starts, 3);
	}

	#[test]
	fn generates_configured_count() {
		let dir = tempfile::tempdir().unwrap();
		let source = dir.path().join("a.txt");
		fs::write(&source, "it works. it really works!").unwrap();

		let mut session = session(1);
		session.train(&source).unwrap();
		session.set_sentence_count(3);
		let mut rng = StdRng::seed_from_u64(5);

		assert_eq!(session.generate(&mut rng).unwrap().len(), 3);
		assert!(session.set_max_words(0).is_err());
	}

	#[test]
	fn vanished_source_stays_registered_after_retrain() {
		let dir = tempfile::tempdir().unwrap();
		let kept = dir.path().join("kept.txt");
		let gone = dir.path().join("gone.txt");
		fs::write(&kept, "a b.").unwrap();
		fs::write(&gone, "c d.").unwrap();

		let mut session = session(1);
		session.train_all(&[&kept, &gone]);
		fs::remove_file(&gone).unwrap();

		session.set_prefix_length(2).unwrap();
		assert_eq!(session.trained_sources(), [kept, gone]);
		assert_eq!(session.model().stats().sentence_starts, 1);
	}
}
