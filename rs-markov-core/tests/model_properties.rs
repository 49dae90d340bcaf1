use std::collections::HashMap;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::model::generator::{DEFAULT_MAX_WORDS, generate_sentence};
use rs_markov_core::model::trainer::{retrain, train};
use rs_markov_core::model::{PrefixKey, PrefixModel};

// --- STRATEGIES ---

fn arb_token() -> impl Strategy<Value = String> {
	prop_oneof![
		4 => prop::sample::select(vec!["the", "cat", "dog", "i", "sat", "ran", "on", "mat", "1.5"]),
		1 => prop::sample::select(vec!["end.", "why?", "stop!", "wait,", "\"so?\"", "Big", "."]),
	]
	.prop_map(str::to_owned)
}

fn arb_tokens() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec(arb_token(), 0..60)
}

fn snapshot(model: &PrefixModel) -> HashMap<PrefixKey, Vec<String>> {
	model
		.prefixes()
		.map(|prefix| {
			let mut successors = prefix.successors().to_vec();
			successors.sort();
			(prefix.key().clone(), successors)
		})
		.collect()
}

proptest! {
	#[test]
	fn every_key_has_model_width(n in 1usize..5, tokens in arb_tokens()) {
		let mut model = PrefixModel::new(n).unwrap();
		train(&mut model, &tokens);

		for prefix in model.prefixes() {
			prop_assert_eq!(prefix.key().len(), n);
		}
	}

	#[test]
	fn every_token_is_recorded_once(n in 1usize..4, tokens in arb_tokens()) {
		let mut model = PrefixModel::new(n).unwrap();
		train(&mut model, &tokens);

		prop_assert_eq!(model.total_successors(), tokens.len());
	}

	#[test]
	fn training_is_additive(n in 1usize..4, a in arb_tokens(), b in arb_tokens()) {
		let mut both = PrefixModel::new(n).unwrap();
		train(&mut both, &a);
		train(&mut both, &b);

		let mut only_a = PrefixModel::new(n).unwrap();
		train(&mut only_a, &a);
		let mut only_b = PrefixModel::new(n).unwrap();
		train(&mut only_b, &b);

		let (a, b) = (snapshot(&only_a), snapshot(&only_b));
		for (key, successors) in snapshot(&both) {
			let mut expected: Vec<String> = a.get(&key).into_iter().chain(b.get(&key)).flatten().cloned().collect();
			expected.sort();
			prop_assert_eq!(successors, expected, "key {}", key);
		}
	}

	#[test]
	fn generated_sentences_start_uppercase(seed in any::<u64>(), tokens in arb_tokens()) {
		let mut model = PrefixModel::new(1).unwrap();
		train(&mut model, &tokens);
		let mut rng = StdRng::seed_from_u64(seed);

		if let Ok(sentence) = generate_sentence(&model, 50, &mut rng) {
			let first = sentence.chars().next().unwrap();
			prop_assert!(!first.is_lowercase(), "sentence {:?}", sentence);
			prop_assert!(sentence.split_whitespace().all(|word| word != "i"));
		}
	}
}

#[test]
fn insert_if_absent_returns_the_same_prefix() {
	let mut model = PrefixModel::new(2).unwrap();
	let first: *const _ = model.insert_if_absent(PrefixKey::new(["a", "b"])).unwrap();
	let second: *const _ = model.insert_if_absent(PrefixKey::new(["a", "b"])).unwrap();

	assert_eq!(first, second);
}

#[test]
fn retrain_builds_an_independent_model() {
	let dir = tempfile::tempdir().unwrap();
	let source = dir.path().join("story.txt");
	std::fs::write(&source, "The cat sat on the mat. The dog sat on the cat!").unwrap();

	let narrow = retrain(1, &[&source]).unwrap();
	let narrow_stats = narrow.stats();
	let mut wide = retrain(2, &[&source]).unwrap();

	assert!(wide.prefixes().all(|prefix| prefix.key().len() == 2));
	assert!(narrow.prefixes().all(|prefix| prefix.key().len() == 1));

	wide.insert_if_absent(PrefixKey::new(["new", "key"])).unwrap().add_successor("x");
	assert_eq!(narrow.stats(), narrow_stats);
	assert!(narrow.lookup(&PrefixKey::new(["the"])).is_some());
}

#[test]
fn retrain_is_deterministic_for_a_seed() {
	let dir = tempfile::tempdir().unwrap();
	let first = dir.path().join("first.txt");
	let second = dir.path().join("second.txt");
	std::fs::write(&first, "the cat sat. the dog ran. the bird flew.").unwrap();
	std::fs::write(&second, "a cat ran. the cat sat down.").unwrap();

	let sample = |model: &PrefixModel| {
		let mut rng = StdRng::seed_from_u64(2024);
		(0..10)
			.map(|_| generate_sentence(model, DEFAULT_MAX_WORDS, &mut rng).unwrap())
			.collect::<Vec<_>>()
	};

	let once = retrain(2, &[&first, &second]).unwrap();
	let twice = retrain(2, &[&first, &second]).unwrap();
	assert_eq!(sample(&once), sample(&twice));
}
