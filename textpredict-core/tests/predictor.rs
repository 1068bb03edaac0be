//! End-to-end tests of the predictor lifecycle against real files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use textpredict_core::model::ngram_model::NGramModel;
use textpredict_core::predictor::{HISTORY_THRESHOLD, TextPredictor};

fn model_path(dir: &TempDir) -> PathBuf {
	dir.path().join("user.model")
}

#[test]
fn fresh_predictor_starts_empty_and_writes_no_file() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let predictor = TextPredictor::new(&path, 3, &[]).unwrap();
	let info = predictor.model_info();

	assert_eq!(info.order, 3);
	assert_eq!(info.total_words, 0);
	assert_eq!(info.vocabulary_size, 0);
	assert_eq!(info.history_entries, 0);
	assert!(!path.exists());
	assert!(predictor.predict("hello", 3).is_empty());
}

#[test]
fn sample_texts_pretrain_and_persist_the_model() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let samples = vec![
		"the cat sat on the mat".to_owned(),
		"the cat ran away".to_owned(),
	];
	let predictor = TextPredictor::new(&path, 3, &samples).unwrap();

	assert!(path.exists());
	assert_eq!(predictor.model_info().total_words, 10);

	let result = predictor.predict("the cat", 2);
	let words: Vec<&str> = result.iter().map(|p| p.word.as_str()).collect();
	assert!(words.contains(&"sat"));
	assert!(words.contains(&"ran"));
}

#[test]
fn reopening_a_saved_model_ignores_the_order_hint() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let samples = vec!["one two three four".to_owned()];
	TextPredictor::new(&path, 4, &samples).unwrap();

	// The persisted order (4) wins over the caller-supplied hint (2).
	let reopened = TextPredictor::new(&path, 2, &[]).unwrap();
	let info = reopened.model_info();
	assert_eq!(info.order, 4);
	assert_eq!(info.total_words, 4);
	assert_eq!(info.smoothing, 0.1);
}

#[test]
fn corrupt_model_file_falls_back_to_a_fresh_model() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);
	fs::write(&path, b"this is not a model file").unwrap();

	let predictor = TextPredictor::new(&path, 3, &[]).unwrap();
	let info = predictor.model_info();
	assert_eq!(info.order, 3);
	assert_eq!(info.total_words, 0);
}

#[test]
fn truncated_model_file_fails_to_load() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let mut model = NGramModel::new(3, 0.1).unwrap();
	model.train("the quick brown fox jumps over the lazy dog");
	model.save(&path).unwrap();

	let bytes = fs::read(&path).unwrap();
	fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

	assert!(NGramModel::load(&path).is_err());
}

#[test]
fn model_file_roundtrips_through_the_predictor() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let mut model = NGramModel::new(3, 0.1).unwrap();
	model.train("alpha beta gamma alpha beta delta");
	model.save(&path).unwrap();

	let restored = NGramModel::load(&path).unwrap();
	assert_eq!(restored, model);
}

#[test]
fn history_threshold_triggers_exactly_one_training_pass() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let mut predictor = TextPredictor::new(&path, 2, &[]).unwrap();

	for _ in 0..HISTORY_THRESHOLD - 1 {
		predictor.add_to_history("hello world");
	}
	assert_eq!(predictor.model_info().history_entries, HISTORY_THRESHOLD - 1);
	assert!(!path.exists(), "no save may happen before the threshold");

	predictor.add_to_history("hello world");

	let info = predictor.model_info();
	assert_eq!(info.history_entries, 0, "buffer must be empty after training");
	assert!(path.exists(), "threshold training must persist the model");
	// One pass over 100 joined two-word entries.
	assert_eq!(info.total_words, 2 * HISTORY_THRESHOLD as u32);
}

#[test]
fn force_training_on_an_empty_buffer_reports_failure() {
	let dir = TempDir::new().unwrap();
	let mut predictor = TextPredictor::new(model_path(&dir), 3, &[]).unwrap();
	assert!(!predictor.force_training());
}

#[test]
fn force_training_consumes_the_buffer() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);
	let mut predictor = TextPredictor::new(&path, 3, &[]).unwrap();

	predictor.add_to_history("good morning");
	predictor.add_to_history("good evening");

	assert!(predictor.force_training());
	let info = predictor.model_info();
	assert_eq!(info.history_entries, 0);
	assert_eq!(info.total_words, 4);
	assert!(path.exists());

	let result = predictor.predict("good", 2);
	let words: Vec<&str> = result.iter().map(|p| p.word.as_str()).collect();
	assert!(words.contains(&"morning"));
	assert!(words.contains(&"evening"));
}

#[test]
fn clear_history_discards_without_training() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);
	let mut predictor = TextPredictor::new(&path, 3, &[]).unwrap();

	predictor.add_to_history("never trained");
	predictor.clear_history();

	let info = predictor.model_info();
	assert_eq!(info.history_entries, 0);
	assert_eq!(info.total_words, 0);
	assert!(!path.exists());
	assert!(!predictor.force_training(), "nothing left to train on");
}

#[test]
fn retraining_accumulates_across_sessions() {
	let dir = TempDir::new().unwrap();
	let path = model_path(&dir);

	let mut predictor = TextPredictor::new(&path, 3, &[]).unwrap();
	predictor.add_to_history("see you tomorrow");
	assert!(predictor.force_training());
	drop(predictor);

	let mut reopened = TextPredictor::new(&path, 3, &[]).unwrap();
	assert_eq!(reopened.model_info().total_words, 3);

	reopened.add_to_history("see you soon");
	assert!(reopened.force_training());
	assert_eq!(reopened.model_info().total_words, 6);
}
