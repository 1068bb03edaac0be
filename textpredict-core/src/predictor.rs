use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::ModelError;
use crate::model::ngram_model::{NGramModel, Prediction};

/// Number of buffered history entries that triggers automatic retraining.
pub const HISTORY_THRESHOLD: usize = 100;

/// Smoothing constant applied to freshly created models.
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Read-only snapshot of a predictor's state, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
	/// Maximum configured n-gram order.
	pub order: usize,
	/// Number of distinct tokens in the vocabulary.
	pub vocabulary_size: usize,
	/// Cumulative count of tokens trained on.
	pub total_words: u32,
	/// Raw text entries currently buffered for the next training pass.
	pub history_entries: usize,
	/// Additive smoothing constant.
	pub smoothing: f64,
}

/// Orchestrates one model instance's lifecycle.
///
/// A `TextPredictor` owns one [`NGramModel`] and one history buffer. It
/// loads or creates the model from a file path at construction, collects
/// raw user-entered text, and retrains and persists the model once the
/// buffer crosses [`HISTORY_THRESHOLD`].
///
/// Single-threaded by design: one predictor serves one caller at a time,
/// and distinct instances are fully independent. The persisted file assumes
/// a single writer per path.
#[derive(Debug)]
pub struct TextPredictor {
	model: NGramModel,
	model_path: PathBuf,
	history: Vec<String>,
}

impl TextPredictor {
	/// Loads an existing model from `model_path` or creates a new one.
	///
	/// # Behavior
	/// - If the path names a readable model file, it is loaded and its
	///   persisted order and smoothing win over the `order` argument. A
	///   file that fails to load (corrupt or unreadable) is treated like a
	///   missing one: a fresh model is created instead.
	/// - Otherwise a fresh model of the given `order` is created; when
	///   `sample_texts` is non-empty the model is pretrained on each sample
	///   in sequence and persisted immediately. A failed initial save is
	///   logged but does not fail construction.
	///
	/// # Errors
	/// Only invalid hyperparameters (an `order` of 0) fail construction.
	pub fn new<P: AsRef<Path>>(
		model_path: P,
		order: usize,
		sample_texts: &[String],
	) -> Result<Self, ModelError> {
		let model_path = model_path.as_ref().to_path_buf();

		let model = if model_path.is_file() {
			match NGramModel::load(&model_path) {
				Ok(model) => {
					debug!(path = %model_path.display(), "loaded existing model");
					model
				}
				Err(e) => {
					warn!(path = %model_path.display(), error = %e, "failed to load model, creating a new one");
					NGramModel::new(order, DEFAULT_SMOOTHING)?
				}
			}
		} else {
			let mut model = NGramModel::new(order, DEFAULT_SMOOTHING)?;
			if !sample_texts.is_empty() {
				debug!(samples = sample_texts.len(), "pretraining new model");
				for text in sample_texts {
					model.train(text);
				}
				if let Err(e) = model.save(&model_path) {
					error!(path = %model_path.display(), error = %e, "failed to persist pretrained model");
				}
			}
			model
		};

		Ok(Self { model, model_path, history: Vec::new() })
	}

	/// Buffers one raw text entry for a future training pass.
	///
	/// Reaching [`HISTORY_THRESHOLD`] buffered entries triggers
	/// [`TextPredictor::force_training`] automatically.
	pub fn add_to_history(&mut self, text: &str) {
		self.history.push(text.to_owned());
		if self.history.len() >= HISTORY_THRESHOLD {
			debug!(entries = self.history.len(), "history threshold reached, retraining");
			self.force_training();
		}
	}

	/// Predicts up to `num_predictions` next words for the given context.
	pub fn predict(&self, context: &str, num_predictions: usize) -> Vec<Prediction> {
		self.model.predict(context, num_predictions)
	}

	/// Trains on all buffered history now, persisting the model.
	///
	/// All buffered entries are joined with a space into a single training
	/// pass. The buffer is cleared unconditionally once the training
	/// attempt is made, whether or not persistence succeeds.
	///
	/// Returns `false` when the buffer is empty or the model could not be
	/// saved, `true` otherwise.
	pub fn force_training(&mut self) -> bool {
		if self.history.is_empty() {
			debug!("no buffered history to train on");
			return false;
		}

		let text = self.history.join(" ");
		self.model.train(&text);
		let saved = self.save_model();
		self.history.clear();
		saved
	}

	/// Persists the current model to its configured path.
	///
	/// Failures are logged and reported as `false`, never propagated.
	pub fn save_model(&self) -> bool {
		match self.model.save(&self.model_path) {
			Ok(()) => true,
			Err(e) => {
				error!(path = %self.model_path.display(), error = %e, "failed to save model");
				false
			}
		}
	}

	/// Discards all buffered history without training.
	pub fn clear_history(&mut self) {
		let dropped = self.history.len();
		self.history.clear();
		debug!(dropped, "cleared history buffer");
	}

	/// Returns a read-only snapshot of the current state.
	pub fn model_info(&self) -> ModelInfo {
		ModelInfo {
			order: self.model.order(),
			vocabulary_size: self.model.vocabulary_size(),
			total_words: self.model.total_words(),
			history_entries: self.history.len(),
			smoothing: self.model.smoothing(),
		}
	}
}
