use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::frequency_store::FrequencyStore;
use super::tokenizer::tokenize;
use crate::error::ModelError;

/// A single ranked next-word suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
	/// The suggested token.
	pub word: String,
	/// Estimated probability of this token following the given context.
	pub probability: f64,
}

/// Word-level n-gram model with back-off prediction and additive smoothing.
///
/// The model is trained incrementally from raw text and maintains frequency
/// tables for every order from 2 up to the configured maximum. Prediction
/// walks those tables from the largest usable context down to bigrams,
/// accumulating smoothed probabilities, and tops the list up from unigram
/// frequencies when the context alone cannot fill the requested quota.
///
/// # Responsibilities
/// - Tokenize and ingest training text into the owned `FrequencyStore`
/// - Rank next-word candidates for a given context
/// - Persist to and restore from the binary model format
///
/// # Invariants
/// - `order` is always >= 1 and `smoothing` > 0
/// - Training is purely additive: counts never shrink or decay
/// - N-gram windows never span separate `train` calls
#[derive(Debug, Clone, PartialEq)]
pub struct NGramModel {
	store: FrequencyStore,
}

impl NGramModel {
	/// Creates an empty model of the given maximum order.
	///
	/// # Errors
	/// Returns an error if `order` is 0 or `smoothing` is not strictly
	/// positive (NaN included).
	pub fn new(order: usize, smoothing: f64) -> Result<Self, ModelError> {
		if order < 1 {
			return Err(ModelError::InvalidOrder(order));
		}
		if !(smoothing > 0.0) {
			return Err(ModelError::InvalidSmoothing(smoothing));
		}
		Ok(Self { store: FrequencyStore::new(order, smoothing) })
	}

	/// Trains the model on a piece of raw text.
	///
	/// The text is tokenized, every token is counted into the vocabulary,
	/// and every contiguous window of length 2..=order contributes one
	/// context → next-word observation. Text that tokenizes to nothing is
	/// a silent no-op.
	///
	/// Training is online: repeated calls keep adding counts, and windows
	/// are only formed within a single call, never across calls.
	pub fn train(&mut self, text: &str) {
		let started = Instant::now();

		let words = tokenize(text);
		if words.is_empty() {
			return;
		}

		for word in &words {
			self.store.record_token(word);
		}

		for k in 2..=self.store.order {
			if words.len() < k {
				break;
			}
			for window in words.windows(k) {
				let (context, word) = window.split_at(k - 1);
				self.store.record_ngram(k, context, &word[0]);
			}
		}

		debug!(tokens = words.len(), elapsed = ?started.elapsed(), "training pass complete");
	}

	/// Predicts up to `num_predictions` next words for the given context.
	///
	/// Results are sorted by descending probability; exact probability ties
	/// order alphabetically by word, which keeps the ranking deterministic.
	///
	/// # Behavior
	/// - `num_predictions == 0` returns an empty list.
	/// - An empty (or fully non-word) context ranks the whole vocabulary by
	///   raw unigram frequency.
	/// - Otherwise the model backs off from the largest usable order down
	///   to bigrams. Every matched context table contributes the smoothed
	///   probability `(count + s) / (table_total + s * |vocab|)` for each of
	///   its words; a word matched at several orders accumulates the sum of
	///   its per-order probabilities. This accumulation (rather than
	///   stopping at the first matching order, as classic back-off would)
	///   deliberately favors words reinforced at multiple context lengths.
	/// - If fewer than `num_predictions` candidates were found, the list is
	///   topped up with the most frequent remaining vocabulary words using
	///   their smoothed unigram probability.
	///
	/// Unknown context words never fail; they simply miss every lookup and
	/// fall through to the unigram top-up. An untrained model returns an
	/// empty list for any query.
	pub fn predict(&self, context: &str, num_predictions: usize) -> Vec<Prediction> {
		if num_predictions == 0 {
			return Vec::new();
		}

		let words = tokenize(context);

		// Without context, rank the raw unigram frequencies.
		if words.is_empty() {
			let mut common: Vec<(&String, u32)> = self
				.store
				.unigram_counts
				.iter()
				.map(|(word, count)| (word, *count))
				.collect();
			common.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

			let total = self.store.total_words.max(1) as f64;
			return common
				.into_iter()
				.take(num_predictions)
				.map(|(word, count)| Prediction {
					word: word.clone(),
					probability: count as f64 / total,
				})
				.collect();
		}

		let mut candidates: HashMap<String, f64> = HashMap::new();
		let vocab_size = self.store.vocabulary.len() as f64;

		// Back off from the largest context that can apply, accumulating
		// smoothed probabilities from every matched order.
		let max_order = self.store.order.min(words.len() + 1);
		for n in (2..=max_order).rev() {
			let context_words = &words[words.len() - (n - 1)..];
			let Some(table) = self.store.context_table(n, context_words) else {
				continue;
			};

			let table_total: u32 = table.values().sum();
			for (word, count) in table {
				let probability = (*count as f64 + self.store.smoothing)
					/ (table_total as f64 + self.store.smoothing * vocab_size);
				*candidates.entry(word.clone()).or_insert(0.0) += probability;
			}

			if candidates.len() >= num_predictions {
				break;
			}
		}

		// Quota fill: top up with the most frequent words not yet proposed.
		if candidates.len() < num_predictions {
			let remaining = num_predictions - candidates.len();
			let total = self.store.total_words.max(1) as f64;
			let vocab = vocab_size.max(1.0);

			let mut common: Vec<(&String, u32)> = self
				.store
				.unigram_counts
				.iter()
				.filter(|(word, _)| !candidates.contains_key(*word))
				.map(|(word, count)| (word, *count))
				.collect();
			common.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

			for (word, count) in common.into_iter().take(remaining) {
				let probability = (count as f64 + self.store.smoothing)
					/ (total + self.store.smoothing * vocab);
				candidates.insert(word.clone(), probability);
			}
		}

		let mut result: Vec<Prediction> = candidates
			.into_iter()
			.map(|(word, probability)| Prediction { word, probability })
			.collect();
		result.sort_by(|a, b| {
			b.probability
				.total_cmp(&a.probability)
				.then_with(|| a.word.cmp(&b.word))
		});
		result.truncate(num_predictions);
		result
	}

	/// Persists the model to `path` in the binary model format.
	///
	/// # Errors
	/// Fails if the model has never been trained or the file cannot be
	/// written.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelError> {
		self.store.save(path.as_ref())
	}

	/// Restores a model previously written by [`NGramModel::save`].
	///
	/// The persisted order and smoothing replace whatever the caller might
	/// have configured elsewhere.
	///
	/// # Errors
	/// Fails if the file cannot be opened, any read comes up short, or a
	/// sanity check flags the content as corrupt. On failure no model is
	/// produced, so a partially populated store can never be observed.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
		Ok(Self { store: FrequencyStore::load(path.as_ref())? })
	}

	/// Maximum configured n-gram order.
	pub fn order(&self) -> usize {
		self.store.order
	}

	/// Additive smoothing constant.
	pub fn smoothing(&self) -> f64 {
		self.store.smoothing
	}

	/// Number of distinct tokens seen during training.
	pub fn vocabulary_size(&self) -> usize {
		self.store.vocabulary.len()
	}

	/// Cumulative count of tokens ever trained on.
	pub fn total_words(&self) -> u32 {
		self.store.total_words
	}
}
