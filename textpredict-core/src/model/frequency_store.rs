use std::collections::{HashMap, HashSet};

/// Nested frequency tables backing an n-gram model.
///
/// A `FrequencyStore` holds everything the model learns: the vocabulary,
/// per-word unigram counts, and one context table per n-gram order. A
/// context is an ordered sequence of `k - 1` tokens and is compared
/// element-wise, so `["the", "cat"]` and `["cat", "the"]` are distinct keys.
///
/// ## Responsibilities
/// - Accumulate token and n-gram occurrences during training
/// - Answer context lookups for back-off prediction
/// - Carry the model hyperparameters (`order`, `smoothing`) so the whole
///   model round-trips through a single persisted structure
///
/// ## Invariants
/// - Every stored count is >= 1
/// - `total_words` equals the sum of all unigram counts
/// - Every context under `models[k]` has exactly `k - 1` tokens
///
/// The store is owned exclusively by an `NGramModel` and is not part of the
/// public API.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyStore {
	/// Maximum n-gram order configured for this model (>= 1).
	pub(crate) order: usize,
	/// Additive (Lidstone) smoothing constant (> 0).
	pub(crate) smoothing: f64,
	/// Cumulative count of tokens ever trained on.
	pub(crate) total_words: u32,
	/// All distinct tokens observed during training.
	pub(crate) vocabulary: HashSet<String>,
	/// Occurrence count per token.
	pub(crate) unigram_counts: HashMap<String, u32>,
	/// order k → context (k-1 tokens) → next token → count.
	pub(crate) models: HashMap<usize, HashMap<Vec<String>, HashMap<String, u32>>>,
}

impl FrequencyStore {
	/// Creates an empty store with the given hyperparameters.
	///
	/// Validation of `order` and `smoothing` happens at the `NGramModel`
	/// boundary; the store takes them as given.
	pub(crate) fn new(order: usize, smoothing: f64) -> Self {
		Self {
			order,
			smoothing,
			total_words: 0,
			vocabulary: HashSet::new(),
			unigram_counts: HashMap::new(),
			models: HashMap::new(),
		}
	}

	/// Records one occurrence of a token.
	///
	/// Adds the token to the vocabulary, bumps its unigram count and
	/// `total_words`, keeping the sum invariant local to this method.
	pub(crate) fn record_token(&mut self, token: &str) {
		if !self.vocabulary.contains(token) {
			self.vocabulary.insert(token.to_owned());
		}
		*self.unigram_counts.entry(token.to_owned()).or_insert(0) += 1;
		self.total_words += 1;
	}

	/// Records one occurrence of an n-gram of order `k`.
	///
	/// `context` must hold exactly `k - 1` tokens; `word` is the token that
	/// followed it.
	pub(crate) fn record_ngram(&mut self, k: usize, context: &[String], word: &str) {
		let word_map = self
			.models
			.entry(k)
			.or_default()
			.entry(context.to_vec())
			.or_default();
		*word_map.entry(word.to_owned()).or_insert(0) += 1;
	}

	/// Looks up the next-word table for a context at order `k`.
	///
	/// Returns `None` if the order or the context was never observed.
	pub(crate) fn context_table(&self, k: usize, context: &[String]) -> Option<&HashMap<String, u32>> {
		self.models.get(&k).and_then(|contexts| contexts.get(context))
	}
}

#[cfg(test)]
mod tests {
	use super::FrequencyStore;

	fn ctx(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| (*w).to_owned()).collect()
	}

	#[test]
	fn record_token_tracks_vocabulary_and_totals() {
		let mut store = FrequencyStore::new(3, 0.1);
		store.record_token("the");
		store.record_token("cat");
		store.record_token("the");

		assert_eq!(store.total_words, 3);
		assert_eq!(store.vocabulary.len(), 2);
		assert_eq!(store.unigram_counts["the"], 2);
		assert_eq!(store.unigram_counts["cat"], 1);
	}

	#[test]
	fn record_ngram_accumulates_per_context() {
		let mut store = FrequencyStore::new(3, 0.1);
		let context = ctx(&["the", "cat"]);
		store.record_ngram(3, &context, "sat");
		store.record_ngram(3, &context, "sat");
		store.record_ngram(3, &context, "ran");

		let table = store.context_table(3, &context).unwrap();
		assert_eq!(table["sat"], 2);
		assert_eq!(table["ran"], 1);
	}

	#[test]
	fn context_comparison_is_order_sensitive() {
		let mut store = FrequencyStore::new(3, 0.1);
		store.record_ngram(3, &ctx(&["a", "b"]), "c");

		assert!(store.context_table(3, &ctx(&["a", "b"])).is_some());
		assert!(store.context_table(3, &ctx(&["b", "a"])).is_none());
	}

	#[test]
	fn unknown_order_has_no_table() {
		let store = FrequencyStore::new(3, 0.1);
		assert!(store.context_table(2, &ctx(&["a"])).is_none());
	}
}
