//! Top-level module for the n-gram prediction model.
//!
//! This module groups the model components:
//! - Text normalization and word splitting (`tokenizer`)
//! - Nested frequency tables (`FrequencyStore`, internal)
//! - Training and back-off prediction (`NGramModel`)

/// Fixed-order n-gram model with back-off prediction.
///
/// Handles text ingestion, frequency counting, smoothed next-word
/// ranking, and persistence of the underlying store.
pub mod ngram_model;

/// Pure text-to-token normalization.
///
/// Lower-cases ASCII alphanumerics and apostrophes and treats every
/// other character as a separator.
pub mod tokenizer;

/// Internal nested frequency tables (vocabulary, unigram counts, and
/// per-order context → next-word counts).
///
/// Owned exclusively by `NGramModel`; not exposed publicly.
pub(crate) mod frequency_store;
