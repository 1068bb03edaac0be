//! Next-word prediction library.
//!
//! This crate provides a lightweight n-gram prediction engine including:
//! - Word-level tokenization (ASCII alphanumerics plus apostrophes)
//! - Incremental training with hierarchical back-off prediction and
//!   additive (Lidstone) smoothing
//! - A fixed little-endian binary persistence format
//! - A predictor that buffers typing history and retrains on a threshold
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core n-gram model: tokenizer, training and prediction.
pub mod model;

/// Model lifecycle orchestration: load-or-create, history buffering,
/// threshold-driven retraining and persistence.
pub mod predictor;

/// Error type shared across the crate.
pub mod error;

/// Binary model file codec.
///
/// Not exposed; persistence goes through `NGramModel::save` / `load`.
mod codec;
