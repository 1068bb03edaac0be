use std::io;

use thiserror::Error;

/// Errors produced by model construction, persistence and loading.
///
/// Input-level problems (empty text, zero suggestion counts, unknown
/// context words) are never reported through this type: the model handles
/// them by producing empty or best-effort results instead.
#[derive(Debug, Error)]
pub enum ModelError {
	/// The requested n-gram order is unusable (must be at least 1).
	#[error("invalid n-gram order {0} (must be at least 1)")]
	InvalidOrder(usize),

	/// The smoothing constant must be strictly positive.
	#[error("invalid smoothing constant {0} (must be > 0)")]
	InvalidSmoothing(f64),

	/// Refused to persist a model that has never been trained.
	#[error("model is empty, nothing to save")]
	EmptyModel,

	/// A sanity check failed while reading a model file.
	///
	/// Callers treat this the same as a missing file and fall back
	/// to a fresh model.
	#[error("corrupt model file: {0}")]
	Corrupt(&'static str),

	/// Underlying file I/O failure, including short reads.
	#[error(transparent)]
	Io(#[from] io::Error),
}
