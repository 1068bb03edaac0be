//! Binary persistence for [`FrequencyStore`].
//!
//! The on-disk layout is the wire contract of the model file and is fixed
//! little-endian with explicit integer widths (the format is otherwise not
//! portable across platforms):
//!
//! ```text
//! order:      i32
//! smoothing:  f64
//! totalWords: i32
//! wordCount:  u64
//!   wordCount × [ byteLen:u64, utf8 bytes, count:i32 ]
//! modelCount: u64
//!   modelCount × [ order_k:i32, contextCount:u64,
//!     contextCount × [ ctxLen:u64, ctxLen × [byteLen:u64, utf8 bytes],
//!                      wordMapSize:u64,
//!                      wordMapSize × [byteLen:u64, utf8 bytes, count:i32] ] ]
//! ```
//!
//! The vocabulary is not stored separately; it is rebuilt on load as the key
//! set of the word-count section. Table entries are written in hash-map
//! iteration order, so two saves of equal stores may differ byte-wise while
//! still round-tripping to equal stores.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::ModelError;
use crate::model::frequency_store::FrequencyStore;

/// Upper bound on a single serialized token, in bytes.
///
/// Real tokens are short words; a length prefix beyond this bound is a
/// corruption signal, not data.
const MAX_TOKEN_BYTES: u64 = 1 << 16;

fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<(), ModelError> {
	writer.write_all(&value.to_le_bytes())?;
	Ok(())
}

fn write_u64<W: Write>(writer: &mut W, value: u64) -> Result<(), ModelError> {
	writer.write_all(&value.to_le_bytes())?;
	Ok(())
}

fn write_f64<W: Write>(writer: &mut W, value: f64) -> Result<(), ModelError> {
	writer.write_all(&value.to_le_bytes())?;
	Ok(())
}

/// Writes a length-prefixed UTF-8 token.
fn write_token<W: Write>(writer: &mut W, token: &str) -> Result<(), ModelError> {
	write_u64(writer, token.len() as u64)?;
	writer.write_all(token.as_bytes())?;
	Ok(())
}

fn read_i32<R: Read>(reader: &mut R) -> Result<i32, ModelError> {
	let mut buf = [0u8; 4];
	reader.read_exact(&mut buf)?;
	Ok(i32::from_le_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> Result<u64, ModelError> {
	let mut buf = [0u8; 8];
	reader.read_exact(&mut buf)?;
	Ok(u64::from_le_bytes(buf))
}

fn read_f64<R: Read>(reader: &mut R) -> Result<f64, ModelError> {
	let mut buf = [0u8; 8];
	reader.read_exact(&mut buf)?;
	Ok(f64::from_le_bytes(buf))
}

/// Reads a length-prefixed UTF-8 token, rejecting absurd lengths.
fn read_token<R: Read>(reader: &mut R) -> Result<String, ModelError> {
	let len = read_u64(reader)?;
	if len > MAX_TOKEN_BYTES {
		return Err(ModelError::Corrupt("token length exceeds sanity bound"));
	}
	let mut buf = vec![0u8; len as usize];
	reader.read_exact(&mut buf)?;
	String::from_utf8(buf).map_err(|_| ModelError::Corrupt("token is not valid UTF-8"))
}

impl FrequencyStore {
	/// Serializes the store into any writer in the binary model layout.
	pub(crate) fn to_writer<W: Write>(&self, writer: &mut W) -> Result<(), ModelError> {
		write_i32(writer, self.order as i32)?;
		write_f64(writer, self.smoothing)?;
		write_i32(writer, self.total_words as i32)?;

		write_u64(writer, self.unigram_counts.len() as u64)?;
		for (word, count) in &self.unigram_counts {
			write_token(writer, word)?;
			write_i32(writer, *count as i32)?;
		}

		write_u64(writer, self.models.len() as u64)?;
		for (order_k, contexts) in &self.models {
			write_i32(writer, *order_k as i32)?;
			write_u64(writer, contexts.len() as u64)?;

			for (context, word_map) in contexts {
				write_u64(writer, context.len() as u64)?;
				for token in context {
					write_token(writer, token)?;
				}

				write_u64(writer, word_map.len() as u64)?;
				for (word, count) in word_map {
					write_token(writer, word)?;
					write_i32(writer, *count as i32)?;
				}
			}
		}

		Ok(())
	}

	/// Deserializes a store from any reader.
	///
	/// Every read is checked: a short read, a non-positive header field, a
	/// count below 1 or a malformed token aborts the load with an error, so
	/// a partially populated store is never returned.
	pub(crate) fn from_reader<R: Read>(reader: &mut R) -> Result<Self, ModelError> {
		let order = read_i32(reader)?;
		if order < 1 {
			return Err(ModelError::Corrupt("non-positive n-gram order"));
		}
		let smoothing = read_f64(reader)?;
		if !(smoothing > 0.0) {
			return Err(ModelError::Corrupt("non-positive smoothing constant"));
		}
		let total_words = read_i32(reader)?;
		if total_words <= 0 {
			return Err(ModelError::Corrupt("non-positive total word count"));
		}

		let mut store = FrequencyStore::new(order as usize, smoothing);
		store.total_words = total_words as u32;

		let word_count = read_u64(reader)?;
		for _ in 0..word_count {
			let word = read_token(reader)?;
			let count = read_i32(reader)?;
			if count < 1 {
				return Err(ModelError::Corrupt("non-positive unigram count"));
			}
			store.vocabulary.insert(word.clone());
			store.unigram_counts.insert(word, count as u32);
		}

		let model_count = read_u64(reader)?;
		for _ in 0..model_count {
			let order_k = read_i32(reader)?;
			if order_k < 2 {
				return Err(ModelError::Corrupt("n-gram table order below 2"));
			}

			let context_count = read_u64(reader)?;
			let contexts = store.models.entry(order_k as usize).or_default();

			for _ in 0..context_count {
				let ctx_len = read_u64(reader)?;
				if ctx_len != order_k as u64 - 1 {
					return Err(ModelError::Corrupt("context length does not match table order"));
				}

				let mut context = Vec::with_capacity(ctx_len as usize);
				for _ in 0..ctx_len {
					context.push(read_token(reader)?);
				}

				let word_map_size = read_u64(reader)?;
				let word_map = contexts.entry(context).or_default();
				for _ in 0..word_map_size {
					let word = read_token(reader)?;
					let count = read_i32(reader)?;
					if count < 1 {
						return Err(ModelError::Corrupt("non-positive n-gram count"));
					}
					word_map.insert(word, count as u32);
				}
			}
		}

		Ok(store)
	}

	/// Writes the store to a file, replacing any previous content.
	///
	/// # Errors
	/// Fails with [`ModelError::EmptyModel`] when nothing has been trained
	/// yet (an empty model is not worth persisting), or with an I/O error
	/// when the file cannot be created or written.
	pub(crate) fn save(&self, path: &Path) -> Result<(), ModelError> {
		if self.total_words == 0 {
			return Err(ModelError::EmptyModel);
		}

		let file = File::create(path)?;
		let mut writer = BufWriter::new(file);
		self.to_writer(&mut writer)?;
		writer.flush()?;
		Ok(())
	}

	/// Reads a store back from a file written by [`FrequencyStore::save`].
	pub(crate) fn load(path: &Path) -> Result<Self, ModelError> {
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		Self::from_reader(&mut reader)
	}
}
