/// Splits raw text into an ordered sequence of normalized word tokens.
///
/// Normalization keeps ASCII alphanumeric characters and apostrophes
/// (lower-cased); every other character, including any non-ASCII one,
/// is treated as a token separator. Tokens are the maximal runs left
/// between separators.
///
/// # Behavior
/// - `"Hello, World!"` → `["hello", "world"]`
/// - `"don't stop"` → `["don't", "stop"]`
/// - Empty or whitespace-only input yields an empty sequence.
///
/// Pure function: deterministic, no side effects.
pub fn tokenize(text: &str) -> Vec<String> {
	let cleaned: String = text
		.chars()
		.map(|c| {
			if c.is_ascii_alphanumeric() || c == '\'' {
				c.to_ascii_lowercase()
			} else {
				' '
			}
		})
		.collect();

	cleaned
		.split_whitespace()
		.map(str::to_owned)
		.collect()
}
