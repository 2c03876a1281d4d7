/// Turns raw corpus text into an ordered sequence of tokens.
///
/// - Lowercases the whole input (Unicode aware)
/// - Drops ASCII punctuation and every numeric character
/// - Splits on runs of whitespace
///
/// Any input is accepted. Text without alphabetic content yields an empty vector.
///
/// Example:
/// `"I want 2 cats, please!"` → `["i", "want", "cats", "please"]`
pub fn normalize(text: &str) -> Vec<String> {
	let cleaned: String = text
		.chars()
		.flat_map(char::to_lowercase)
		.filter(|c| !c.is_ascii_punctuation() && !c.is_numeric())
		.collect();

	cleaned.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
	use super::normalize;

	#[test]
	fn strips_punctuation_digits_and_case() {
		assert_eq!(
			normalize("I want a cat. I want a dog."),
			vec!["i", "want", "a", "cat", "i", "want", "a", "dog"]
		);
		assert_eq!(normalize("Route 66, REVISITED!"), vec!["route", "revisited"]);
	}

	#[test]
	fn punctuation_inside_words_joins_them() {
		assert_eq!(normalize("don't stop-me"), vec!["dont", "stopme"]);
	}

	#[test]
	fn collapses_whitespace() {
		assert_eq!(normalize("  hello \t\n  world  "), vec!["hello", "world"]);
	}

	#[test]
	fn empty_or_non_alphabetic_input_yields_nothing() {
		assert!(normalize("").is_empty());
		assert!(normalize("   ").is_empty());
		assert!(normalize("123 ... 456 !?").is_empty());
	}

	#[test]
	fn clean_text_is_a_fixed_point() {
		let clean = "the quick brown fox jumps over the lazy dog";
		assert_eq!(normalize(clean).join(" "), clean);
	}

	#[test]
	fn unicode_letters_survive() {
		assert_eq!(normalize("Élan CAFÉ"), vec!["élan", "café"]);
	}
}
