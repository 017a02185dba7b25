use unicode_normalization::UnicodeNormalization;

/// Unicode normalization (NFKC) ahead of tokenization, so compatibility
/// forms the OCR engine emits (ligatures, full-width letters) compare equal
/// to their plain spellings.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect()
}

/// Split text into lower-cased word tokens: maximal runs of Unicode
/// alphabetic characters, in original left-to-right order. The order is
/// load-bearing, downstream tie-breaking depends on it.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphabetic() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_non_alphabetic_and_lowercases() {
        let tokens = tokenize("The cat, the CAT!");
        assert_eq!(tokens, vec!["the", "cat", "the", "cat"]);
    }

    #[test]
    fn digits_and_punctuation_are_separators() {
        let tokens = tokenize("page42 of 2024-edition (draft)");
        assert_eq!(tokens, vec!["page", "of", "edition", "draft"]);
    }

    #[test]
    fn preserves_left_to_right_order() {
        let tokens = tokenize("zebra apple zebra mango");
        assert_eq!(tokens, vec!["zebra", "apple", "zebra", "mango"]);
    }

    #[test]
    fn handles_unicode_letters() {
        let tokens = tokenize("Café déjà-vu naïve");
        assert_eq!(tokens, vec!["café", "déjà", "vu", "naïve"]);
    }

    #[test]
    fn empty_and_symbol_only_input_yield_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("123 !@# \n\t").is_empty());
    }

    #[test]
    fn nfkc_folds_compatibility_forms() {
        // U+FB01 is the "fi" ligature
        let normalized = normalize("\u{fb01}le");
        assert_eq!(tokenize(&normalized), vec!["file"]);
    }
}
