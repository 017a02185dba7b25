use std::collections::HashMap;

use ocrify_types::RankedWord;

/// Maximum number of entries in the ranked view.
pub const TOP_WORDS_LIMIT: usize = 10;

/// Frequency statistics derived from one token sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextAnalytics {
    /// Total token count, not distinct token count.
    pub word_count: usize,
    /// Token -> occurrence count. Counts sum to `word_count`.
    pub frequency_table: HashMap<String, usize>,
    pub top_words: Vec<RankedWord>,
    pub rarest_word: Option<String>,
}

/// Count token occurrences and derive the ranked and uniqueness views.
///
/// `top_words` is sorted by count descending with ties broken by first
/// occurrence position; `rarest_word` is the first token (by first
/// occurrence) whose count is exactly 1, `None` when no such token exists.
pub fn analyze(tokens: &[String]) -> TextAnalytics {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in tokens.iter().enumerate() {
        let entry = counts.entry(token.as_str()).or_insert((0, position));
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .iter()
        .map(|(word, (count, first_seen))| (*word, *count, *first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    let top_words = ranked
        .iter()
        .take(TOP_WORDS_LIMIT)
        .map(|(word, count, _)| RankedWord {
            word: (*word).to_string(),
            count: *count,
        })
        .collect();

    let rarest_word = ranked
        .iter()
        .filter(|(_, count, _)| *count == 1)
        .min_by_key(|(_, _, first_seen)| *first_seen)
        .map(|(word, _, _)| (*word).to_string());

    let frequency_table = counts
        .into_iter()
        .map(|(word, (count, _))| (word.to_string(), count))
        .collect();

    TextAnalytics {
        word_count: tokens.len(),
        frequency_table,
        top_words,
        rarest_word,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    fn words(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn the_cat_sat_on_the_mat() {
        let analytics = analyze(&words("the cat sat on the mat"));

        assert_eq!(analytics.word_count, 6);
        let expected: Vec<(&str, usize)> =
            vec![("the", 2), ("cat", 1), ("sat", 1), ("on", 1), ("mat", 1)];
        let actual: Vec<(&str, usize)> = analytics
            .top_words
            .iter()
            .map(|r| (r.word.as_str(), r.count))
            .collect();
        assert_eq!(actual, expected);
        assert_eq!(analytics.rarest_word.as_deref(), Some("cat"));
    }

    #[test]
    fn empty_input_yields_empty_analytics() {
        let analytics = analyze(&[]);

        assert_eq!(analytics.word_count, 0);
        assert!(analytics.frequency_table.is_empty());
        assert!(analytics.top_words.is_empty());
        assert_eq!(analytics.rarest_word, None);
    }

    #[test]
    fn counts_sum_to_word_count() {
        let analytics = analyze(&words("a b a c b a d d d e"));
        let sum: usize = analytics.frequency_table.values().sum();
        assert_eq!(sum, analytics.word_count);
        assert_eq!(analytics.word_count, 10);
    }

    #[test]
    fn top_words_truncate_at_ten() {
        let analytics = analyze(&words("a b c d e f g h i j k l"));
        assert_eq!(analytics.top_words.len(), TOP_WORDS_LIMIT);
        // All counts equal, so order is first-occurrence order
        let actual: Vec<&str> = analytics.top_words.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(actual, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
    }

    #[test]
    fn top_words_shorter_than_ten_when_few_distinct() {
        let analytics = analyze(&words("x y x y x"));
        assert_eq!(analytics.top_words.len(), 2);
    }

    #[test]
    fn ties_break_by_first_occurrence() {
        let analytics = analyze(&words("beta alpha beta alpha gamma gamma"));
        let actual: Vec<&str> = analytics.top_words.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(actual, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn rarest_word_is_first_singleton_by_occurrence() {
        // "sat" and "mat" are both singletons; "sat" appears first
        let analytics = analyze(&words("the sat the mat"));
        assert_eq!(analytics.rarest_word.as_deref(), Some("sat"));
    }

    #[test]
    fn rarest_word_none_when_all_repeat() {
        let analytics = analyze(&words("aa bb aa bb"));
        assert_eq!(analytics.rarest_word, None);
    }
}
