pub mod frequency;
pub mod tokenize;

pub use frequency::{analyze, TextAnalytics, TOP_WORDS_LIMIT};
pub use tokenize::{normalize, tokenize};
