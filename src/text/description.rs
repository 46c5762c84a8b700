//! Description metrics: the stemmed word list and the raw word count of an issue body.

use super::normalizer::body_tokens;
use super::stopwords::is_stop_word;
use crate::core::Issue;
use porter_stemmer::stem;

/// Porter-stemmed content words of a body, in text order with duplicates kept
pub fn words_from_body(body: &str) -> Vec<String> {
    body_tokens(body)
        .into_iter()
        .filter(|word| !is_stop_word(word))
        .filter(|word| !word.chars().any(|c| c.is_ascii_digit()))
        .map(|word| stem(&word))
        .collect()
}

/// Number of tokens in a body, before stop-word removal or stemming
pub fn length_of_body(body: &str) -> usize {
    body_tokens(body).len()
}

pub fn description_words(issue: &Issue) -> Vec<String> {
    words_from_body(issue.body_text())
}

pub fn description_length(issue: &Issue) -> usize {
    length_of_body(issue.body_text())
}
