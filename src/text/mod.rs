//! Issue body text processing.

pub mod description;
pub mod normalizer;
pub mod stopwords;

pub use description::{description_length, description_words, length_of_body, words_from_body};
pub use normalizer::{body_tokens, normalize_body, tokenize};
pub use stopwords::is_stop_word;
