//! Language identification for issue bodies.

use whatlang::Lang;

/// Ranks the languages a text may be written in; only the top guess is consumed
pub trait LanguageIdentifier: Send + Sync {
    /// Most probable language, or `None` when the text carries no usable signal
    fn top_language(&self, text: &str) -> Option<Lang>;
}

/// Trigram-based identifier backed by the model compiled into `whatlang`
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangIdentifier;

impl LanguageIdentifier for WhatlangIdentifier {
    fn top_language(&self, text: &str) -> Option<Lang> {
        whatlang::detect_lang(text)
    }
}

/// Identifier that always answers the same language, for tests and pre-labelled corpora
#[derive(Debug, Clone, Copy)]
pub struct FixedLanguage(pub Option<Lang>);

impl LanguageIdentifier for FixedLanguage {
    fn top_language(&self, _text: &str) -> Option<Lang> {
        self.0
    }
}

/// Flatten line breaks so the identifier sees a single line
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
