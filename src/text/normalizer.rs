//! Body text normalization.
//!
//! Turns a raw Markdown issue body into a stream of lowercase ASCII words with image
//! embeds, URLs, code and tables removed. The steps are order-sensitive:
//!
//! 1. `(` and `)` become `:` so embed URLs end on a delimiter the URL pattern knows
//! 2. GitHub-hosted image/video embeds are dropped
//! 3. remaining `http(s)://` URLs are dropped up to the next colon or whitespace
//! 4. the text is rendered as GitHub-flavoured Markdown
//! 5. newline runs collapse to a single space
//! 6. `<code>` and `<table>` elements are dropped with their content
//! 7. all other tags are dropped and space runs collapse
//! 8. runs of ASCII letters in the lowercased text become the tokens

use once_cell::sync::Lazy;
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;

static IMAGE_EMBED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\[a-z0-9\-_ ]+\]:https://user-images\.githubusercontent\.com/.*?(png|jpg|jpeg|gif|mp4|mov)",
    )
    .unwrap()
});
static BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://.*?(:|\s)").unwrap());
static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());
// The renderer tags fenced blocks with a language class, so attributes are allowed
static CODE_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<code(?:\s[^>]*)?>.*?</code>").unwrap());
static TABLE_ELEMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<table>.*?</table>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+").unwrap());

/// Steps 1-3: strip embeds and URLs from the raw Markdown
pub fn strip_links(body: &str) -> String {
    let text = body.replace(['(', ')'], ":");
    let text = IMAGE_EMBED.replace_all(&text, "");
    BARE_URL.replace_all(&text, "").into_owned()
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Step 4: render GitHub-flavoured Markdown to HTML.
///
/// On a render failure the input is passed through unrendered.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, markdown_options());
    let mut rendered = String::with_capacity(text.len() * 3 / 2);
    match html::write_html_fmt(&mut rendered, parser) {
        Ok(()) => rendered,
        Err(e) => {
            log::warn!("Unable to convert markdown to html: {}", e);
            text.to_string()
        }
    }
}

/// Steps 5-7: flatten rendered HTML to plain text
pub fn strip_html(rendered: &str) -> String {
    let text = NEWLINES.replace_all(rendered, " ");
    let text = CODE_ELEMENT.replace_all(&text, " ");
    let text = TABLE_ELEMENT.replace_all(&text, " ");
    let text = ANY_TAG.replace_all(&text, " ");
    SPACES.replace_all(&text, " ").into_owned()
}

/// Steps 1-7 applied to a raw body
pub fn normalize_body(body: &str) -> String {
    strip_html(&render_markdown(&strip_links(body)))
}

/// Step 8: maximal runs of lowercase ASCII letters after case folding
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Full pipeline from raw body to tokens
pub fn body_tokens(body: &str) -> Vec<String> {
    tokenize(&normalize_body(body))
}
