//! Text normalizer: raw social text → normalized tokens.
//!
//! Rules, in order:
//! 1. strip URLs and `@mentions`
//! 2. lowercase
//! 3. strip punctuation (anything that is neither alphanumeric nor whitespace)
//! 4. split on whitespace
//! 5. drop stopwords
//! 6. drop tokens shorter than the minimum length (in chars)

use super::stopwords;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").unwrap());
static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());

/// Configurable normalizer. Cheap to share by reference across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: HashSet<String>,
    min_token_len: usize,
}

impl Normalizer {
    pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

    /// English stopwords, minimum token length 2.
    pub fn new() -> Self {
        Self::without_stopwords().with_extra_stopwords(stopwords::ENGLISH.iter().copied())
    }

    /// No stopword filtering at all.
    pub fn without_stopwords() -> Self {
        Self {
            stopwords: HashSet::new(),
            min_token_len: Self::DEFAULT_MIN_TOKEN_LEN,
        }
    }

    pub fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    /// Add stopwords. Entries go through the same lowercase / punctuation
    /// rules as text, so "Don't" and "dont" are equivalent.
    pub fn with_extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let cleaned = strip_punctuation(&word.as_ref().to_lowercase());
            let cleaned = cleaned.trim();
            if !cleaned.is_empty() {
                self.stopwords.insert(cleaned.to_string());
            }
        }
        self
    }

    pub fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Apply rules 1–3 once; tokens are produced lazily from the result.
    pub fn normalize(&self, raw: &str) -> NormalizedText<'_> {
        let without_urls = URL_REGEX.replace_all(raw, " ");
        let without_mentions = MENTION_REGEX.replace_all(&without_urls, " ");
        let cleaned = strip_punctuation(&without_mentions.to_lowercase());
        NormalizedText {
            cleaned,
            normalizer: self,
        }
    }

    /// Eager convenience wrapper around [`Normalizer::normalize`].
    pub fn tokenize(&self, raw: &str) -> Vec<String> {
        self.normalize(raw).tokens().map(str::to_string).collect()
    }

    fn keep(&self, token: &str) -> bool {
        token.chars().count() >= self.min_token_len && !self.is_stopword(token)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Cleaned text of one document. Calling [`NormalizedText::tokens`] again
/// restarts the sequence from the beginning.
#[derive(Debug, Clone)]
pub struct NormalizedText<'n> {
    cleaned: String,
    normalizer: &'n Normalizer,
}

impl NormalizedText<'_> {
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens {
            words: self.cleaned.split_whitespace(),
            normalizer: self.normalizer,
        }
    }

    /// Text after URL/mention removal, lowercasing and punctuation stripping.
    pub fn as_str(&self) -> &str {
        &self.cleaned
    }

    pub fn is_empty(&self) -> bool {
        self.tokens().next().is_none()
    }
}

/// Lazy token iterator over a [`NormalizedText`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    words: std::str::SplitWhitespace<'a>,
    normalizer: &'a Normalizer,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let normalizer = self.normalizer;
        self.words.by_ref().find(|w| normalizer.keep(w))
    }
}
