//! Lexicon-based sentiment scorer.
//!
//! Exact-match lookup only: no stemming, no fuzzy matching. A token tagged
//! with several categories increments every one of them (multi-label
//! counting), and tokens missing from the lexicon are skipped.

use crate::domain::{CategoryCounts, DocumentRecord, ScoredDocument};
use crate::lexicon::Lexicon;
use crate::text::Normalizer;

/// Count categories over an already-normalized token sequence.
pub fn score_tokens<I, S>(tokens: I, lexicon: &Lexicon) -> CategoryCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = CategoryCounts::new();
    for token in tokens {
        if let Some(categories) = lexicon.lookup(token.as_ref()) {
            counts.record(categories);
        }
    }
    counts
}

/// Normalizer + lexicon pair, both injected by the caller.
#[derive(Debug, Clone, Copy)]
pub struct SentimentScorer<'a> {
    lexicon: &'a Lexicon,
    normalizer: &'a Normalizer,
}

impl<'a> SentimentScorer<'a> {
    pub fn new(lexicon: &'a Lexicon, normalizer: &'a Normalizer) -> Self {
        Self {
            lexicon,
            normalizer,
        }
    }

    pub fn score_text(&self, raw_text: &str) -> CategoryCounts {
        score_tokens(self.normalizer.normalize(raw_text).tokens(), self.lexicon)
    }

    pub fn score_document(&self, document: &DocumentRecord) -> ScoredDocument {
        ScoredDocument {
            trading_day: document.trading_day,
            counts: self.score_text(&document.raw_text),
        }
    }
}
