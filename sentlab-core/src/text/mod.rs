//! Text normalization

pub mod normalize;
pub mod stopwords;

pub use normalize::{NormalizedText, Normalizer, Tokens};
