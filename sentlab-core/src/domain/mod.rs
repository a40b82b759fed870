//! Domain types for SentLab

pub mod category;
pub mod document;
pub mod price;
pub mod row;
pub mod sentiment;

pub use category::{CategoryCounts, CategorySet, EmotionCategory, UnknownCategory};
pub use document::{DocumentRecord, ScoredDocument};
pub use price::{FundamentalRelease, Fundamentals, PriceRecord, ReturnRecord};
pub use row::ModelingRow;
pub use sentiment::DailySentiment;
