//! Emotion / polarity categories and the per-document count vector.
//!
//! The category set is the closed NRC word-emotion association set: eight
//! basic emotions plus the two polarity tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// One NRC category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionCategory {
    Anger,
    Anticipation,
    Disgust,
    Fear,
    Joy,
    Sadness,
    Surprise,
    Trust,
    Positive,
    Negative,
}

impl EmotionCategory {
    /// All categories in canonical column order.
    pub const ALL: [EmotionCategory; 10] = [
        EmotionCategory::Anger,
        EmotionCategory::Anticipation,
        EmotionCategory::Disgust,
        EmotionCategory::Fear,
        EmotionCategory::Joy,
        EmotionCategory::Sadness,
        EmotionCategory::Surprise,
        EmotionCategory::Trust,
        EmotionCategory::Positive,
        EmotionCategory::Negative,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Position of this category in [`EmotionCategory::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmotionCategory::Anger => "anger",
            EmotionCategory::Anticipation => "anticipation",
            EmotionCategory::Disgust => "disgust",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Joy => "joy",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Surprise => "surprise",
            EmotionCategory::Trust => "trust",
            EmotionCategory::Positive => "positive",
            EmotionCategory::Negative => "negative",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion category: '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for EmotionCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        EmotionCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == tag)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// Set of categories attached to one lexicon token (bitset over `ALL`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CategorySet(u16);

impl CategorySet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, category: EmotionCategory) {
        self.0 |= 1 << category.index();
    }

    pub fn contains(&self, category: EmotionCategory) -> bool {
        self.0 & (1 << category.index()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = EmotionCategory> + '_ {
        EmotionCategory::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }
}

impl FromIterator<EmotionCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = EmotionCategory>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// Token count vector: non-negative count per category.
///
/// Summation is element-wise, so it is associative and commutative; the
/// aggregator relies on this to combine partial results in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryCounts([u64; EmotionCategory::COUNT]);

impl CategoryCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: EmotionCategory) -> u64 {
        self.0[category.index()]
    }

    pub fn increment(&mut self, category: EmotionCategory) {
        self.0[category.index()] += 1;
    }

    /// Increment every category in `set` by one.
    pub fn record(&mut self, set: CategorySet) {
        for c in set.iter() {
            self.increment(c);
        }
    }

    pub fn positive(&self) -> u64 {
        self.get(EmotionCategory::Positive)
    }

    pub fn negative(&self) -> u64 {
        self.get(EmotionCategory::Negative)
    }

    /// positive − negative.
    pub fn composite_index(&self) -> i64 {
        self.positive() as i64 - self.negative() as i64
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmotionCategory, u64)> + '_ {
        EmotionCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl FromIterator<(EmotionCategory, u64)> for CategoryCounts {
    fn from_iter<I: IntoIterator<Item = (EmotionCategory, u64)>>(iter: I) -> Self {
        let mut counts = CategoryCounts::new();
        for (c, n) in iter {
            counts.0[c.index()] += n;
        }
        counts
    }
}

impl AddAssign<&CategoryCounts> for CategoryCounts {
    fn add_assign(&mut self, rhs: &CategoryCounts) {
        for (lhs, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *lhs += r;
        }
    }
}

impl Add for CategoryCounts {
    type Output = CategoryCounts;

    fn add(mut self, rhs: CategoryCounts) -> CategoryCounts {
        self += &rhs;
        self
    }
}
