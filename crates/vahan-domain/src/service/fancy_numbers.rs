//! Fancy number generation
//!
//! Enumerates a range of four digit numbers, sorts each into a [`Category`]
//! and lists them fanciest first. Everything here is pure.

use serde::Serialize;
use vahan_types::RangeError;

use crate::model::{Category, Identifier, NumberRange};

/// Every identifier of a range, split by category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBuckets {
    buckets: [Vec<Identifier>; 6],
}

impl CategoryBuckets {
    pub fn get(&self, category: Category) -> &[Identifier] {
        &self.buckets[category.rank()]
    }

    /// Number of identifiers across all buckets, including `others`
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Buckets in ranking order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Identifier])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Concatenate buckets fanciest first. The `others` bucket is dropped
    /// entirely unless `include_others` is set.
    pub fn ordered(&self, include_others: bool) -> Vec<(Category, Identifier)> {
        self.iter()
            .filter(|(category, _)| include_others || category.is_fancy())
            .flat_map(|(category, ids)| ids.iter().map(move |id| (category, *id)))
            .collect()
    }

    fn push(&mut self, category: Category, identifier: Identifier) {
        self.buckets[category.rank()].push(identifier);
    }
}

/// A registration candidate together with how it was ranked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FancyCandidate {
    pub candidate: String,
    pub number: Identifier,
    pub category: Category,
}

/// Classify every identifier of `range`. Buckets keep ascending order.
pub fn classify_range(range: &NumberRange) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::default();
    for identifier in range.identifiers() {
        buckets.push(Category::classify(&identifier), identifier);
    }
    buckets
}

/// Same ordering as [`generate`], keeping the category of each candidate
pub fn generate_classified(
    prefix: &str,
    start: i64,
    end: i64,
    include_others: bool,
) -> Result<Vec<FancyCandidate>, RangeError> {
    let range = NumberRange::new(start, end)?;
    let candidates = classify_range(&range)
        .ordered(include_others)
        .into_iter()
        .map(|(category, number)| FancyCandidate {
            candidate: number.with_prefix(prefix),
            number,
            category,
        })
        .collect();
    Ok(candidates)
}

/// Registration candidates for `start..=end`, fanciest first.
///
/// Fails before doing any work when the range is reversed or leaves
/// `1..=9999`.
pub fn generate(
    prefix: &str,
    start: i64,
    end: i64,
    include_others: bool,
) -> Result<Vec<String>, RangeError> {
    Ok(generate_classified(prefix, start, end, include_others)?
        .into_iter()
        .map(|c| c.candidate)
        .collect())
}
