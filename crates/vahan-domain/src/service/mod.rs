//! Domain services

pub mod fancy_numbers;

pub use fancy_numbers::{
    classify_range, generate, generate_classified, CategoryBuckets, FancyCandidate,
};
