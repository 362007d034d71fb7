//! Digit pattern categories, ordered by how "fancy" a number looks

use serde::{Deserialize, Serialize};

use super::Identifier;

/// Pattern class of a four digit identifier.
///
/// Variant order is the ranking order: earlier variants are fancier and
/// also win when more than one pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// `AAAA`
    #[serde(rename = "4-same")]
    FourSame,
    /// `AAAB` or `BAAA`
    #[serde(rename = "3-same")]
    ThreeSame,
    /// `AABB`
    #[serde(rename = "2-pairs")]
    TwoPairs,
    /// `ABAB`
    #[serde(rename = "2-diff-pairs")]
    TwoDiffPairs,
    /// `ABBA`
    #[serde(rename = "palindrome")]
    Palindrome,
    #[serde(rename = "others")]
    Others,
}

type DigitPredicate = fn(&[u8; 4]) -> bool;

/// Evaluated top to bottom; the first hit decides the category.
const PRECEDENCE: [(Category, DigitPredicate); 5] = [
    (Category::FourSame, is_four_same),
    (Category::ThreeSame, is_three_same),
    (Category::TwoPairs, is_two_pairs),
    (Category::TwoDiffPairs, is_two_diff_pairs),
    (Category::Palindrome, is_palindrome),
];

fn is_four_same(d: &[u8; 4]) -> bool {
    d[0] == d[1] && d[1] == d[2] && d[2] == d[3]
}

// A run of three in four digits has to start at position 0 or 1.
fn is_three_same(d: &[u8; 4]) -> bool {
    (d[0] == d[1] && d[1] == d[2]) || (d[1] == d[2] && d[2] == d[3])
}

fn is_two_pairs(d: &[u8; 4]) -> bool {
    d[0] == d[1] && d[2] == d[3]
}

fn is_two_diff_pairs(d: &[u8; 4]) -> bool {
    d[0] == d[2] && d[1] == d[3]
}

fn is_palindrome(d: &[u8; 4]) -> bool {
    d[0] == d[3] && d[1] == d[2]
}

impl Category {
    /// All categories in ranking order
    pub const ALL: [Category; 6] = [
        Category::FourSame,
        Category::ThreeSame,
        Category::TwoPairs,
        Category::TwoDiffPairs,
        Category::Palindrome,
        Category::Others,
    ];

    pub fn classify(identifier: &Identifier) -> Category {
        let digits = identifier.digits();
        PRECEDENCE
            .iter()
            .find(|(_, matches)| matches(digits))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Others)
    }

    /// Position in the ranking, 0 being the fanciest
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::FourSame => "4-same",
            Category::ThreeSame => "3-same",
            Category::TwoPairs => "2-pairs",
            Category::TwoDiffPairs => "2-diff-pairs",
            Category::Palindrome => "palindrome",
            Category::Others => "others",
        }
    }

    pub fn is_fancy(&self) -> bool {
        *self != Category::Others
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}
