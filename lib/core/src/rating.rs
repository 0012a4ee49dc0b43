//! Rating normalization
//!
//! Source pages describe a rating with one of five qualitative labels. Only
//! those labels produce a [`Rating`]; everything else means the reader did not
//! rate the item and the review must be dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// The five recognized labels, indexed by `rating - 1`.
const LABELS: [&str; 5] = [
    "did not like it",
    "it was ok",
    "liked it",
    "really liked it",
    "it was amazing",
];

/// A star rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Build a rating from a star count, `None` outside `1..=5`.
    #[inline]
    #[must_use]
    pub fn new(stars: u8) -> Option<Self> {
        (MIN_RATING..=MAX_RATING).contains(&stars).then_some(Self(stars))
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The label this rating is normalized from.
    #[must_use]
    pub fn label(self) -> &'static str {
        LABELS[usize::from(self.0 - 1)]
    }

    /// Absolute distance between two ratings, in `0..=4`.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Rating) -> u8 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("rating {} outside {}..={}", value, MIN_RATING, MAX_RATING))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_RATING)
    }
}

/// Map a qualitative rating label to a [`Rating`].
///
/// Matching is exact. Unknown labels, including the empty string, yield `None`.
pub fn normalize(label: &str) -> Option<Rating> {
    LABELS
        .iter()
        .position(|known| *known == label)
        .and_then(|idx| Rating::new(idx as u8 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(normalize("did not like it").map(Rating::value), Some(1));
        assert_eq!(normalize("it was ok").map(Rating::value), Some(2));
        assert_eq!(normalize("liked it").map(Rating::value), Some(3));
        assert_eq!(normalize("really liked it").map(Rating::value), Some(4));
        assert_eq!(normalize("it was amazing").map(Rating::value), Some(5));
    }

    #[test]
    fn test_unknown_labels_absent() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("Liked it"), None);
        assert_eq!(normalize(" liked it"), None);
        assert_eq!(normalize("0"), None);
        assert_eq!(normalize("it was amazing!"), None);
    }

    #[test]
    fn test_label_roundtrip() {
        for stars in MIN_RATING..=MAX_RATING {
            let rating = Rating::new(stars).unwrap();
            assert_eq!(normalize(rating.label()), Some(rating));
        }
    }

    #[test]
    fn test_out_of_range() {
        assert!(Rating::new(0).is_none());
        assert!(Rating::new(6).is_none());
        assert!(serde_json::from_str::<Rating>("0").is_err());
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap().value(), 4);
    }

    #[test]
    fn test_distance() {
        let one = Rating::new(1).unwrap();
        let five = Rating::new(5).unwrap();
        assert_eq!(one.distance(five), 4);
        assert_eq!(five.distance(one), 4);
        assert_eq!(five.distance(five), 0);
        assert_eq!(five.to_string(), "5/5");
    }
}
