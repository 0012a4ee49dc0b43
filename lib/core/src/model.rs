use crate::rating::Rating;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical, site-assigned reviewer identity. Never a profile URL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewerId(String);

/// Canonical item identity (canonical URL or numeric site ID).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

macro_rules! identity {
    ($name:ident) => {
        impl $name {
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<u64> for $name {
            fn from(i: u64) -> Self {
                Self(i.to_string())
            }
        }
    };
}

identity!(ReviewerId);
identity!(ItemId);

/// Key into the visited registry. Reviewers and items live in separate
/// namespaces, so equal raw ids never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NodeKey {
    Reviewer(ReviewerId),
    Item(ItemId),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Reviewer(id) => write!(f, "reviewer:{}", id),
            NodeKey::Item(id) => write!(f, "item:{}", id),
        }
    }
}

/// A rated work. Only constructible through [`Item::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    title: String,
    total_ratings: u64,
}

impl Item {
    /// Validate and build an item.
    ///
    /// Whitespace runs inside the title collapse to a single space. An empty
    /// identity, an empty title or a negative rating count is rejected.
    pub fn new(id: ItemId, title: &str, total_ratings: i64) -> Result<Self> {
        if id.as_str().trim().is_empty() {
            return Err(Error::Validation("item identity is empty".to_string()));
        }
        let title = collapse_whitespace(title);
        if title.is_empty() {
            return Err(Error::Validation(format!("item {} has an empty title", id)));
        }
        let total_ratings = u64::try_from(total_ratings).map_err(|_| {
            Error::Validation(format!(
                "item {} has a negative rating count ({})",
                id, total_ratings
            ))
        })?;

        Ok(Self {
            id,
            title,
            total_ratings,
        })
    }

    #[inline]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn total_ratings(&self) -> u64 {
        self.total_ratings
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} total ratings | {}", self.title, self.total_ratings, self.id)
    }
}

/// One reviewer's rating of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub item: Item,
    pub rating: Rating,
}

impl Review {
    #[inline]
    #[must_use]
    pub fn new(item: Item, rating: Rating) -> Self {
        Self { item, rating }
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rating, self.item)
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
