// Sort orders for the result list
use crate::models::RepoSummary;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Leave the list as GitHub ranked it
    #[default]
    Relevance,
    Stars,
    Name,
    Owner,
    Created,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Relevance => SortKey::Stars,
            SortKey::Stars => SortKey::Name,
            SortKey::Name => SortKey::Owner,
            SortKey::Owner => SortKey::Created,
            SortKey::Created => SortKey::Relevance,
        }
    }

    /// Direction that reads naturally for this key
    pub fn default_direction(self) -> SortDirection {
        match self {
            SortKey::Stars | SortKey::Created => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Relevance => "relevance",
            SortKey::Stars => "stars",
            SortKey::Name => "name",
            SortKey::Owner => "owner",
            SortKey::Created => "created",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relevance" => Ok(SortKey::Relevance),
            "stars" => Ok(SortKey::Stars),
            "name" => Ok(SortKey::Name),
            "owner" => Ok(SortKey::Owner),
            "created" => Ok(SortKey::Created),
            other => Err(format!(
                "unknown sort key '{}' (expected relevance, stars, name, owner or created)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Key with its natural direction
    pub fn by(key: SortKey) -> Self {
        Self::new(key, key.default_direction())
    }

    pub fn cycle_key(self) -> Self {
        Self::by(self.key.next())
    }

    pub fn flip(self) -> Self {
        Self::new(self.key, self.direction.flip())
    }

    /// Stable in-place sort; `Relevance` keeps the current order
    pub fn apply(&self, repos: &mut [RepoSummary]) {
        let cmp: fn(&RepoSummary, &RepoSummary) -> Ordering = match self.key {
            SortKey::Relevance => return,
            SortKey::Stars => |a, b| a.stars.cmp(&b.stars),
            SortKey::Name => |a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Owner => |a, b| a.owner.to_lowercase().cmp(&b.owner.to_lowercase()),
            SortKey::Created => |a, b| a.timestamp.cmp(&b.timestamp),
        };

        match self.direction {
            SortDirection::Ascending => repos.sort_by(cmp),
            SortDirection::Descending => repos.sort_by(|a, b| cmp(b, a)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == SortKey::Relevance {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} {}", self.key, self.direction.arrow())
        }
    }
}
