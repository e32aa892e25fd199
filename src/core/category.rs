//! Menu categories.
//!
//! The category of an item decides which option fields apply to it and
//! which rule set validates, prices and normalizes its selections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of menu categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Hotdog,
    Sandwich,
    EggSandwich,
    Salad,
    Side,
    Drink,
    Combo,
}

impl Category {
    /// All categories in menu order.
    pub const ALL: [Category; 7] = [
        Category::Hotdog,
        Category::Sandwich,
        Category::EggSandwich,
        Category::Salad,
        Category::Side,
        Category::Drink,
        Category::Combo,
    ];

    /// Name used on the wire and in menu payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotdog => "Hotdog",
            Category::Sandwich => "Sandwich",
            Category::EggSandwich => "EggSandwich",
            Category::Salad => "Salad",
            Category::Side => "Side",
            Category::Drink => "Drink",
            Category::Combo => "Combo",
        }
    }

    /// Path segment of the customization endpoint (`get_<slug>`).
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// Whether lines of this category take longer to prepare.
    pub fn is_made_to_order(&self) -> bool {
        matches!(self, Category::Sandwich | Category::EggSandwich)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}` (expected one of: Hotdog, Sandwich, EggSandwich, Salad, Side, Drink, Combo)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        Category::ALL
            .into_iter()
            .find(|c| c.slug() == folded)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
