//! Normalized order lines.
//!
//! An `OrderLine` is what the kitchen receives for one cart row: a quantity,
//! optional special instructions, the category-specific details and an
//! extension bag for option fields this client does not know about yet.
//! On the wire everything is flattened into one JSON object, e.g.
//! `{"quantity": 2, "dog_type": "Beef (100%)", "toppings": ["Mustard"]}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::category::Category;

/// Maximum length of special instructions, in characters.
pub const MAX_INSTRUCTIONS_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("order line must be a JSON object")]
    NotAnObject,

    #[error("order line is missing a valid `quantity`")]
    MissingQuantity,

    #[error("invalid {category} line: {source}")]
    Details {
        category: Category,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotdogLine {
    pub dog_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toppings: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandwichLine {
    pub meat: String,
    pub size: String,
    pub bread: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toasted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grilled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheese: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toppings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggSandwichLine {
    pub bread: String,
    pub egg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toasted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grilled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheese: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toppings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaladLine {
    pub choice: String,
    pub toppings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dressing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_ons: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideLine {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chips_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkLine {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboDrink {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboLine {
    pub side: SideLine,
    pub drink: ComboDrink,
}

/// Category-specific part of an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LineDetails {
    Hotdog(HotdogLine),
    Sandwich(SandwichLine),
    EggSandwich(EggSandwichLine),
    Salad(SaladLine),
    Side(SideLine),
    Drink(DrinkLine),
    Combo(ComboLine),
}

impl LineDetails {
    pub fn category(&self) -> Category {
        match self {
            LineDetails::Hotdog(_) => Category::Hotdog,
            LineDetails::Sandwich(_) => Category::Sandwich,
            LineDetails::EggSandwich(_) => Category::EggSandwich,
            LineDetails::Salad(_) => Category::Salad,
            LineDetails::Side(_) => Category::Side,
            LineDetails::Drink(_) => Category::Drink,
            LineDetails::Combo(_) => Category::Combo,
        }
    }

    /// Decode details for a known category. Unrelated keys are ignored.
    pub fn from_json(category: Category, raw: Value) -> Result<Self, serde_json::Error> {
        Ok(match category {
            Category::Hotdog => LineDetails::Hotdog(serde_json::from_value(raw)?),
            Category::Sandwich => LineDetails::Sandwich(serde_json::from_value(raw)?),
            Category::EggSandwich => LineDetails::EggSandwich(serde_json::from_value(raw)?),
            Category::Salad => LineDetails::Salad(serde_json::from_value(raw)?),
            Category::Side => LineDetails::Side(serde_json::from_value(raw)?),
            Category::Drink => LineDetails::Drink(serde_json::from_value(raw)?),
            Category::Combo => LineDetails::Combo(serde_json::from_value(raw)?),
        })
    }

    /// Short human name for receipts and status lines.
    pub fn display_name(&self) -> String {
        match self {
            LineDetails::Hotdog(line) => line.dog_type.clone(),
            LineDetails::Sandwich(line) => line.meat.clone(),
            LineDetails::EggSandwich(line) => {
                format!("{} Sandwich", line.meat.as_deref().unwrap_or("Egg"))
            }
            LineDetails::Salad(line) => line.choice.clone(),
            LineDetails::Side(line) => line.name.clone(),
            LineDetails::Drink(line) => line.name.clone(),
            LineDetails::Combo(_) => "Combo".to_string(),
        }
    }
}

/// A forward-compatible option value carried on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extension {
    Text(String),
    List(Vec<String>),
    Other(Value),
}

/// A normalized, category-specific order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(flatten)]
    pub details: LineDetails,
    /// Option fields with no typed home, keyed by slug.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Extension>,
}

impl OrderLine {
    pub fn new(details: LineDetails) -> Self {
        OrderLine {
            quantity: 1,
            special_instructions: None,
            details,
            extensions: BTreeMap::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    /// Attach instructions: trimmed, capped, and dropped when blank.
    pub fn with_instructions(mut self, text: &str) -> Self {
        self.special_instructions = clean_instructions(text);
        self
    }

    pub fn category(&self) -> Category {
        self.details.category()
    }

    pub fn display_name(&self) -> String {
        self.details.display_name()
    }

    /// The flattened wire representation.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Decode a flattened line for a known category.
    ///
    /// Keys that are not part of the category's typed record land in the
    /// extension bag, so a line written by a newer client survives a
    /// round-trip through this one.
    pub fn from_json(category: Category, raw: Value) -> Result<Self, LineError> {
        let Value::Object(mut map) = raw else {
            return Err(LineError::NotAnObject);
        };

        let quantity = map
            .remove("quantity")
            .and_then(|q| q.as_u64())
            .filter(|q| *q >= 1)
            .and_then(|q| u32::try_from(q).ok())
            .ok_or(LineError::MissingQuantity)?;

        let special_instructions = map
            .remove("special_instructions")
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.is_empty());

        let details = LineDetails::from_json(category, Value::Object(map.clone()))
            .map_err(|source| LineError::Details { category, source })?;

        let known: Map<String, Value> = match serde_json::to_value(&details) {
            Ok(Value::Object(known)) => known,
            _ => Map::new(),
        };
        let extensions = map
            .into_iter()
            .filter(|(key, _)| !known.contains_key(key))
            .filter_map(|(key, value)| {
                serde_json::from_value::<Extension>(value)
                    .ok()
                    .map(|ext| (key, ext))
            })
            .collect();

        Ok(OrderLine {
            quantity,
            special_instructions,
            details,
            extensions,
        })
    }
}

/// Trim instructions and cap them at [`MAX_INSTRUCTIONS_LEN`] characters.
pub fn clean_instructions(text: &str) -> Option<String> {
    let capped: String = text.chars().take(MAX_INSTRUCTIONS_LEN).collect();
    let trimmed = capped.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
