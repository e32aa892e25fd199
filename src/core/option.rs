//! Customization option schemas.
//!
//! The backend describes the options of a category as a loosely shaped JSON
//! object: each field maps either to a list of plain strings or to a list of
//! priced objects such as `{"Add Ons": "Bacon", "Add Ons Price": {"Regular":
//! 1.0, "Large": 1.5}}`. Everything is decoded here, once, into typed values
//! so the ordering rules never look at raw JSON.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use crate::core::money::Money;
use crate::core::vocab::{self, value};

/// A price that is either flat or depends on the selected size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceSpec {
    Flat(Money),
    BySize(BTreeMap<String, Money>),
}

impl PriceSpec {
    /// Decode a price from JSON. Unusable shapes degrade to a zero flat price.
    pub fn from_json(raw: &Value) -> Self {
        match raw {
            Value::Number(n) => PriceSpec::Flat(Money::from_dollars(n.as_f64().unwrap_or(0.0))),
            Value::String(s) => PriceSpec::Flat(Money::parse_lenient(s)),
            Value::Object(map) => PriceSpec::BySize(
                map.iter()
                    .map(|(size, price)| {
                        let amount = match PriceSpec::from_json(price) {
                            PriceSpec::Flat(amount) => amount,
                            PriceSpec::BySize(_) => Money::ZERO,
                        };
                        (size.clone(), amount)
                    })
                    .collect(),
            ),
            other => {
                tracing::warn!("unexpected price shape `{}`, treating as 0.00", other);
                PriceSpec::Flat(Money::ZERO)
            }
        }
    }

    /// The price for a size. Size-keyed prices without an entry cost nothing.
    pub fn for_size(&self, size: &str) -> Money {
        match self {
            PriceSpec::Flat(amount) => *amount,
            PriceSpec::BySize(table) => table.get(size).copied().unwrap_or(Money::ZERO),
        }
    }

    /// The price when no size has been chosen.
    pub fn default_price(&self) -> Money {
        self.for_size(value::REGULAR)
    }

    pub fn sizes(&self) -> Vec<&str> {
        match self {
            PriceSpec::Flat(_) => Vec::new(),
            PriceSpec::BySize(table) => table.keys().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for PriceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSpec::Flat(amount) => write!(f, "{}", amount),
            PriceSpec::BySize(table) => {
                let parts: Vec<String> = table
                    .iter()
                    .map(|(size, amount)| format!("{} {}", size, amount))
                    .collect();
                write!(f, "{}", parts.join(" / "))
            }
        }
    }
}

impl<'de> Deserialize<'de> for PriceSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(PriceSpec::from_json(&raw))
    }
}

/// One allowed value of an option field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Plain(String),
    Priced { name: String, price: PriceSpec },
}

impl OptionValue {
    pub fn plain(name: impl Into<String>) -> Self {
        OptionValue::Plain(name.into())
    }

    pub fn priced(name: impl Into<String>, price: PriceSpec) -> Self {
        OptionValue::Priced {
            name: name.into(),
            price,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OptionValue::Plain(name) => name,
            OptionValue::Priced { name, .. } => name,
        }
    }

    pub fn price(&self) -> Option<&PriceSpec> {
        match self {
            OptionValue::Plain(_) => None,
            OptionValue::Priced { price, .. } => Some(price),
        }
    }

    /// Decode one entry of a field's value list.
    fn from_json(key: &str, raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) => Some(OptionValue::Plain(s.clone())),
            Value::Number(n) => Some(OptionValue::Plain(n.to_string())),
            Value::Object(map) => {
                let price_key = format!("{} Price", key);
                let name = map
                    .get(key)
                    .and_then(Value::as_str)
                    .or_else(|| {
                        map.iter()
                            .find(|(k, v)| !k.ends_with("Price") && v.is_string())
                            .and_then(|(_, v)| v.as_str())
                    })?
                    .to_string();
                let price = map
                    .get(&price_key)
                    .or_else(|| {
                        map.iter()
                            .find(|(k, _)| k.ends_with("Price"))
                            .map(|(_, v)| v)
                    })
                    .map(PriceSpec::from_json);

                Some(match price {
                    Some(price) => OptionValue::Priced { name, price },
                    None => OptionValue::Plain(name),
                })
            }
            _ => None,
        }
    }
}

/// Whether a field takes one value or a set of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Multi,
}

/// A named customization axis and its allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionField {
    pub key: String,
    pub cardinality: Cardinality,
    pub values: Vec<OptionValue>,
}

impl OptionField {
    /// Create a field, inferring cardinality from the key.
    pub fn new(key: impl Into<String>, values: Vec<OptionValue>) -> Self {
        let key = key.into();
        let cardinality = if vocab::is_multi_select(&key) {
            Cardinality::Multi
        } else {
            Cardinality::Single
        };
        OptionField {
            key,
            cardinality,
            values,
        }
    }

    /// Create a field of plain values.
    pub fn plain(key: impl Into<String>, names: &[&str]) -> Self {
        OptionField::new(key, names.iter().map(|n| OptionValue::plain(*n)).collect())
    }

    pub fn is_multi(&self) -> bool {
        self.cardinality == Cardinality::Multi
    }

    pub fn value(&self, name: &str) -> Option<&OptionValue> {
        self.values.iter().find(|v| v.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.value(name).is_some()
    }

    /// Position of a value in the domain, used to keep multi-selections ordered.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.values.iter().position(|v| v.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(OptionValue::name)
    }
}

/// The ordered set of option fields for one category or item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSchema {
    fields: Vec<OptionField>,
}

impl OptionSchema {
    pub fn new(fields: Vec<OptionField>) -> Self {
        OptionSchema { fields }
    }

    /// Decode a schema from a parsed JSON object.
    pub fn from_json(raw: &Value) -> Self {
        let mut schema = OptionSchema::default();
        if let Value::Object(map) = raw {
            for (key, values) in map {
                schema.push(decode_field(key, values));
            }
        }
        schema
    }

    pub fn fields(&self) -> &[OptionField] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut OptionField> {
        self.fields.iter_mut().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    /// Append a field, replacing any existing field with the same key.
    pub fn push(&mut self, field: OptionField) {
        match self.get_mut(&field.key) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn retain(&mut self, keep: impl FnMut(&OptionField) -> bool) {
        self.fields.retain(keep);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

fn decode_field(key: &str, raw: &Value) -> OptionField {
    let values = match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let decoded = OptionValue::from_json(key, item);
                if decoded.is_none() {
                    tracing::warn!("skipping undecodable value `{}` in option `{}`", item, key);
                }
                decoded
            })
            .collect(),
        other => {
            tracing::warn!("option `{}` is not a list (got `{}`), leaving it empty", key, other);
            Vec::new()
        }
    };
    OptionField::new(key, values)
}

// serde_json's Map is sorted unless `preserve_order` is on, so the schema
// walks the object itself to keep the field order the backend sent.
impl<'de> Deserialize<'de> for OptionSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = OptionSchema;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of option fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OptionSchema, A::Error> {
                let mut schema = OptionSchema::default();
                while let Some((key, values)) = access.next_entry::<String, Value>()? {
                    schema.push(decode_field(&key, &values));
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Price decoding
    // =========================================================================

    #[test]
    fn test_price_spec_flat_and_sized() {
        assert_eq!(
            PriceSpec::from_json(&json!("1.25")),
            PriceSpec::Flat(Money::from_cents(125))
        );
        assert_eq!(
            PriceSpec::from_json(&json!(0.5)),
            PriceSpec::Flat(Money::from_cents(50))
        );

        let sized = PriceSpec::from_json(&json!({"Regular": "1.00", "Large": 1.5}));
        assert_eq!(sized.for_size("Large"), Money::from_cents(150));
        assert_eq!(sized.default_price(), Money::from_cents(100));
        assert_eq!(sized.for_size("Bottle"), Money::ZERO);
    }

    #[test]
    fn test_price_spec_garbage_is_zero() {
        assert_eq!(PriceSpec::from_json(&json!(null)), PriceSpec::Flat(Money::ZERO));
        assert_eq!(PriceSpec::from_json(&json!("n/a")), PriceSpec::Flat(Money::ZERO));
    }

    // =========================================================================
    // Schema decoding
    // =========================================================================

    #[test]
    fn test_schema_preserves_field_order() {
        let raw = r#"{"Size": ["Regular", "Large"], "Bread": ["White", "Rye"], "Bread Prep": ["Toasted"]}"#;
        let schema: OptionSchema = serde_json::from_str(raw).unwrap();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, vec!["Size", "Bread", "Bread Prep"]);
    }

    #[test]
    fn test_schema_decodes_priced_values() {
        let raw = r#"{
            "Toppings": ["Lettuce", "Tomato"],
            "Add Ons": [
                {"Add Ons": "Bacon", "Add Ons Price": {"Regular": 1.0, "Large": 1.5}},
                {"Add Ons": "Cheese", "Add Ons Price": 0.75}
            ]
        }"#;
        let schema: OptionSchema = serde_json::from_str(raw).unwrap();

        let toppings = schema.get("Toppings").unwrap();
        assert!(toppings.is_multi());
        assert_eq!(toppings.values[0], OptionValue::plain("Lettuce"));

        let add_ons = schema.get("Add Ons").unwrap();
        let bacon = add_ons.value("Bacon").unwrap();
        assert_eq!(bacon.price().unwrap().for_size("Large"), Money::from_cents(150));
        let cheese = add_ons.value("Cheese").unwrap();
        assert_eq!(cheese.price().unwrap().for_size("Large"), Money::from_cents(75));
    }

    #[test]
    fn test_schema_skips_undecodable_entries() {
        let raw = json!({"Cheese": ["American", null, ["nested"]], "Broken": "not a list"});
        let schema = OptionSchema::from_json(&raw);
        assert_eq!(schema.get("Cheese").unwrap().values.len(), 1);
        assert!(schema.get("Broken").unwrap().values.is_empty());
    }

    #[test]
    fn test_push_replaces_existing_field() {
        let mut schema = OptionSchema::new(vec![OptionField::plain("Size", &["Regular"])]);
        schema.push(OptionField::plain("Size", &["Regular", "Large"]));
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("Size").unwrap().values.len(), 2);
    }

    #[test]
    fn test_field_position() {
        let field = OptionField::plain("Toppings", &["Mustard", "Ketchup", "Onions"]);
        assert_eq!(field.position("Onions"), Some(2));
        assert_eq!(field.position("Relish"), None);
        assert!(field.is_multi());
    }
}
