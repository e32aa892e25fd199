//! The menu: items per category and their catalog prices.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::core::category::Category;
use crate::core::money::Money;
use crate::core::option::PriceSpec;

/// One orderable item, e.g. `{"Name": "Beef (100%)", "Price": "5.00"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: PriceSpec,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, price: PriceSpec) -> Self {
        MenuItem {
            name: name.into(),
            price,
        }
    }

    /// Catalog price for a size, or for "Regular" when the item is not sized.
    pub fn base_price(&self, size: Option<&str>) -> Money {
        match size {
            Some(size) if !size.is_empty() => self.price.for_size(size),
            _ => self.price.default_price(),
        }
    }
}

/// Items grouped by category, in menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    sections: BTreeMap<Category, Vec<MenuItem>>,
}

impl Menu {
    pub fn new() -> Self {
        Menu::default()
    }

    pub fn insert(&mut self, category: Category, item: MenuItem) {
        self.sections.entry(category).or_default().push(item);
    }

    pub fn items(&self, category: Category) -> &[MenuItem] {
        self.sections.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.sections.keys().copied()
    }

    pub fn find(&self, category: Category, name: &str) -> Option<&MenuItem> {
        self.items(category).iter().find(|item| item.name == name)
    }

    /// Every item with the given name (case-insensitive), across categories.
    pub fn lookup(&self, name: &str) -> Vec<(Category, &MenuItem)> {
        self.sections
            .iter()
            .flat_map(|(category, items)| items.iter().map(move |item| (*category, item)))
            .filter(|(_, item)| item.name.eq_ignore_ascii_case(name))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.values().all(Vec::is_empty)
    }
}

impl<'de> Deserialize<'de> for Menu {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<MenuItem>>::deserialize(deserializer)?;
        let mut menu = Menu::new();
        for (name, items) in raw {
            match name.parse::<Category>() {
                Ok(category) => menu.sections.entry(category).or_default().extend(items),
                Err(_) => tracing::warn!("ignoring unknown menu category `{}`", name),
            }
        }
        Ok(menu)
    }
}
