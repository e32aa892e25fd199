//! Test fixtures mirroring the order backend's payloads.
//!
//! The JSON here has the same shape as `get_menu` and `get_<category>`
//! responses, so decoding is exercised the same way as in production.

use crate::core::menu::Menu;
use crate::core::option::OptionSchema;
use crate::core::Category;
use crate::rules::rules_for;

/// `GET /get_menu`.
pub const MENU_JSON: &str = r#"{
    "Hotdog": [
        {"Name": "Beef (100%)", "Price": "5.00"},
        {"Name": "Turkey", "Price": "4.50"}
    ],
    "Sandwich": [
        {"Name": "Ham", "Price": {"Regular": "6.00", "Large": "8.00"}}
    ],
    "EggSandwich": [
        {"Name": "Egg Sandwich", "Price": "4.00"}
    ],
    "Salad": [
        {"Name": "Chef Salad - Ham & Turkey", "Price": "7.50"},
        {"Name": "Garden Salad (veggies only)", "Price": "6.00"}
    ],
    "Side": [
        {"Name": "Chips", "Price": "1.25"},
        {"Name": "French Fries", "Price": {"Regular": "2.50", "Large": "3.50"}},
        {"Name": "Slaw", "Price": {"Regular": "1.50", "Large": "2.50"}}
    ],
    "Drink": [
        {"Name": "Coke", "Price": {"Regular": "1.75", "Large": "2.25"}},
        {"Name": "Bottled Soda", "Price": "2.00"}
    ],
    "Combo": [
        {"Name": "Combo", "Price": {"Regular": "4.25", "Upgrade to Large Drink": "4.75"}}
    ]
}"#;

pub const HOTDOG_JSON: &str = r#"{
    "Toppings": ["Mustard", "Ketchup", "Chili", "Onions", "Slaw"]
}"#;

pub const SANDWICH_JSON: &str = r#"{
    "Size": ["Regular", "Large"],
    "Bread": ["White", "Wheat", "Rye", "Croissant +$0.75"],
    "Bread Prep": ["Toasted", "Grilled", "Neither"],
    "Cheese": ["American", "Swiss"],
    "Toppings": ["Lettuce", "Tomato", "Mayo"],
    "Add Ons": [
        {"Add Ons": "Bacon", "Add Ons Price": {"Regular": "1.00", "Large": "1.50"}},
        {"Add Ons": "Extra Cheese", "Add Ons Price": {"Regular": "0.50", "Large": "0.75"}}
    ]
}"#;

pub const EGG_SANDWICH_JSON: &str = r#"{
    "Egg": ["Fried", "Scrambled"],
    "Bread": ["White", "Wheat", "Croissant +$0.75"],
    "Bread Prep": ["Toasted", "Grilled", "Neither"],
    "Meat": ["Bacon", "Sausage", "Ham"],
    "Cheese": ["American", "Swiss"],
    "Toppings": ["Lettuce", "Tomato"],
    "Add Ons": [
        {"Add Ons": "Extra Egg", "Add Ons Price": "1.00"}
    ]
}"#;

pub const SALAD_JSON: &str = r#"{
    "Toppings": ["Lettuce", "Bacon", "Tomato", "Eggs"],
    "Dressing": ["Ranch", "Italian"],
    "Add Ons": [
        {"Add Ons": "Meat", "Add Ons Price": "1.50"}
    ]
}"#;

pub const SIDE_JSON: &str = r#"{
    "Size": ["Regular", "Large"],
    "Chips": [
        "Lays Plain",
        "Lays BBQ",
        "Jalapeno Kettle Chips",
        "Sour Cream N' Onion Kettle Chips",
        "Salt N' Vinegar Kettle Chips",
        "Cookies"
    ]
}"#;

pub const DRINK_JSON: &str = r#"{
    "Size": ["Regular", "Large"]
}"#;

pub const COMBO_JSON: &str = r#"{
    "Side": ["Chips", "Slaw", "French Fries"],
    "Drink": ["Coke", "Sprite", "Homemade Sweet Tea"],
    "Bottled Soda": ["Coke Bottle", "Pepsi Bottle"]
}"#;

/// The fixture menu.
pub fn menu() -> Menu {
    serde_json::from_str(MENU_JSON).expect("fixture menu is valid")
}

/// Raw `get_<category>` payload for a category.
pub fn schema_json(category: Category) -> &'static str {
    match category {
        Category::Hotdog => HOTDOG_JSON,
        Category::Sandwich => SANDWICH_JSON,
        Category::EggSandwich => EGG_SANDWICH_JSON,
        Category::Salad => SALAD_JSON,
        Category::Side => SIDE_JSON,
        Category::Drink => DRINK_JSON,
        Category::Combo => COMBO_JSON,
    }
}

/// Decoded option schema as the backend sends it.
pub fn raw_schema(category: Category) -> OptionSchema {
    serde_json::from_str(schema_json(category)).expect("fixture schema is valid")
}

/// Schema after per-item preparation, as a customization session sees it.
pub fn prepared_schema(category: Category, item: &str) -> OptionSchema {
    rules_for(category).prepare_schema(item, raw_schema(category))
}
