//! Option vocabulary shared with the order backend.
//!
//! Field keys and the handful of literal values that the ordering rules
//! key off. Everything else (item names, topping lists) comes from the
//! backend at runtime.

/// Option field keys as they appear in customization schemas.
pub mod field {
    pub const SIZE: &str = "Size";
    pub const BREAD: &str = "Bread";
    pub const BREAD_PREP: &str = "Bread Prep";
    pub const EGG: &str = "Egg";
    pub const MEAT: &str = "Meat";
    pub const CHEESE: &str = "Cheese";
    pub const TOPPINGS: &str = "Toppings";
    pub const ADD_ONS: &str = "Add Ons";
    pub const DRESSING: &str = "Dressing";
    pub const CHIPS: &str = "Chips";
    pub const SIDE: &str = "Side";
    pub const DRINK: &str = "Drink";
    pub const BOTTLED_SODA: &str = "Bottled Soda";

    /// Companion of `Drink` in a combo.
    pub const DRINK_SIZE: &str = "Drink Size";
    /// Companion of `Side` when the side is chips.
    pub const CHIP_TYPE: &str = "Chip Type";

    /// Fields that accept several values at once.
    pub const MULTI_SELECT: [&str; 2] = [TOPPINGS, ADD_ONS];

    /// Fields that can never be left empty.
    pub const ALWAYS_REQUIRED: [&str; 4] = [SIZE, BREAD, BREAD_PREP, EGG];
}

/// Literal option values with rules attached.
pub mod value {
    pub const REGULAR: &str = "Regular";
    pub const LARGE: &str = "Large";
    pub const BOTTLE: &str = "Bottle";

    /// The side item (and combo side) that is chosen by chip flavour.
    pub const CHIPS: &str = "Chips";
    /// The drink item that has no fountain size.
    pub const BOTTLED_SODA: &str = "Bottled Soda";
    pub const LAYS_PLAIN: &str = "Lays Plain";

    pub const CROISSANT: &str = "Croissant +$0.75";
    pub const TOASTED: &str = "Toasted";
    pub const GRILLED: &str = "Grilled";

    pub const GARDEN_SALAD: &str = "Garden Salad (veggies only)";
    pub const BACON: &str = "Bacon";
}

/// Chip flavours offered for a chips side.
pub const CHIP_TYPES: [&str; 6] = [
    "Lays Plain",
    "Lays BBQ",
    "Jalapeno Kettle Chips",
    "Sour Cream N' Onion Kettle Chips",
    "Salt N' Vinegar Kettle Chips",
    "Cookies",
];

/// Fountain drink sizes.
pub const FOUNTAIN_SIZES: [&str; 2] = [value::REGULAR, value::LARGE];

/// Whether a field accepts multiple values.
pub fn is_multi_select(key: &str) -> bool {
    field::MULTI_SELECT.contains(&key)
}

/// Generic slug for a field key: lower-case, spaces replaced by `_`.
pub fn slug(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}
