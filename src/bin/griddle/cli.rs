//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Griddle - order from the counter without standing at it
#[derive(Parser)]
#[command(name = "griddle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base URL of the menu endpoints
    #[arg(long, global = true, env = "GRIDDLE_API_URL")]
    pub api_url: Option<String>,

    /// Base URL of the checkout endpoints
    #[arg(long, global = true, env = "GRIDDLE_CHECKOUT_URL")]
    pub checkout_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the menu
    Menu(MenuArgs),

    /// Show the choices available for an item
    Options(OptionsArgs),

    /// Customize an item and add it to the cart
    Add(AddArgs),

    /// Show the cart
    Cart(CartArgs),

    /// Remove one unit of a cart line
    Remove(RemoveArgs),

    /// Change the quantity of a cart line
    Update(UpdateArgs),

    /// Empty the cart
    Clear,

    /// Show the days a pickup can be booked
    Hours(HoursArgs),

    /// Place the order in the cart
    Checkout(CheckoutArgs),

    /// Look up a placed order
    Order(OrderArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct MenuArgs {
    /// Only show one category
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// Item name as shown on the menu
    pub item: String,

    /// Category of the item, when the name appears in more than one
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item name as shown on the menu
    pub item: String,

    /// Category of the item, when the name appears in more than one
    #[arg(short, long)]
    pub category: Option<String>,

    /// A choice, as "Field=Value" (repeat for several toppings)
    #[arg(short, long = "pick", value_name = "FIELD=VALUE")]
    pub picks: Vec<String>,

    /// Number of units
    #[arg(short = 'n', long, default_value_t = 1)]
    pub quantity: u32,

    /// Special instructions for the kitchen
    #[arg(long)]
    pub note: Option<String>,

    /// Price the item without adding it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CartArgs {
    /// Print the stored cart as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RemoveArgs {
    /// Line id from `griddle cart`
    pub id: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Line id from `griddle cart`
    pub id: String,

    /// Amount to add to the quantity (negative to take away)
    #[arg(allow_negative_numbers = true)]
    pub delta: i64,
}

#[derive(Args)]
pub struct HoursArgs {
    /// Number of open days to list
    #[arg(long, default_value_t = 7)]
    pub days: usize,
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Name for the order
    #[arg(long)]
    pub name: String,

    /// Phone number the verification code is texted to
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Pickup time, "asap" or "YYYY-MM-DD HH:MM"
    #[arg(long, default_value = "asap")]
    pub pickup: String,

    /// How to pay: cash (verified by SMS) or card
    #[arg(long = "pay")]
    pub payment: Option<String>,

    /// Payment-method id from the card processor (card only)
    #[arg(long)]
    pub payment_method_id: Option<String>,
}

#[derive(Args)]
pub struct OrderArgs {
    /// Order number
    pub id: u64,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
