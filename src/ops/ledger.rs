//! The persisted cart.
//!
//! `CartLedger` wraps the in-memory [`Cart`] and writes a full snapshot to
//! its store after every mutation. Loading never fails: a missing, unreadable
//! or corrupt snapshot yields an empty cart and a warning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::cart::{AddOutcome, Cart, CartLine, QuantityChange};
use crate::core::money::Money;
use crate::util::fs;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "griddle-cart";

/// Somewhere a single cart snapshot can be kept.
pub trait CartStore {
    /// The stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &str) -> Result<()>;
}

/// Cart snapshot kept as a JSON file.
#[derive(Debug, Clone)]
pub struct FileCartStore {
    path: PathBuf,
}

impl FileCartStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCartStore { path: path.into() }
    }

    /// The store for a storage key inside `dir`.
    pub fn for_key(dir: &Path, key: &str) -> Self {
        FileCartStore::new(dir.join(format!("{}.json", file_stem(key))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for FileCartStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path).map(Some)
    }

    fn save(&self, snapshot: &str) -> Result<()> {
        fs::write_atomic(&self.path, snapshot)
    }
}

/// Map a storage key onto a safe file name.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    if stem.is_empty() {
        DEFAULT_STORAGE_KEY.to_string()
    } else {
        stem
    }
}

/// A cart that persists itself on every change.
#[derive(Debug)]
pub struct CartLedger<S: CartStore> {
    cart: Cart,
    store: S,
}

impl<S: CartStore> CartLedger<S> {
    /// Restore the cart from `store`, starting empty if that is impossible.
    pub fn load(store: S) -> Self {
        let cart = match store.load() {
            Ok(Some(snapshot)) => match serde_json::from_str::<Cart>(&snapshot) {
                Ok(mut cart) => {
                    let folded = cart.merge_duplicates();
                    if folded > 0 {
                        tracing::warn!("stored cart repeated {} line id(s), merged them", folded);
                    }
                    tracing::debug!("restored cart with {} line(s)", cart.len());
                    cart
                }
                Err(e) => {
                    tracing::warn!("stored cart is corrupt, starting empty: {}", e);
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("could not read stored cart, starting empty: {:#}", e);
                Cart::new()
            }
        };
        CartLedger { cart, store }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn add(&mut self, line: CartLine) -> Result<AddOutcome> {
        let id = line.id.clone();
        let outcome = self.cart.add(line);
        tracing::info!("cart add {}: {:?}", id, outcome);
        self.persist()?;
        Ok(outcome)
    }

    pub fn update_quantity(&mut self, id: &str, delta: i64) -> Result<QuantityChange> {
        let change = self.cart.update_quantity(id, delta);
        if change != QuantityChange::NotFound {
            tracing::info!("cart update {} by {}: {:?}", id, delta, change);
            self.persist()?;
        }
        Ok(change)
    }

    /// Remove one unit of a line.
    pub fn remove(&mut self, id: &str) -> Result<QuantityChange> {
        self.update_quantity(id, -1)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.cart.clear();
        tracing::info!("cart cleared");
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let snapshot =
            serde_json::to_string(&self.cart).context("failed to serialize cart")?;
        self.store.save(&snapshot).context("failed to save cart")
    }
}
