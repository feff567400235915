//! Cart ledger.
//!
//! An ordered collection of line items mirrored to the `cart-items` store
//! key. Adding a product that is already in the cart merges into the
//! existing line's quantity; ids are canonicalized by [`ProductId`] before
//! any comparison, so numeric and string forms of the same id always land
//! on the same line.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use walkway_core::{Money, ProductId};

use crate::store::{Store, StoreError, keys};

/// A product as captured from a listing, input to `add`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub image: String,
}

/// One cart line: a product and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price. Persisted under the legacy `price` field name.
    #[serde(rename = "price")]
    pub unit_price: Money,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl LineItem {
    /// Price of the whole line (`unit_price` × `quantity`).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

const fn default_quantity() -> u32 {
    1
}

/// Outcome of a cart mutation, for the surface layer to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// "{name} added to cart!"
    Added { name: String },
    /// "Item removed from cart"
    Removed,
}

/// The cart: in-memory line items mirrored to durable storage.
///
/// Loaded from the store at construction and written back after every
/// mutation. Mutations are staged and only committed to memory once the
/// store write succeeds, so a failed write never leaves the in-memory view
/// ahead of the persisted one.
#[derive(Debug)]
pub struct CartLedger {
    store: Store,
    items: Vec<LineItem>,
}

impl CartLedger {
    /// Load the cart from the store; absent or corrupt state is an empty
    /// cart.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let items: Vec<LineItem> = store.get(keys::CART_ITEMS).unwrap_or_default();
        Self { store, items }
    }

    /// Add a product: merge into an existing line's quantity, or append a
    /// new line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails; the ledger is unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: ProductInput) -> Result<CartEvent, StoreError> {
        let mut next = self.items.clone();
        match next.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => existing.quantity += 1,
            None => next.push(LineItem {
                id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                image: product.image,
                quantity: 1,
            }),
        }

        self.commit(next)?;
        debug!(count = self.item_count(), "product added to cart");
        Ok(CartEvent::Added { name: product.name })
    }

    /// Remove the line for `id`. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails; the ledger is unchanged.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> Result<CartEvent, StoreError> {
        if !self.items.iter().any(|item| &item.id == id) {
            return Ok(CartEvent::Removed);
        }

        let next: Vec<LineItem> = self
            .items
            .iter()
            .filter(|item| &item.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        Ok(CartEvent::Removed)
    }

    /// Empty the cart. Used by checkout after the order history write
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails; the ledger is unchanged.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(Vec::new())
    }

    /// Total number of units across all lines (the badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Monetary total of the cart.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// An owned copy of the lines, immune to later ledger mutation.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn commit(&mut self, next: Vec<LineItem>) -> Result<(), StoreError> {
        self.store.set(keys::CART_ITEMS, &next)?;
        self.items = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreAdapter};

    fn product(id: &str, name: &str, price: i64) -> ProductInput {
        ProductInput {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Money::from(price),
            image: format!("/images/{id}.jpg"),
        }
    }

    #[test]
    fn test_add_new_product_appends_line() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        let event = cart.add(product("1", "Trail Runner", 500)).unwrap();

        assert_eq!(
            event,
            CartEvent::Added {
                name: "Trail Runner".to_owned()
            }
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_same_id_twice_merges_quantity() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        cart.add(product("1", "Trail Runner", 500)).unwrap();
        cart.add(product("1", "Trail Runner", 500)).unwrap();

        assert_eq!(cart.len(), 1, "same product must never produce two lines");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_numeric_and_string_ids_merge() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        cart.add(product("7", "Loafer", 300)).unwrap();
        cart.add(ProductInput {
            id: ProductId::from(7_i64),
            name: "Loafer".to_owned(),
            price: Money::from(300),
            image: String::new(),
        })
        .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_item_count_tracks_all_mutations() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        cart.add(product("1", "A", 100)).unwrap();
        cart.add(product("1", "A", 100)).unwrap();
        cart.add(product("2", "B", 200)).unwrap();
        assert_eq!(cart.item_count(), 3);

        cart.remove(&ProductId::new("1")).unwrap();
        assert_eq!(cart.item_count(), 1);

        let expected: u32 = cart.items().iter().map(|i| i.quantity).sum();
        assert_eq!(cart.item_count(), expected);
    }

    #[test]
    fn test_total() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        cart.add(product("a", "A", 500)).unwrap();
        cart.add(product("a", "A", 500)).unwrap();
        cart.add(product("b", "B", 150)).unwrap();

        assert_eq!(cart.total(), Money::from(1150));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        cart.add(product("1", "A", 100)).unwrap();

        cart.remove(&ProductId::new("999")).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_accepts_either_id_form() {
        let mut cart = CartLedger::load(Store::new(MemoryStore::new()));
        cart.add(product("7", "Loafer", 300)).unwrap();

        // Stored as "7", removed via the numeric form.
        cart.remove(&ProductId::from(7_i64)).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_persists_across_reload() {
        let store = Store::new(MemoryStore::new());
        let mut cart = CartLedger::load(store.clone());
        cart.add(product("1", "A", 500)).unwrap();
        cart.add(product("1", "A", 500)).unwrap();
        drop(cart);

        let reloaded = CartLedger::load(store);
        assert_eq!(reloaded.item_count(), 2);
        assert_eq!(reloaded.total(), Money::from(1000));
    }

    #[test]
    fn test_corrupt_persisted_cart_loads_empty() {
        let mut adapter = MemoryStore::new();
        adapter
            .set_raw(keys::CART_ITEMS, "{broken".to_owned())
            .unwrap();
        let cart = CartLedger::load(Store::new(adapter));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_corrupt_price_coerces_to_zero_in_total() {
        // A line item persisted with a garbage price must not poison the
        // total.
        let mut adapter = MemoryStore::new();
        adapter
            .set_raw(
                keys::CART_ITEMS,
                r#"[
                    {"id": 1, "name": "A", "price": "oops", "image": "", "quantity": 2},
                    {"id": 2, "name": "B", "price": 150, "image": "", "quantity": 1}
                ]"#
                .to_owned(),
            )
            .unwrap();

        let cart = CartLedger::load(Store::new(adapter));
        assert_eq!(cart.total(), Money::from(150));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_failed_persist_leaves_ledger_unchanged() {
        let adapter = MemoryStore::new();
        let failpoint = adapter.write_failpoint();
        let mut cart = CartLedger::load(Store::new(adapter));
        cart.add(product("1", "A", 100)).unwrap();

        failpoint.store(true, std::sync::atomic::Ordering::Relaxed);
        assert!(cart.add(product("2", "B", 200)).is_err());
        assert_eq!(cart.len(), 1, "failed write must not mutate the ledger");
        assert!(cart.remove(&ProductId::new("1")).is_err());
        assert_eq!(cart.len(), 1);
    }
}
