//! Wishlist ledger.
//!
//! Same shape as the cart ledger but without quantities: an id is either in
//! the wishlist or not, and adding a present id signals "already there"
//! instead of mutating anything.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use walkway_core::{Money, ProductId};

use crate::cart::{CartEvent, CartLedger, ProductInput};
use crate::store::{Store, StoreError, keys};

/// One saved product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: ProductId,
    pub name: String,
    /// Persisted under the legacy `price` field name.
    #[serde(rename = "price")]
    pub unit_price: Money,
    #[serde(default)]
    pub image: String,
}

/// Outcome of a wishlist `add`, for the surface layer to announce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistEvent {
    /// "{name} added to wishlist!"
    Added { name: String },
    /// "Item already in wishlist" - nothing was mutated.
    AlreadyPresent,
}

/// The wishlist: saved products mirrored to the `wishlist-items` store key.
#[derive(Debug)]
pub struct WishlistLedger {
    store: Store,
    items: Vec<WishlistItem>,
}

impl WishlistLedger {
    /// Load the wishlist from the store; absent or corrupt state is empty.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let items: Vec<WishlistItem> = store.get(keys::WISHLIST_ITEMS).unwrap_or_default();
        Self { store, items }
    }

    /// Save a product. If the id is already present nothing changes and
    /// [`WishlistEvent::AlreadyPresent`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails; the ledger is unchanged.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: ProductInput) -> Result<WishlistEvent, StoreError> {
        if self.items.iter().any(|item| item.id == product.id) {
            return Ok(WishlistEvent::AlreadyPresent);
        }

        let mut next = self.items.clone();
        next.push(WishlistItem {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image,
        });
        self.commit(next)?;
        Ok(WishlistEvent::Added { name: product.name })
    }

    /// Remove the entry for `id`. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails; the ledger is unchanged.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove(&mut self, id: &ProductId) -> Result<(), StoreError> {
        if !self.items.iter().any(|item| &item.id == id) {
            return Ok(());
        }

        let next: Vec<WishlistItem> = self
            .items
            .iter()
            .filter(|item| &item.id != id)
            .cloned()
            .collect();
        self.commit(next)
    }

    /// Add the saved product to the cart.
    ///
    /// The wishlist entry stays where it is: that matches the shipped
    /// behavior, where "Add to Cart" from the wishlist never removed the
    /// saved item. Returns `None` if the id is not in the wishlist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart fails to persist.
    pub fn move_to_cart(
        &self,
        id: &ProductId,
        cart: &mut CartLedger,
    ) -> Result<Option<CartEvent>, StoreError> {
        let Some(item) = self.items.iter().find(|item| &item.id == id) else {
            return Ok(None);
        };

        let event = cart.add(ProductInput {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.unit_price,
            image: item.image.clone(),
        })?;
        Ok(Some(event))
    }

    /// The saved items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    /// Number of saved items (the badge count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn commit(&mut self, next: Vec<WishlistItem>) -> Result<(), StoreError> {
        self.store.set(keys::WISHLIST_ITEMS, &next)?;
        self.items = next;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn product(id: &str, name: &str, price: i64) -> ProductInput {
        ProductInput {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Money::from(price),
            image: String::new(),
        }
    }

    #[test]
    fn test_add_and_remove() {
        let mut wishlist = WishlistLedger::load(Store::new(MemoryStore::new()));
        let event = wishlist.add(product("1", "Derby", 900)).unwrap();
        assert_eq!(
            event,
            WishlistEvent::Added {
                name: "Derby".to_owned()
            }
        );
        assert_eq!(wishlist.len(), 1);

        wishlist.remove(&ProductId::new("1")).unwrap();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_add_present_id_signals_without_mutating() {
        let mut wishlist = WishlistLedger::load(Store::new(MemoryStore::new()));
        wishlist.add(product("1", "Derby", 900)).unwrap();

        let event = wishlist.add(product("1", "Derby", 900)).unwrap();
        assert_eq!(event, WishlistEvent::AlreadyPresent);
        assert_eq!(wishlist.len(), 1, "duplicate add must not grow the list");
    }

    #[test]
    fn test_duplicate_detection_spans_id_forms() {
        let mut wishlist = WishlistLedger::load(Store::new(MemoryStore::new()));
        wishlist.add(product("7", "Loafer", 300)).unwrap();

        let event = wishlist
            .add(ProductInput {
                id: ProductId::from(7_i64),
                name: "Loafer".to_owned(),
                price: Money::from(300),
                image: String::new(),
            })
            .unwrap();
        assert_eq!(event, WishlistEvent::AlreadyPresent);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut wishlist = WishlistLedger::load(Store::new(MemoryStore::new()));
        wishlist.add(product("1", "Derby", 900)).unwrap();
        wishlist.remove(&ProductId::new("2")).unwrap();
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_move_to_cart_keeps_wishlist_entry() {
        let store = Store::new(MemoryStore::new());
        let mut wishlist = WishlistLedger::load(store.clone());
        let mut cart = CartLedger::load(store);

        wishlist.add(product("1", "Derby", 900)).unwrap();
        let event = wishlist
            .move_to_cart(&ProductId::new("1"), &mut cart)
            .unwrap();

        assert_eq!(
            event,
            Some(CartEvent::Added {
                name: "Derby".to_owned()
            })
        );
        assert_eq!(cart.item_count(), 1);
        // Shipped behavior: the saved item stays on the wishlist.
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_move_to_cart_unknown_id() {
        let store = Store::new(MemoryStore::new());
        let wishlist = WishlistLedger::load(store.clone());
        let mut cart = CartLedger::load(store);

        let event = wishlist
            .move_to_cart(&ProductId::new("404"), &mut cart)
            .unwrap();
        assert_eq!(event, None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_persists_across_reload() {
        let store = Store::new(MemoryStore::new());
        let mut wishlist = WishlistLedger::load(store.clone());
        wishlist.add(product("1", "Derby", 900)).unwrap();
        drop(wishlist);

        let reloaded = WishlistLedger::load(store);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.items()[0].name, "Derby");
    }
}
