//! Shared cart store.
//!
//! [`CartStore`] owns the cart line items and the saved delivery record. It is
//! cheaply cloneable via `Arc`; every clone is a handle onto the same state.
//! Consumers read snapshots and change state only through the store's
//! operations.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use tracing::{debug, info, instrument, warn};

use marketplace_core::{CartItem, DeliveryInfo, ItemKey};

use crate::checkout::CheckoutHook;
use crate::error::{CartError, Result};

/// Operations the cart page needs from a cart store.
///
/// Implemented by [`CartStore`]; alternative implementations can stand in for
/// it (for example to observe which mutators a page calls).
pub trait CartProvider {
    /// Snapshot of the cart line items, in insertion order.
    fn cart_items(&self) -> Vec<CartItem>;

    /// Snapshot of the saved delivery record, if any.
    fn delivery_info(&self) -> Option<DeliveryInfo>;

    /// Remove the item with this key. Returns whether an item was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store state is unavailable.
    fn remove_from_cart(&self, key: ItemKey) -> Result<bool>;

    /// Set the quantity of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is missing or refuses the quantity.
    fn update_quantity(&self, key: ItemKey, quantity: u32) -> Result<()>;

    /// Replace the saved delivery record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store state is unavailable.
    fn save_delivery_info(&self, info: DeliveryInfo) -> Result<()>;
}

#[derive(Debug, Default)]
struct CartState {
    items: Vec<CartItem>,
    delivery_info: Option<DeliveryInfo>,
}

impl CartState {
    fn find_mut(&mut self, key: ItemKey) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.key() == key)
    }
}

/// The cart store.
#[derive(Clone, Default)]
pub struct CartStore {
    inner: Arc<RwLock<CartState>>,
}

impl CartStore {
    /// Create an empty cart with no delivery information.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart holding `items`, merged as by [`CartStore::add_to_cart`].
    ///
    /// # Errors
    ///
    /// Returns an error if two entries for the same service are given or a
    /// merged product quantity is refused.
    pub fn with_items(items: impl IntoIterator<Item = CartItem>) -> Result<Self> {
        let store = Self::new();
        for item in items {
            store.add_to_cart(item)?;
        }
        Ok(store)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CartState>> {
        self.inner.write().map_err(|_| CartError::LockPoisoned)
    }

    /// Snapshot of the cart line items.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.inner
            .read()
            .map(|state| state.items.clone())
            .unwrap_or_default()
    }

    /// Snapshot of one item.
    #[must_use]
    pub fn get(&self, key: ItemKey) -> Option<CartItem> {
        self.inner
            .read()
            .ok()
            .and_then(|state| state.items.iter().find(|item| item.key() == key).cloned())
    }

    /// Snapshot of the saved delivery record.
    #[must_use]
    pub fn delivery(&self) -> Option<DeliveryInfo> {
        self.inner
            .read()
            .ok()
            .and_then(|state| state.delivery_info.clone())
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner
            .read()
            .map(|state| state.items.is_empty())
            .unwrap_or(true)
    }

    /// Total number of units across all items (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.inner
            .read()
            .map(|state| {
                state
                    .items
                    .iter()
                    .map(|item| u64::from(item.quantity()))
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Add an item to the cart.
    ///
    /// Adding a product that is already in the cart increases its quantity by
    /// the added quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ServiceAlreadyInCart`] if the item is a service
    /// that is already booked, or [`CartError::Quantity`] if the merged
    /// product quantity is refused (over stock, or a line total too large to
    /// represent).
    #[instrument(skip(self, item), fields(key = %item.key(), quantity = item.quantity()))]
    pub fn add_to_cart(&self, item: CartItem) -> Result<()> {
        let key = item.key();
        let mut state = self.write()?;

        if let Some(existing) = state.find_mut(key) {
            if existing.is_service() {
                warn!("Service already in cart");
                return Err(CartError::ServiceAlreadyInCart(key));
            }
            let merged = i64::from(existing.quantity()) + i64::from(item.quantity());
            existing.set_quantity(merged)?;
            debug!(quantity = merged, "Merged product into existing line");
            return Ok(());
        }

        state.items.push(item);
        debug!("Added item to cart");
        Ok(())
    }

    /// Remove every item. The delivery record is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LockPoisoned`] if the store state is unavailable.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) -> Result<()> {
        let mut state = self.write()?;
        let removed = state.items.len();
        state.items.clear();
        info!(removed, "Cart cleared");
        Ok(())
    }

    /// A checkout hook that empties this cart after a successful checkout.
    #[must_use]
    pub fn clear_on_checkout(&self) -> CheckoutHook {
        let store = self.clone();
        Box::new(move |_receipt| {
            if let Err(e) = store.clear_cart() {
                warn!("Failed to clear cart after checkout: {e}");
            }
        })
    }
}

impl CartProvider for CartStore {
    fn cart_items(&self) -> Vec<CartItem> {
        self.items()
    }

    fn delivery_info(&self) -> Option<DeliveryInfo> {
        self.delivery()
    }

    #[instrument(skip(self), fields(key = %key))]
    fn remove_from_cart(&self, key: ItemKey) -> Result<bool> {
        let mut state = self.write()?;
        let before = state.items.len();
        state.items.retain(|item| item.key() != key);
        let removed = state.items.len() < before;
        debug!(removed, "Remove from cart");
        Ok(removed)
    }

    #[instrument(skip(self), fields(key = %key))]
    fn update_quantity(&self, key: ItemKey, quantity: u32) -> Result<()> {
        let mut state = self.write()?;
        let item = state.find_mut(key).ok_or(CartError::ItemNotFound(key))?;
        item.set_quantity(i64::from(quantity))?;
        debug!(quantity, "Quantity updated");
        Ok(())
    }

    #[instrument(skip(self, info), fields(mode = %info.mode()))]
    fn save_delivery_info(&self, info: DeliveryInfo) -> Result<()> {
        let mut state = self.write()?;
        state.delivery_info = Some(info);
        debug!("Delivery info saved");
        Ok(())
    }
}
