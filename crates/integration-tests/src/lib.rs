//! Integration tests for the marketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_totals` - Totals over carts loaded from catalog JSON
//! - `quantity_rules` - Product and service quantity changes
//! - `checkout_gating` - Checkout outcomes for each cart shape
//! - `delivery_form` - Delivery form submission
//! - `cart_removal` - Removal by `(type, id)` key
//!
//! This crate also holds the fixtures shared by those tests.

use std::sync::Arc;

use marketplace_cart::{CartPage, CartStore, NavigationHistory, NoticeLog};
use marketplace_core::{CartItem, CartItemInput};

/// A page over a fresh store, with its notice log and navigation history.
pub struct Fixture {
    pub store: CartStore,
    pub notices: NoticeLog,
    pub history: NavigationHistory,
    pub page: CartPage<CartStore>,
}

impl Fixture {
    /// Build a page over a store holding the items in `json`.
    ///
    /// # Panics
    ///
    /// Panics if the JSON is not a valid array of cart items.
    #[must_use]
    pub fn from_json(json: &str) -> Self {
        Self::with_items(items_from_json(json))
    }

    /// Build a page over a store holding `items`.
    ///
    /// # Panics
    ///
    /// Panics if the items cannot be combined into one cart.
    #[must_use]
    pub fn with_items(items: Vec<CartItem>) -> Self {
        let store = CartStore::with_items(items).expect("fixture items form a valid cart");
        let notices = NoticeLog::new();
        let history = NavigationHistory::new();
        let page = CartPage::new(
            store.clone(),
            Arc::new(notices.clone()),
            Arc::new(history.clone()),
        );

        Self {
            store,
            notices,
            history,
            page,
        }
    }
}

/// Parse and validate a JSON array of catalog items.
///
/// # Panics
///
/// Panics if the JSON is malformed or an item fails validation.
#[must_use]
pub fn items_from_json(json: &str) -> Vec<CartItem> {
    serde_json::from_str::<Vec<CartItemInput>>(json)
        .expect("fixture JSON parses")
        .into_iter()
        .map(|input| CartItem::try_from(input).expect("fixture item is valid"))
        .collect()
}

/// A mixed cart: two products and one service, with product and service
/// sharing id 1.
pub const MIXED_CART: &str = r#"[
    {"id": 1, "type": "product", "name": "Argan oil", "price": 120, "quantity": 2, "images": ["argan.jpg"], "category": "natural"},
    {"id": 2, "type": "product", "name": "Black soap", "price": 35.5, "trackQuantity": true, "availableStock": 5},
    {"id": 1, "type": "service", "name": "Desert tour", "price": 800, "duration": 480}
]"#;

/// A cart holding only services.
pub const SERVICES_CART: &str = r#"[
    {"id": 10, "type": "service", "name": "Home cleaning", "price": 250, "duration": 120},
    {"id": 11, "type": "service", "name": "Legal consultation", "price": 600}
]"#;
