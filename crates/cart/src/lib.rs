//! Marketplace Cart - Cart store, checkout gating and delivery handling.
//!
//! # Architecture
//!
//! - [`store`] - The shared [`CartStore`] and the [`CartProvider`] trait the
//!   page consumes. The store is the only writer of cart state.
//! - [`page`] - [`CartPage`], the consumer: totals, quantity rules, checkout
//!   gating and the delivery form.
//! - [`checkout`] - Pure totals and gating rules.
//! - [`notify`] / [`navigation`] - Collaborators for user notices and back
//!   navigation.
//!
//! All state is in memory. Failures are reported to the user as notices and
//! returned to the caller as typed errors; nothing panics.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use marketplace_cart::{CartPage, CartStore, CheckoutError, NavigationHistory, NoticeLog};
//! use marketplace_core::{CartItem, ItemId};
//! use rust_decimal::Decimal;
//!
//! let store = CartStore::new();
//! store
//!     .add_to_cart(CartItem::product(ItemId::new(1), "Argan oil", Decimal::from(120)).unwrap())
//!     .unwrap();
//!
//! let mut page = CartPage::new(
//!     store.clone(),
//!     Arc::new(NoticeLog::new()),
//!     Arc::new(NavigationHistory::new()),
//! );
//! assert_eq!(page.handle_checkout(), Err(CheckoutError::MissingDeliveryInfo));
//! assert!(page.show_delivery());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod error;
pub mod navigation;
pub mod notify;
pub mod page;
pub mod store;

pub use checkout::{CartSummary, CheckoutHook, CheckoutReceipt};
pub use error::{CartError, CheckoutError};
pub use navigation::{NavigationHistory, Navigator};
pub use notify::{Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
pub use page::CartPage;
pub use store::{CartProvider, CartStore};
