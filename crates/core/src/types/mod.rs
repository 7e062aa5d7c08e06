//! Core types for the marketplace cart.
//!
//! This module provides type-safe wrappers for cart items, prices and
//! delivery records.

pub mod delivery;
pub mod id;
pub mod item;
pub mod price;

pub use delivery::{DeliveryForm, DeliveryInfo, DeliveryInfoError, DeliveryMode, UnknownDeliveryMode};
pub use id::*;
pub use item::{CartItem, CartItemInput, ItemError, ItemKey, ItemKind, QuantityChangeRejected};
pub use price::{CurrencyCode, Price, UnknownCurrency};
