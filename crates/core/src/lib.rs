//! Marketplace Core - Shared cart types.
//!
//! This crate provides the types used across the marketplace cart components:
//! - `marketplace-cart` - Cart store, checkout gating and delivery form handling
//! - `marketplace-cli` - Command-line driver for carts loaded from JSON
//!
//! # Architecture
//!
//! The core crate contains only types and their validation - no I/O, no
//! shared state, no logging. Invariants that can be checked on a single value
//! (non-negative prices, service quantities pinned to one, non-empty delivery
//! fields) are enforced here, at construction.
//!
//! # Modules
//!
//! - [`types`] - Item ids, cart items, prices and delivery records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
