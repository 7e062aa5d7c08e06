//! CLI command implementations.

pub mod checkout;
pub mod summary;

use std::path::Path;

use marketplace_cart::CartStore;
use marketplace_core::{CartItem, CartItemInput};
use tracing::{error, info};

/// Load a cart from a JSON file holding an array of catalog items.
///
/// Every item is validated before any is added, and all failures are
/// reported together.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if any item fails
/// validation, or if the items cannot be combined into one cart.
pub async fn load_cart(file_path: &str) -> Result<CartStore, Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading cart from file");

    let content = tokio::fs::read_to_string(path).await?;
    let inputs: Vec<CartItemInput> = serde_json::from_str(&content)?;

    let mut items = Vec::with_capacity(inputs.len());
    let mut errors = Vec::new();
    for (index, input) in inputs.into_iter().enumerate() {
        let label = format!("#{index} ({} {})", input.kind, input.id);
        match CartItem::try_from(input) {
            Ok(item) => items.push(item),
            Err(e) => errors.push((label, e)),
        }
    }

    if !errors.is_empty() {
        error!("Cart validation failed:");
        for (label, err) in &errors {
            error!("  - {label}: {err}");
        }
        return Err(format!("{} invalid cart items", errors.len()).into());
    }

    let store = CartStore::with_items(items)?;
    info!(lines = store.items().len(), units = store.item_count(), "Cart loaded");
    Ok(store)
}
