//! Print cart totals.

use marketplace_cart::{CartStore, CartSummary};
use marketplace_core::{CurrencyCode, Price};
use serde::Serialize;
use tracing::info;

/// Machine-readable summary output.
///
/// `total` is the raw decimal from the summary; `total_display` is the same
/// amount formatted in the display currency.
#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    currency: &'static str,
    total_display: String,
    #[serde(flatten)]
    summary: &'a CartSummary,
}

impl<'a> SummaryReport<'a> {
    fn new(summary: &'a CartSummary, currency: CurrencyCode) -> Self {
        Self {
            currency: currency.code(),
            total_display: summary.total_price(currency).display(),
            summary,
        }
    }
}

/// Print the summary of a cart file.
///
/// # Errors
///
/// Returns an error if the cart cannot be loaded, its total cannot be
/// computed, or the report cannot be serialized.
pub async fn run(
    file_path: &str,
    currency: CurrencyCode,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::load_cart(file_path).await?;
    let summary = CartSummary::from_items(&store.items())?;

    if json {
        let report = SummaryReport::new(&summary, currency);
        print_json(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    log_summary(&store, &summary, currency);
    Ok(())
}

/// Log every line and the totals.
pub fn log_summary(store: &CartStore, summary: &CartSummary, currency: CurrencyCode) {
    info!("Cart");
    info!("====");
    for item in store.items() {
        info!(
            "  [{}] {} x{} @ {} = {}",
            item.kind(),
            item.name(),
            item.quantity(),
            Price::new(item.price(), currency),
            Price::new(item.line_total(), currency),
        );
    }
    info!("Products: {}", summary.products_count);
    info!("Services: {}", summary.services_count);
    info!("Units: {}", summary.item_count);
    info!("Total: {}", summary.total_price(currency));
}

#[allow(clippy::print_stdout)]
fn print_json(json: &str) {
    println!("{json}");
}
