//! Human-readable order summary
//!
//! The approval workflow stores a short text description next to each
//! order. It is derived from the structured line items and is display-only:
//! nothing in this crate parses it back, the structured items travel
//! through the whole pipeline.

use crate::model::OrderLineItem;

/// Format line items into the stored order-details summary, one line per
/// item, e.g. "2 Widget - 20% discount".
pub fn order_details_display(items: &[OrderLineItem]) -> String {
    items
        .iter()
        .map(|item| {
            if item.discount > 0.0 {
                format!("{} {} - {}% discount", item.quantity, item.name, item.discount)
            } else {
                format!("{} {}", item.quantity, item.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
