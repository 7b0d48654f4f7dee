//! # Sale Planner
//!
//! The pure half of the sale transaction engine: validates a proposed
//! multi-line sale against a pre-transaction inventory snapshot and
//! produces the decremented item set plus the priced [`SaleRecord`].
//! Persistence (one inventory save, one ledger append) is the store
//! crate's job.
//!
//! ## Why Plan Against the Snapshot?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE LINE-ORDERING ARTIFACT                                             │
//! │                                                                         │
//! │  Stock: Rosa = 5. Request: [Rosa × 3, Rosa × 3].                       │
//! │                                                                         │
//! │  ❌ Naive per-line check:                                               │
//! │     line 1: 3 ≤ 5 ok → stock 2                                         │
//! │     line 2: 3 > 2 fail — but only because of where the line sits       │
//! │     (or worse, no re-check: stock ends at -1)                          │
//! │                                                                         │
//! │  ✅ Aggregate check (this module):                                      │
//! │     Rosa total = 6 > 5 → InsufficientStock before anything mutates     │
//! │                                                                         │
//! │  All requested quantities are summed per item and checked against      │
//! │  the PRE-transaction snapshot; decrements apply only afterwards.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{InventoryCollection, InventoryItem, SaleLine, SaleRecord};
use crate::validation;

// =============================================================================
// Request Types
// =============================================================================

/// One requested line: an item name and how many units to sell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLine {
    pub item_name: String,
    pub quantity: i64,
}

impl RequestLine {
    pub fn new(item_name: impl Into<String>, quantity: i64) -> Self {
        RequestLine {
            item_name: item_name.into(),
            quantity,
        }
    }
}

/// A proposed sale, as received from the UI client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub customer: String,
    pub lines: Vec<RequestLine>,
}

impl SaleRequest {
    pub fn new(customer: impl Into<String>, lines: Vec<RequestLine>) -> Self {
        SaleRequest {
            customer: customer.into(),
            lines,
        }
    }
}

// =============================================================================
// Sale Plan
// =============================================================================

/// The validated outcome of planning a sale.
///
/// `items` is the COMPLETE desired state of the plants collection after
/// the sale (the store saves collections whole, never merges), and
/// `record` is the ledger entry to append.
#[derive(Debug, Clone)]
pub struct SalePlan {
    pub items: Vec<InventoryItem>,
    pub record: SaleRecord,
}

/// Validates `request` against `inventory` and computes the plan.
///
/// ## Checks, in order
/// 1. Customer name non-empty, at least one line, every quantity ≥ 1
/// 2. Every named item exists in the snapshot and carries a unit price
/// 3. Per item, the AGGREGATE of all requesting lines does not exceed
///    the pre-transaction stock
///
/// Nothing is mutated on failure; on success the returned items have
/// their quantities decremented and the record is priced at the unit
/// prices in the snapshot.
pub fn plan_sale(
    inventory: &InventoryCollection,
    request: &SaleRequest,
    timestamp: DateTime<Utc>,
) -> CoreResult<SalePlan> {
    validation::validate_customer_name(&request.customer)?;
    if request.lines.is_empty() {
        return Err(ValidationError::EmptySale.into());
    }
    for line in &request.lines {
        validation::validate_sale_quantity(line.quantity)?;
    }

    // Resolve every line against the snapshot and accumulate the total
    // requested per item (lines may repeat a name).
    let mut sale_lines = Vec::with_capacity(request.lines.len());
    let mut requested: Vec<(usize, i64)> = Vec::new();
    for line in &request.lines {
        let index = inventory
            .items
            .iter()
            .position(|item| item.name == line.item_name)
            .ok_or_else(|| CoreError::not_found("Item", &line.item_name))?;
        let item = &inventory.items[index];

        let unit_price = item.unit_price().ok_or(ValidationError::Unpriced {
            item: item.name.clone(),
        })?;
        sale_lines.push(SaleLine::new(&item.name, line.quantity, unit_price));

        match requested.iter_mut().find(|(i, _)| *i == index) {
            Some((_, total)) => *total += line.quantity,
            None => requested.push((index, line.quantity)),
        }
    }

    // Aggregate stock check against the pre-transaction snapshot.
    for &(index, total) in &requested {
        let item = &inventory.items[index];
        if total > item.quantity {
            return Err(CoreError::InsufficientStock {
                item: item.name.clone(),
                available: item.quantity,
                requested: total,
            });
        }
    }

    // All checks passed; apply the decrements to a copy.
    let mut items = inventory.items.clone();
    for &(index, total) in &requested {
        items[index].quantity -= total;
    }

    let record = SaleRecord::from_lines(timestamp, request.customer.trim(), sale_lines);
    Ok(SalePlan { items, record })
}

// =============================================================================
// Unit Tests
// =============================================================================
