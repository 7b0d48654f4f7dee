//! # Invoice Assembly
//!
//! Transforms a ledger entry into the structured invoice record the
//! document-generation service consumes. Pure: no side effects, no I/O.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sales Ledger ──► SaleRecord ──► InvoiceRecord::build ──► document      │
//! │                                       │                    service      │
//! │                                       │ (external: renders PDF/text)    │
//! │                                       ▼                                  │
//! │                            reconciliation check:                         │
//! │                            stored total == Σ line totals                 │
//! │                            (a tampered/corrupted ledger row is a        │
//! │                             ValidationError, not a bad invoice)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::SaleRecord;

// =============================================================================
// Invoice Record
// =============================================================================

/// One invoice line, mirroring the sale line it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Structured invoice data for one ledger entry.
///
/// Transient: constructed per request, handed to the document service,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub customer: String,
    pub date: DateTime<Utc>,
    pub lines: Vec<InvoiceLine>,
    pub grand_total: Money,
}

impl InvoiceRecord {
    /// Builds the invoice for a ledger entry.
    ///
    /// Fails with a validation error when the stored total no longer
    /// reconciles with the stored lines (the typed equivalent of the
    /// mismatched parallel arrays the original flat file could produce).
    pub fn build(record: &SaleRecord) -> CoreResult<Self> {
        let computed: Money = record.lines.iter().map(|line| line.line_total).sum();
        if computed != record.total {
            return Err(ValidationError::TotalMismatch {
                stored: record.total,
                computed,
            }
            .into());
        }

        Ok(InvoiceRecord {
            customer: record.customer.clone(),
            date: record.timestamp,
            lines: record
                .lines
                .iter()
                .map(|line| InvoiceLine {
                    name: line.item_name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total,
                })
                .collect(),
            grand_total: record.total,
        })
    }

    /// File-name stem for the rendered document:
    /// `Factura_{fecha}_{cliente}`, with filesystem-unsafe characters
    /// stripped. The renderer appends its own extension.
    pub fn file_stem(&self) -> String {
        sanitize_file_name(&format!(
            "Factura_{}_{}",
            self.date.format("%Y-%m-%d %H:%M:%S"),
            self.customer
        ))
    }
}

// =============================================================================
// File Name Sanitization
// =============================================================================

/// Strips the characters `< > : " / \ | ? *` from a candidate file name
/// (the timestamp's colons being the usual offenders).
pub fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*'))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
