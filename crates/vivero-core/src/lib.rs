//! # vivero-core: Pure Business Logic for Vivero POS
//!
//! This crate is the **heart** of Vivero POS, the inventory and sales
//! system of a small plant nursery. It contains all business logic as
//! pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Vivero POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  UI Client (external)                           │   │
//! │  │    Inventory forms ──► Sale form ──► Sales-by-date view         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vivero-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   sale    │  │  invoice  │  │   │
//! │  │   │ Category  │  │   Money   │  │ plan_sale │  │  build    │  │   │
//! │  │   │   Item    │  │  (cents)  │  │ aggregate │  │ sanitize  │  │   │
//! │  │   │  Record   │  │           │  │   check   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK READS • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vivero-store (persistence layer)                │   │
//! │  │        CSV files: one per category, users, sales ledger         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, InventoryItem, SaleRecord, Role, …)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`sale`] - The pure sale planner (aggregate stock check)
//! - [`invoice`] - Invoice assembly for the document service
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - timestamps
//!    are parameters, never clock reads
//! 2. **No I/O**: File system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod invoice;
pub mod money;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{sanitize_file_name, InvoiceLine, InvoiceRecord};
pub use money::Money;
pub use sale::{plan_sale, RequestLine, SalePlan, SaleRequest};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock at or below this count classifies as [`types::StockStatus::Low`].
///
/// ## Business Reason
/// The nursery reorders anything that drops to ten units or fewer; the
/// inventory views paint those rows red. The value is fixed, not
/// configurable, and the classification is recomputed on every read
/// rather than stored.
pub const LOW_STOCK_THRESHOLD: i64 = 10;
