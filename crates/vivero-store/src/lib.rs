//! # Vivero Store
//!
//! CSV-backed persistence and orchestration for the Vivero POS:
//! inventory files, the sales ledger, user accounts, the sale
//! transaction engine and invoice rendering.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      vivero-store Crate Layout                          │
//! │                                                                         │
//! │  ┌────────────┐   opens    ┌──────────────────────────────────────────┐ │
//! │  │   Store    │ ─────────► │ repository/                              │ │
//! │  │ (config.rs)│            │   inventory ──► vivero_inventory_*.csv   │ │
//! │  └─────┬──────┘            │   sales ──────► ventas.csv               │ │
//! │        │                   │   user ───────► usuarios.csv             │ │
//! │        │ wires             └──────────────────────────────────────────┘ │
//! │        ▼                                                                │
//! │  ┌────────────┐  plans via vivero-core, persists via repositories      │
//! │  │ SaleEngine │                                                        │
//! │  └────────────┘                                                        │
//! │  ┌────────────────────┐  renders assembled invoices to disk           │
//! │  │ TextInvoiceRenderer│                                                │
//! │  └────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All persistence is whole-file: loads read a file in full, saves
//! rewrite it in full. Concurrent editors of the same file race with
//! last-save-wins semantics; the integration tests pin that behaviour
//! down rather than hide it.

pub mod config;
pub mod engine;
pub mod error;
pub mod invoice;
pub mod repository;

pub use config::{Store, StoreConfig, SALES_FILE, USERS_FILE};
pub use engine::SaleEngine;
pub use error::{StoreError, StoreResult};
pub use invoice::{InvoiceRenderer, TextInvoiceRenderer};
pub use repository::{InventoryRepository, ItemPatch, NewItem, SalesRepository, UserRepository};
