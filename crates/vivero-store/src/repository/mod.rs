//! # Repository Layer
//!
//! One repository per persisted file family:
//!
//! - [`inventory`] — the four category files, plus the item editor
//! - [`sales`] — the append-only ledger (`ventas.csv`)
//! - [`user`] — accounts and credential checks (`usuarios.csv`)
//!
//! Repositories are cheap handles over a [`StoreConfig`]; every
//! operation re-reads its file and every mutation rewrites it in full.
//!
//! [`StoreConfig`]: crate::config::StoreConfig

pub mod inventory;
pub mod sales;
pub mod user;

pub use inventory::{InventoryRepository, ItemPatch, NewItem};
pub use sales::SalesRepository;
pub use user::UserRepository;
