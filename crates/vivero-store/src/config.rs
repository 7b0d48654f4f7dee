//! # Store Configuration
//!
//! Data-directory configuration and the `Store` handle.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Layout                                     │
//! │                                                                         │
//! │  StoreConfig::new(data_dir) ← one directory holds every file           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config) ← creates the directory, hands out repositories   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data_dir/                                                              │
//! │  ├── vivero_inventory_plants.csv    (ID,Nombre,Cantidad,Precio …)      │
//! │  ├── vivero_inventory_tools.csv     (ID,Nombre,Cantidad,Descripción)   │
//! │  ├── vivero_inventory_products.csv                                      │
//! │  ├── vivero_inventory_pots.csv                                          │
//! │  ├── usuarios.csv                   (username,password,role)            │
//! │  └── ventas.csv                     (Fecha,Cliente,Lineas,…)            │
//! │                                                                         │
//! │  Absence of a file is equivalent to an empty collection.               │
//! │  Every save is a whole-file overwrite: single session, no locking,     │
//! │  last save wins.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use vivero_core::Category;

use crate::engine::SaleEngine;
use crate::error::StoreResult;
use crate::repository::inventory::InventoryRepository;
use crate::repository::sales::SalesRepository;
use crate::repository::user::UserRepository;

/// Persisted file for user accounts.
pub const USERS_FILE: &str = "usuarios.csv";

/// Persisted file for the sales ledger.
pub const SALES_FILE: &str = "ventas.csv";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration: the data directory and the file paths derived
/// from it.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("./data");
/// let store = Store::open(config)?;
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding every persisted file. Created on open.
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
        }
    }

    /// Path of a category's inventory file.
    pub fn category_path(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.file_name())
    }

    /// Path of the user accounts file.
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    /// Path of the sales ledger file.
    pub fn sales_path(&self) -> PathBuf {
        self.data_dir.join(SALES_FILE)
    }
}

// =============================================================================
// Store Handle
// =============================================================================

/// Root handle over the data directory.
///
/// Hands out repositories the way the UI client consumes them:
///
/// ```rust,ignore
/// let store = Store::open(StoreConfig::new("./data"))?;
/// let plants = store.inventory().load(Category::Plants)?;
/// let session = store.users().verify("admin", "admin123")?;
/// let record = store.engine().register_sale(&session, &request)?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Opens the store, creating the data directory if needed.
    ///
    /// Files themselves are created lazily: a category file appears on
    /// its first save, and a missing file always reads as an empty
    /// collection.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.data_dir)?;
        debug!(data_dir = %config.data_dir.display(), "Store opened");
        Ok(Store { config })
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Repository for the four inventory categories.
    pub fn inventory(&self) -> InventoryRepository {
        InventoryRepository::new(self.config.clone())
    }

    /// Repository for the sales ledger.
    pub fn sales(&self) -> SalesRepository {
        SalesRepository::new(self.config.clone())
    }

    /// The credential store.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.config.clone())
    }

    /// The sale transaction engine over this store's repositories.
    pub fn engine(&self) -> SaleEngine {
        SaleEngine::new(self.inventory(), self.sales())
    }
}
