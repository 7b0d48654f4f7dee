//! # Domain Types
//!
//! Core domain types used throughout Vivero POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryItem   │   │   SaleRecord    │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (operator)  │   │  timestamp      │   │  username       │       │
//! │  │  name           │   │  customer       │   │  password_hash  │       │
//! │  │  quantity       │   │  lines          │   │  role           │       │
//! │  │  pricing        │   │  total          │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │   StockStatus   │   │      Role       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Plants         │   │  Low  (≤ 10)    │   │  Admin          │       │
//! │  │  Tools          │   │  Sufficient     │   │  Vendedor       │       │
//! │  │  Products       │   └─────────────────┘   │  Bodega         │       │
//! │  │  Pots           │                         └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Category-Typed Schema
//! Each category binds its persisted file, its canonical column set and
//! whether its items carry a unit price. Only plants are priced; the
//! `Pricing` tagged variant fixes that field set at compile time instead
//! of an untyped optional-keys dictionary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Category
// =============================================================================

/// One of the four independent inventory namespaces.
///
/// Replaces the original string-keyed dispatch: every category fixes its
/// persisted file name and canonical column schema here, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Plants,
    Tools,
    Products,
    Pots,
}

impl Category {
    /// All categories, in menu order.
    pub const ALL: [Category; 4] = [
        Category::Plants,
        Category::Tools,
        Category::Products,
        Category::Pots,
    ];

    /// The persisted file for this category's collection.
    pub const fn file_name(&self) -> &'static str {
        match self {
            Category::Plants => "vivero_inventory_plants.csv",
            Category::Tools => "vivero_inventory_tools.csv",
            Category::Products => "vivero_inventory_products.csv",
            Category::Pots => "vivero_inventory_pots.csv",
        }
    }

    /// Canonical column header, in persisted order.
    ///
    /// Only plants carry `Precio Unitario`.
    pub const fn columns(&self) -> &'static [&'static str] {
        match self {
            Category::Plants => &["ID", "Nombre", "Cantidad", "Precio Unitario", "Descripción"],
            _ => &["ID", "Nombre", "Cantidad", "Descripción"],
        }
    }

    /// Whether items in this category carry a unit price.
    pub const fn prices_items(&self) -> bool {
        matches!(self, Category::Plants)
    }

    /// Spanish display label, matching the operator-facing menus.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Plants => "plantas",
            Category::Tools => "herramientas",
            Category::Products => "productos",
            Category::Pots => "maceteros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Per-category pricing variant.
///
/// Plants are `Priced`; tools, products and pots are `Unpriced`. The
/// item editor rejects candidates whose variant does not match their
/// category, so the invariant holds at the type level instead of as an
/// optional field that may or may not be filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pricing {
    /// The item sells at a fixed unit price (plants).
    Priced { unit_price: Money },
    /// The item is inventory-only (tools, products, pots).
    Unpriced,
}

impl Pricing {
    /// Returns the unit price, if this variant carries one.
    #[inline]
    pub const fn unit_price(&self) -> Option<Money> {
        match self {
            Pricing::Priced { unit_price } => Some(*unit_price),
            Pricing::Unpriced => None,
        }
    }

    /// Checks whether this variant is the one `category` requires.
    #[inline]
    pub const fn matches(&self, category: Category) -> bool {
        matches!(self, Pricing::Priced { .. }) == category.prices_items()
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Derived low-stock classification (the original's traffic light).
///
/// Never persisted: recomputed from the quantity on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Quantity at or below [`LOW_STOCK_THRESHOLD`].
    Low,
    /// Quantity above the threshold.
    Sufficient,
}

impl StockStatus {
    /// Classifies a quantity against the fixed threshold.
    ///
    /// Boundary: exactly 10 → `Low`; 11 → `Sufficient`.
    #[inline]
    pub const fn classify(quantity: i64) -> Self {
        if quantity <= LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Sufficient
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Low => f.write_str("🔴 Bajo"),
            StockStatus::Sufficient => f.write_str("🟢 Suficiente"),
        }
    }
}

// =============================================================================
// Inventory Item
// =============================================================================

/// One stocked article in a category's collection.
///
/// Identity is the operator-assigned `id`, unique per category by
/// convention only — the editor deliberately does not enforce it (see
/// the permissive-duplicates decision in DESIGN.md).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Operator-assigned code. Empty string marks a legacy row loaded
    /// from a file that predates the ID column.
    pub id: String,

    /// Display name. Sales reference plants by this name.
    pub name: String,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Free-text description.
    pub description: String,

    /// Unit price for plants; `Unpriced` for the other categories.
    pub pricing: Pricing,
}

impl InventoryItem {
    /// Derived low-stock classification, recomputed on every call.
    #[inline]
    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.quantity)
    }

    /// The unit price, when this item carries one.
    #[inline]
    pub fn unit_price(&self) -> Option<Money> {
        self.pricing.unit_price()
    }
}

// =============================================================================
// Inventory Collection
// =============================================================================

/// The ordered item sequence of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCollection {
    pub category: Category,
    pub items: Vec<InventoryItem>,
}

impl InventoryCollection {
    /// Creates an empty collection with the category's schema.
    pub fn empty(category: Category) -> Self {
        InventoryCollection {
            category,
            items: Vec::new(),
        }
    }

    /// First item carrying `id`, if any.
    pub fn find_by_id(&self, id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Index of the first item carrying `id`.
    pub fn position_by_id(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// First item carrying `name` (sales reference plants by name).
    pub fn find_by_name(&self, name: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Sale Line & Sale Record
// =============================================================================

/// One line of a completed sale, priced at time of sale.
///
/// Uses the snapshot pattern: later price edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub item_name: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// Always `unit_price × quantity`.
    pub line_total: Money,
}

impl SaleLine {
    /// Builds a line, computing the line total.
    pub fn new(item_name: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        SaleLine {
            item_name: item_name.into(),
            quantity,
            unit_price,
            line_total: unit_price.multiply_quantity(quantity),
        }
    }
}

/// A completed multi-line sale.
///
/// Immutable once appended to the ledger; identity is positional (the
/// ledger assigns no explicit sale id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub timestamp: DateTime<Utc>,
    pub customer: String,
    pub lines: Vec<SaleLine>,
    /// Always `Σ line.quantity`.
    pub total_quantity: i64,
    /// Always `Σ line.line_total`.
    pub total: Money,
}

impl SaleRecord {
    /// Builds a record, computing the derived totals from the lines.
    pub fn from_lines(
        timestamp: DateTime<Utc>,
        customer: impl Into<String>,
        lines: Vec<SaleLine>,
    ) -> Self {
        let total_quantity = lines.iter().map(|line| line.quantity).sum();
        let total = lines.iter().map(|line| line.line_total).sum();
        SaleRecord {
            timestamp,
            customer: customer.into(),
            lines,
            total_quantity,
            total,
        }
    }

    /// The date component of the timestamp (ledger queries filter on it).
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

// =============================================================================
// Users, Roles, Sessions
// =============================================================================

/// Account role, fixed at the three roles the system knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Vendedor,
    Bodega,
}

impl Role {
    /// Persisted/display form, matching the usuarios.csv role column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendedor => "vendedor",
            Role::Bodega => "bodega",
        }
    }

    /// Admins and vendedores may register sales.
    pub const fn can_register_sales(&self) -> bool {
        matches!(self, Role::Admin | Role::Vendedor)
    }

    /// Only admins may create accounts.
    pub const fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "vendedor" => Ok(Role::Vendedor),
            "bodega" => Ok(Role::Bodega),
            _ => Err(ValidationError::Required {
                field: "role".to_string(),
            }),
        }
    }
}

/// A stored account. Owned by the credential store; the engine only
/// ever reads the role off a verified session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// Hex SHA-256 of the raw password (fixed algorithm, unsalted —
    /// the credential store's persisted contract).
    pub password_hash: String,
    pub role: Role,
}

/// Explicit session context, passed to every operation that needs
/// authorization. Replaces the original's implicit global login state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Session {
            username: username.into(),
            role,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
