//! # Sale Engine
//!
//! Orchestrates a complete sale transaction: permission gate, stock
//! plan against a fresh snapshot, then persistence of both sides.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      register_sale(session, request)                    │
//! │                                                                         │
//! │  1. Gate ───────► session.role may register sales? else Forbidden      │
//! │  2. Snapshot ───► load the plants collection from disk                 │
//! │  3. Plan ───────► plan_sale(): validate lines, aggregate per item,     │
//! │                   check stock, price, build the record (pure, no I/O)  │
//! │  4. Persist ────► save decremented inventory ONCE                      │
//! │  5. Persist ────► append the ledger record ONCE                        │
//! │                                                                         │
//! │  Inventory is saved before the ledger: a crash between the two         │
//! │  writes loses the ledger row but never over-reports stock.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::info;

use vivero_core::{plan_sale, Category, CoreError, InventoryCollection, SaleRecord, SaleRequest, Session};

use crate::error::StoreResult;
use crate::repository::{InventoryRepository, SalesRepository};

/// Sale transaction orchestrator.
#[derive(Debug, Clone)]
pub struct SaleEngine {
    inventory: InventoryRepository,
    sales: SalesRepository,
}

impl SaleEngine {
    /// Creates a new SaleEngine over the two repositories it writes.
    pub fn new(inventory: InventoryRepository, sales: SalesRepository) -> Self {
        SaleEngine { inventory, sales }
    }

    /// Registers a multi-line plant sale.
    ///
    /// ## Guarantees
    /// - Validation is all-or-nothing: on any failed line, neither the
    ///   inventory nor the ledger changes
    /// - Stock is checked per item against the quantity AGGREGATED
    ///   across the request's lines, on a snapshot taken at entry
    /// - On success the decremented inventory is saved exactly once
    ///   and exactly one ledger record is appended
    pub fn register_sale(
        &self,
        session: &Session,
        request: &SaleRequest,
    ) -> StoreResult<SaleRecord> {
        if !session.role.can_register_sales() {
            return Err(CoreError::forbidden("register sales").into());
        }

        let snapshot = self.inventory.load(Category::Plants)?;
        let plan = plan_sale(&snapshot, request, Utc::now())?;

        self.inventory.save(&InventoryCollection {
            category: Category::Plants,
            items: plan.items,
        })?;
        self.sales.append(&plan.record)?;

        info!(
            seller = %session.username,
            customer = %plan.record.customer,
            lines = plan.record.lines.len(),
            total = %plan.record.total,
            "Registered sale"
        );
        Ok(plan.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vivero_core::{Money, RequestLine, Role, ValidationError};

    use crate::config::{Store, StoreConfig};
    use crate::error::StoreError;
    use crate::repository::NewItem;

    fn store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).unwrap();
        (dir, store)
    }

    fn stock_plant(store: &Store, name: &str, quantity: i64, cents: i64) {
        let repo = store.inventory();
        let mut plants = repo.load(Category::Plants).unwrap();
        repo.add_item(
            &mut plants,
            NewItem {
                id: format!("P-{name}"),
                name: name.to_string(),
                quantity,
                description: String::new(),
                unit_price: Some(Money::from_cents(cents)),
            },
        )
        .unwrap();
    }

    fn seller() -> Session {
        Session::new("marta", Role::Vendedor)
    }

    #[test]
    fn test_successful_sale_decrements_stock_and_appends_ledger() {
        let (_dir, store) = store();
        stock_plant(&store, "Tulipán", 10, 500);

        let request = SaleRequest::new("Ana", vec![RequestLine::new("Tulipán", 2)]);
        let record = store.engine().register_sale(&seller(), &request).unwrap();

        assert_eq!(record.total, Money::from_cents(1000));
        assert_eq!(record.total_quantity, 2);

        let plants = store.inventory().load(Category::Plants).unwrap();
        assert_eq!(plants.find_by_name("Tulipán").unwrap().quantity, 8);
        assert_eq!(store.sales().load().unwrap().len(), 1);
    }

    #[test]
    fn test_aggregate_stock_check_across_lines() {
        let (_dir, store) = store();
        stock_plant(&store, "Rosa", 5, 400);

        // 3 + 3 aggregated against 5 on hand.
        let request = SaleRequest::new(
            "Ana",
            vec![RequestLine::new("Rosa", 3), RequestLine::new("Rosa", 3)],
        );
        let err = store.engine().register_sale(&seller(), &request).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::InsufficientStock { available: 5, requested: 6, .. })
        ));

        // Nothing was persisted.
        let plants = store.inventory().load(Category::Plants).unwrap();
        assert_eq!(plants.find_by_name("Rosa").unwrap().quantity, 5);
        assert!(store.sales().load().unwrap().is_empty());
    }

    #[test]
    fn test_failed_line_leaves_both_files_untouched() {
        let (_dir, store) = store();
        stock_plant(&store, "Rosa", 5, 400);

        let request = SaleRequest::new(
            "Ana",
            vec![
                RequestLine::new("Rosa", 1),
                RequestLine::new("Orquídea", 1), // not stocked
            ],
        );
        let err = store.engine().register_sale(&seller(), &request).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::NotFound { .. })));

        let plants = store.inventory().load(Category::Plants).unwrap();
        assert_eq!(plants.find_by_name("Rosa").unwrap().quantity, 5);
        assert!(store.sales().load().unwrap().is_empty());
    }

    #[test]
    fn test_bodega_role_cannot_register_sales() {
        let (_dir, store) = store();
        stock_plant(&store, "Rosa", 5, 400);

        let bodega = Session::new("luis", Role::Bodega);
        let request = SaleRequest::new("Ana", vec![RequestLine::new("Rosa", 1)]);
        let err = store.engine().register_sale(&bodega, &request).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Forbidden { .. })));
    }

    #[test]
    fn test_sale_then_invoice_and_date_query() {
        let (dir, store) = store();
        stock_plant(&store, "Tulipán", 10, 500);

        let request = SaleRequest::new("Ana", vec![RequestLine::new("Tulipán", 2)]);
        store.engine().register_sale(&seller(), &request).unwrap();

        // The ledger row reconciles into an invoice and a document.
        let record = store.sales().load().unwrap().remove(0);
        let invoice = vivero_core::InvoiceRecord::build(&record).unwrap();
        assert_eq!(invoice.grand_total, Money::from_cents(1000));

        let renderer = crate::invoice::TextInvoiceRenderer::new(dir.path().join("facturas"));
        let path = crate::invoice::InvoiceRenderer::render(&renderer, &invoice).unwrap();
        assert!(path.exists());

        // And the date query finds the record on its own day.
        let hits: Vec<_> = store
            .sales()
            .query_by_date(record.date())
            .unwrap()
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer, "Ana");
    }

    #[test]
    fn test_concurrent_editors_race_with_last_save_wins() {
        // Two handles over one data directory, mimicking two sessions.
        let (dir, store_a) = store();
        let store_b = Store::open(StoreConfig::new(dir.path())).unwrap();
        stock_plant(&store_a, "Rosa", 5, 400);

        let repo_a = store_a.inventory();
        let repo_b = store_b.inventory();
        let mut snapshot_a = repo_a.load(Category::Plants).unwrap();
        let mut snapshot_b = repo_b.load(Category::Plants).unwrap();

        // A adds a clavel; B, working from the older snapshot, bumps
        // the rosa. B saves last, so A's clavel is silently lost.
        repo_a
            .add_item(
                &mut snapshot_a,
                NewItem {
                    id: "P-Clavel".to_string(),
                    name: "Clavel".to_string(),
                    quantity: 3,
                    description: String::new(),
                    unit_price: Some(Money::from_cents(200)),
                },
            )
            .unwrap();
        repo_b
            .update_item(
                &mut snapshot_b,
                "P-Rosa",
                crate::repository::ItemPatch {
                    name: "Rosa".to_string(),
                    quantity: 50,
                    description: String::new(),
                    unit_price: None,
                },
            )
            .unwrap();

        let persisted = repo_a.load(Category::Plants).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted.find_by_name("Rosa").unwrap().quantity, 50);
        assert!(persisted.find_by_name("Clavel").is_none());
    }

    #[test]
    fn test_empty_sale_is_rejected() {
        let (_dir, store) = store();
        let request = SaleRequest::new("Ana", Vec::new());
        let err = store.engine().register_sale(&seller(), &request).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::EmptySale))
        ));
    }
}
