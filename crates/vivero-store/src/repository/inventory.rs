//! # Inventory Repository
//!
//! File operations for the four inventory categories, plus the item
//! editor (validated create/update/delete over an in-memory snapshot,
//! persisted immediately).
//!
//! ## Read-Modify-Write Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 How Inventory Mutations Work                            │
//! │                                                                         │
//! │  UI client action            Editor operation        Persisted file     │
//! │  ────────────────            ────────────────        ──────────────     │
//! │                                                                         │
//! │  load(category) ────────────────────────────────────► read whole file  │
//! │       │                                                                 │
//! │  Fill form ─────────────────► add_item(…) ──────────► rewrite whole    │
//! │                                                        file             │
//! │  Edit row ──────────────────► update_item(…) ───────► rewrite whole    │
//! │                                                        file             │
//! │  Upload CSV ────────────────► bulk_replace(…) ──────► schema check,    │
//! │                                                        then rewrite     │
//! │                                                                         │
//! │  Every save is a TOTAL replacement of the category file. Two           │
//! │  sessions editing one category race: last save wins, silently.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use vivero_core::{
    validation, Category, CoreError, InventoryCollection, InventoryItem, Money, Pricing,
    ValidationError,
};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

// =============================================================================
// Editor Payloads
// =============================================================================

/// A candidate item from the UI client's "add" form.
///
/// `unit_price` must be present exactly when the category prices its
/// items (plants), mirroring the per-category field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    pub description: String,
    pub unit_price: Option<Money>,
}

/// The mutable fields of an "update" form. The id is never patched.
///
/// For plants, `unit_price: None` keeps the existing price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: String,
    pub quantity: i64,
    pub description: String,
    pub unit_price: Option<Money>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the per-category inventory files.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    config: StoreConfig,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(config: StoreConfig) -> Self {
        InventoryRepository { config }
    }

    // -------------------------------------------------------------------------
    // Load / Save / Bulk Replace
    // -------------------------------------------------------------------------

    /// Loads a category's collection.
    ///
    /// ## Guarantees
    /// - A missing file yields an empty collection with the canonical
    ///   schema
    /// - Every returned item has a non-null id: rows from legacy files
    ///   without an `ID` column come back with an empty-string
    ///   placeholder
    /// - Status is never read from disk; it is derived from the
    ///   quantity on demand ([`InventoryItem::status`])
    pub fn load(&self, category: Category) -> StoreResult<InventoryCollection> {
        let path = self.config.category_path(category);
        if !path.exists() {
            debug!(category = %category, "No inventory file, returning empty collection");
            return Ok(InventoryCollection::empty(category));
        }

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(&path)?;
        let headers = reader.headers()?.clone();

        let mut items = Vec::new();
        for row in reader.records() {
            let row = row?;
            items.push(parse_item(category, &headers, &row, &path)?);
        }

        debug!(category = %category, count = items.len(), "Loaded inventory");
        Ok(InventoryCollection { category, items })
    }

    /// Persists a collection, overwriting the category file in full.
    ///
    /// Total replacement, never a merge: callers pass the complete
    /// desired state.
    pub fn save(&self, collection: &InventoryCollection) -> StoreResult<()> {
        let category = collection.category;
        let path = self.config.category_path(category);
        let mut writer = csv::Writer::from_path(&path)?;

        writer.write_record(category.columns())?;
        for item in &collection.items {
            let quantity = item.quantity.to_string();
            let price = item
                .unit_price()
                .map(|p| p.to_decimal_string())
                .unwrap_or_default();
            if category.prices_items() {
                writer.write_record([
                    item.id.as_str(),
                    item.name.as_str(),
                    quantity.as_str(),
                    price.as_str(),
                    item.description.as_str(),
                ])?;
            } else {
                writer.write_record([
                    item.id.as_str(),
                    item.name.as_str(),
                    quantity.as_str(),
                    item.description.as_str(),
                ])?;
            }
        }
        writer.flush()?;

        debug!(category = %category, count = collection.len(), "Saved inventory");
        Ok(())
    }

    /// Replaces a category's collection with an uploaded CSV.
    ///
    /// The upload's column set must be a SUPERSET of the canonical
    /// schema; extra columns are ignored. On any missing column the
    /// previously persisted file is left untouched and
    /// [`StoreError::SchemaMismatch`] names what is absent.
    pub fn bulk_replace(
        &self,
        category: Category,
        upload: impl Read,
    ) -> StoreResult<InventoryCollection> {
        let mut reader = csv::Reader::from_reader(upload);
        let headers = reader.headers()?.clone();

        let missing: Vec<String> = category
            .columns()
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| (*column).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::SchemaMismatch { category, missing });
        }

        let path = self.config.category_path(category);
        let mut items = Vec::new();
        for row in reader.records() {
            let row = row?;
            items.push(parse_item(category, &headers, &row, &path)?);
        }

        let collection = InventoryCollection { category, items };
        self.save(&collection)?;

        debug!(category = %category, count = collection.len(), "Bulk-replaced inventory");
        Ok(collection)
    }

    // -------------------------------------------------------------------------
    // Item Editor
    // -------------------------------------------------------------------------

    /// Appends a validated candidate and persists.
    ///
    /// ## Rules
    /// - id and name non-empty, quantity ≥ 0
    /// - the pricing field set must match the category (plants priced,
    ///   the rest unpriced)
    /// - duplicate ids are NOT rejected; they may coexist (preserved
    ///   permissive behaviour, pinned by tests)
    pub fn add_item(
        &self,
        collection: &mut InventoryCollection,
        candidate: NewItem,
    ) -> StoreResult<()> {
        validation::validate_item_id(&candidate.id)?;
        validation::validate_item_name(&candidate.name)?;
        validation::validate_stock_quantity(candidate.quantity)?;

        let pricing = pricing_for(collection.category, candidate.unit_price)?;
        let item = InventoryItem {
            id: candidate.id,
            name: candidate.name,
            quantity: candidate.quantity,
            description: candidate.description,
            pricing,
        };

        debug!(category = %collection.category, id = %item.id, "Adding item");
        collection.items.push(item);
        self.save(collection)
    }

    /// Replaces the mutable fields of the FIRST item carrying `id` and
    /// persists. The id itself is preserved.
    pub fn update_item(
        &self,
        collection: &mut InventoryCollection,
        id: &str,
        patch: ItemPatch,
    ) -> StoreResult<()> {
        validation::validate_item_name(&patch.name)?;
        validation::validate_stock_quantity(patch.quantity)?;

        let position = collection
            .position_by_id(id)
            .ok_or_else(|| CoreError::not_found("Item", id))?;

        let pricing = match (collection.category.prices_items(), patch.unit_price) {
            // Plants without a patched price keep the one on record.
            (true, None) => collection.items[position].pricing,
            (category_priced, price) => pricing_for_flag(collection.category, category_priced, price)?,
        };

        let item = &mut collection.items[position];
        item.name = patch.name;
        item.quantity = patch.quantity;
        item.description = patch.description;
        item.pricing = pricing;

        debug!(category = %collection.category, id = %id, "Updated item");
        self.save(collection)
    }

    /// Removes EVERY item carrying `id` and persists.
    ///
    /// Idempotent: zero matches is not an error, and the rewrite still
    /// happens so the persisted state equals the in-memory state.
    pub fn delete_item(&self, collection: &mut InventoryCollection, id: &str) -> StoreResult<()> {
        let before = collection.len();
        collection.items.retain(|item| item.id != id);

        debug!(
            category = %collection.category,
            id = %id,
            removed = before - collection.len(),
            "Deleted item(s)"
        );
        self.save(collection)
    }
}

// =============================================================================
// Row Parsing
// =============================================================================

/// Builds the pricing variant a category requires from an optional
/// price, rejecting mismatched field sets.
fn pricing_for(category: Category, unit_price: Option<Money>) -> StoreResult<Pricing> {
    pricing_for_flag(category, category.prices_items(), unit_price)
}

fn pricing_for_flag(
    category: Category,
    category_priced: bool,
    unit_price: Option<Money>,
) -> StoreResult<Pricing> {
    match (category_priced, unit_price) {
        (true, Some(unit_price)) => Ok(Pricing::Priced { unit_price }),
        (false, None) => Ok(Pricing::Unpriced),
        _ => Err(ValidationError::PricingMismatch {
            category: category.label().to_string(),
        }
        .into()),
    }
}

/// Parses one CSV row into an item, indexing cells by header name.
///
/// `Nombre` and `Cantidad` are required; a missing `ID` column loads as
/// the empty-string placeholder, and missing `Descripción` as empty.
fn parse_item(
    category: Category,
    headers: &StringRecord,
    row: &StringRecord,
    path: &Path,
) -> StoreResult<InventoryItem> {
    let file = path.display().to_string();
    let cell = |column: &str| -> Option<&str> {
        headers
            .iter()
            .position(|h| h == column)
            .and_then(|i| row.get(i))
    };

    let name = cell("Nombre")
        .ok_or_else(|| StoreError::corrupt(&file, "missing Nombre column"))?
        .to_string();

    let quantity_cell = cell("Cantidad")
        .ok_or_else(|| StoreError::corrupt(&file, "missing Cantidad column"))?;
    let quantity: i64 = quantity_cell.trim().parse().map_err(|_| {
        StoreError::corrupt(&file, format!("Cantidad '{}' is not an integer", quantity_cell))
    })?;

    let pricing = if category.prices_items() {
        let price_cell = cell("Precio Unitario")
            .ok_or_else(|| StoreError::corrupt(&file, "missing Precio Unitario column"))?;
        let unit_price = Money::parse_decimal(price_cell).ok_or_else(|| {
            StoreError::corrupt(
                &file,
                format!("Precio Unitario '{}' is not an amount", price_cell),
            )
        })?;
        Pricing::Priced { unit_price }
    } else {
        Pricing::Unpriced
    };

    Ok(InventoryItem {
        // Legacy files predate the ID column; back-fill a placeholder.
        id: cell("ID").unwrap_or_default().to_string(),
        name,
        quantity,
        description: cell("Descripción").unwrap_or_default().to_string(),
        pricing,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vivero_core::StockStatus;

    fn repo() -> (TempDir, InventoryRepository) {
        let dir = TempDir::new().unwrap();
        let repo = InventoryRepository::new(StoreConfig::new(dir.path()));
        (dir, repo)
    }

    fn new_plant(id: &str, name: &str, quantity: i64, cents: i64) -> NewItem {
        NewItem {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            description: String::new(),
            unit_price: Some(Money::from_cents(cents)),
        }
    }

    #[test]
    fn test_missing_file_loads_as_empty_collection() {
        let (_dir, repo) = repo();
        let collection = repo.load(Category::Tools).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.category, Category::Tools);
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 12, 500))
            .unwrap();
        repo.add_item(&mut collection, new_plant("P-002", "Tulipán", 3, 300))
            .unwrap();

        let reloaded = repo.load(Category::Plants).unwrap();
        assert_eq!(reloaded, collection);
        // Status is derived on read, not persisted.
        assert_eq!(reloaded.items[0].status(), StockStatus::Sufficient);
        assert_eq!(reloaded.items[1].status(), StockStatus::Low);
    }

    #[test]
    fn test_unpriced_category_round_trip() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Pots);
        repo.add_item(
            &mut collection,
            NewItem {
                id: "M-01".to_string(),
                name: "Macetero grande".to_string(),
                quantity: 7,
                description: "barro cocido".to_string(),
                unit_price: None,
            },
        )
        .unwrap();

        let reloaded = repo.load(Category::Pots).unwrap();
        assert_eq!(reloaded, collection);
        assert_eq!(reloaded.items[0].unit_price(), None);
    }

    #[test]
    fn test_add_item_validates_fields() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);

        let empty_id = NewItem {
            id: "".to_string(),
            ..new_plant("x", "Rosa", 1, 100)
        };
        assert!(repo.add_item(&mut collection, empty_id).is_err());

        let empty_name = new_plant("P-001", "", 1, 100);
        assert!(repo.add_item(&mut collection, empty_name).is_err());

        let negative = new_plant("P-001", "Rosa", -1, 100);
        assert!(repo.add_item(&mut collection, negative).is_err());

        // Nothing was appended or persisted by the failures.
        assert!(collection.is_empty());
        assert!(repo.load(Category::Plants).unwrap().is_empty());
    }

    #[test]
    fn test_add_item_enforces_category_field_set() {
        let (_dir, repo) = repo();

        // A priced candidate in an unpriced category…
        let mut pots = InventoryCollection::empty(Category::Pots);
        let priced = new_plant("M-01", "Macetero", 5, 100);
        assert!(repo.add_item(&mut pots, priced).is_err());

        // …and an unpriced candidate among the plants.
        let mut plants = InventoryCollection::empty(Category::Plants);
        let unpriced = NewItem {
            unit_price: None,
            ..new_plant("P-001", "Rosa", 5, 0)
        };
        assert!(repo.add_item(&mut plants, unpriced).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_permitted() {
        // Preserved permissive behaviour: no uniqueness check on add.
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 5, 500))
            .unwrap();
        repo.add_item(&mut collection, new_plant("P-001", "Clavel", 2, 200))
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(repo.load(Category::Plants).unwrap().len(), 2);
    }

    #[test]
    fn test_update_item_replaces_fields_preserving_id() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 5, 500))
            .unwrap();

        repo.update_item(
            &mut collection,
            "P-001",
            ItemPatch {
                name: "Rosa blanca".to_string(),
                quantity: 20,
                description: "injertada".to_string(),
                unit_price: Some(Money::from_cents(650)),
            },
        )
        .unwrap();

        let reloaded = repo.load(Category::Plants).unwrap();
        let item = reloaded.find_by_id("P-001").unwrap();
        assert_eq!(item.name, "Rosa blanca");
        assert_eq!(item.quantity, 20);
        assert_eq!(item.unit_price(), Some(Money::from_cents(650)));
    }

    #[test]
    fn test_update_without_price_keeps_existing_price() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 5, 500))
            .unwrap();

        repo.update_item(
            &mut collection,
            "P-001",
            ItemPatch {
                name: "Rosa".to_string(),
                quantity: 4,
                description: String::new(),
                unit_price: None,
            },
        )
        .unwrap();

        assert_eq!(
            collection.find_by_id("P-001").unwrap().unit_price(),
            Some(Money::from_cents(500))
        );
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);

        let err = repo
            .update_item(
                &mut collection,
                "P-404",
                ItemPatch {
                    name: "Rosa".to_string(),
                    quantity: 1,
                    description: String::new(),
                    unit_price: Some(Money::from_cents(100)),
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_item_is_idempotent() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 5, 500))
            .unwrap();

        repo.delete_item(&mut collection, "P-001").unwrap();
        assert!(collection.is_empty());

        // Deleting the same id again: no error, identical state.
        repo.delete_item(&mut collection, "P-001").unwrap();
        assert!(collection.is_empty());
        assert!(repo.load(Category::Plants).unwrap().is_empty());
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 5, 500))
            .unwrap();
        repo.add_item(&mut collection, new_plant("P-001", "Clavel", 2, 200))
            .unwrap();

        repo.delete_item(&mut collection, "P-001").unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_bulk_replace_missing_column_leaves_file_unchanged() {
        let (_dir, repo) = repo();
        let mut collection = InventoryCollection::empty(Category::Plants);
        repo.add_item(&mut collection, new_plant("P-001", "Rosa", 5, 500))
            .unwrap();

        let upload = "ID,Nombre,Precio Unitario,Descripción\nP-009,Clavel,2.00,\n";
        let err = repo
            .bulk_replace(Category::Plants, upload.as_bytes())
            .unwrap_err();
        match err {
            StoreError::SchemaMismatch { missing, .. } => {
                assert_eq!(missing, vec!["Cantidad".to_string()]);
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }

        // Previously persisted collection untouched.
        assert_eq!(repo.load(Category::Plants).unwrap(), collection);
    }

    #[test]
    fn test_bulk_replace_accepts_superset_columns() {
        let (_dir, repo) = repo();

        let upload = "ID,Nombre,Cantidad,Precio Unitario,Descripción,Proveedor\n\
                      P-001,Rosa,5,5.00,roja,Vivero Sur\n";
        let collection = repo
            .bulk_replace(Category::Plants, upload.as_bytes())
            .unwrap();

        assert_eq!(collection.len(), 1);
        let item = &collection.items[0];
        assert_eq!(item.name, "Rosa");
        assert_eq!(item.unit_price(), Some(Money::from_cents(500)));
        // Extra column dropped; canonical schema on disk.
        assert_eq!(repo.load(Category::Plants).unwrap(), collection);
    }

    #[test]
    fn test_legacy_file_without_id_column_backfills_ids() {
        let (dir, repo) = repo();
        std::fs::write(
            dir.path().join(Category::Tools.file_name()),
            "Nombre,Cantidad,Descripción\nPala,4,mango de madera\n",
        )
        .unwrap();

        let collection = repo.load(Category::Tools).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.items[0].id, "");
        assert_eq!(collection.items[0].name, "Pala");
    }

    #[test]
    fn test_unparseable_quantity_is_corrupt() {
        let (dir, repo) = repo();
        std::fs::write(
            dir.path().join(Category::Tools.file_name()),
            "ID,Nombre,Cantidad,Descripción\nT-01,Pala,muchas,\n",
        )
        .unwrap();

        let err = repo.load(Category::Tools).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
