//! # Sales Ledger Repository
//!
//! Append-only ledger of completed sales in `ventas.csv`. Records are
//! never edited or removed; an append reads the whole ledger, adds one
//! row and rewrites the file.
//!
//! Each row keeps its line items as a JSON array in the `Lineas` cell,
//! so a record round-trips without flattening per-line quantities and
//! prices into a summary.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use vivero_core::{Money, SaleLine, SaleRecord};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Persisted timestamp format, second precision, no zone suffix.
/// Timestamps are UTC by convention.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEADERS: [&str; 5] = ["Fecha", "Cliente", "Lineas", "Cantidad", "Total"];

/// Repository for the append-only sales ledger.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    config: StoreConfig,
}

impl SalesRepository {
    /// Creates a new SalesRepository.
    pub fn new(config: StoreConfig) -> Self {
        SalesRepository { config }
    }

    /// Loads every ledger record, oldest first.
    ///
    /// A missing file is an empty ledger. Stored totals are returned
    /// as recorded, not recomputed from the lines.
    pub fn load(&self) -> StoreResult<Vec<SaleRecord>> {
        let path = self.config.sales_path();
        if !path.exists() {
            debug!("No sales ledger file, returning empty ledger");
            return Ok(Vec::new());
        }
        let file = path.display().to_string();

        let mut reader = csv::Reader::from_path(&path)?;
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |i: usize| row.get(i).unwrap_or_default();

            let timestamp = NaiveDateTime::parse_from_str(field(0), TIMESTAMP_FORMAT)
                .map_err(|_| {
                    StoreError::corrupt(&file, format!("Fecha '{}' is not a timestamp", field(0)))
                })?
                .and_utc();
            let lines: Vec<SaleLine> = serde_json::from_str(field(2)).map_err(|_| {
                StoreError::corrupt(&file, "Lineas cell is not a valid line-item array")
            })?;
            let total_quantity: i64 = field(3).trim().parse().map_err(|_| {
                StoreError::corrupt(&file, format!("Cantidad '{}' is not an integer", field(3)))
            })?;
            let total = Money::parse_decimal(field(4)).ok_or_else(|| {
                StoreError::corrupt(&file, format!("Total '{}' is not an amount", field(4)))
            })?;

            records.push(SaleRecord {
                timestamp,
                customer: field(1).to_string(),
                lines,
                total_quantity,
                total,
            });
        }

        debug!(count = records.len(), "Loaded sales ledger");
        Ok(records)
    }

    /// Appends one completed sale and persists the full ledger.
    pub fn append(&self, record: &SaleRecord) -> StoreResult<()> {
        let mut records = self.load()?;
        records.push(record.clone());
        self.save(&records)?;

        debug!(customer = %record.customer, total = %record.total, "Appended sale");
        Ok(())
    }

    /// Yields the records whose timestamp falls on `date`.
    ///
    /// Reads the ledger fresh on every call, so the query restarts
    /// cleanly after new appends.
    pub fn query_by_date(&self, date: NaiveDate) -> StoreResult<impl Iterator<Item = SaleRecord>> {
        let records = self.load()?;
        Ok(records.into_iter().filter(move |r| r.date() == date))
    }

    fn save(&self, records: &[SaleRecord]) -> StoreResult<()> {
        let mut writer = csv::Writer::from_path(self.config.sales_path())?;
        writer.write_record(HEADERS)?;
        for record in records {
            writer.write_record([
                record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                record.customer.clone(),
                serde_json::to_string(&record.lines)?,
                record.total_quantity.to_string(),
                record.total.to_decimal_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn repo() -> (TempDir, SalesRepository) {
        let dir = TempDir::new().unwrap();
        let repo = SalesRepository::new(StoreConfig::new(dir.path()));
        (dir, repo)
    }

    fn sale(day: u32, customer: &str) -> SaleRecord {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, day, 10, 30, 0).unwrap();
        let lines = vec![SaleLine::new("Rosa", 2, Money::from_cents(500))];
        SaleRecord::from_lines(timestamp, customer, lines)
    }

    #[test]
    fn test_missing_file_is_empty_ledger() {
        let (_dir, repo) = repo();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_reload_preserves_lines() {
        let (_dir, repo) = repo();
        let record = sale(5, "Ana");
        repo.append(&record).unwrap();

        let reloaded = repo.load().unwrap();
        assert_eq!(reloaded, vec![record]);
        assert_eq!(reloaded[0].lines[0].item_name, "Rosa");
        assert_eq!(reloaded[0].total, Money::from_cents(1000));
    }

    #[test]
    fn test_appends_accumulate_oldest_first() {
        let (_dir, repo) = repo();
        repo.append(&sale(5, "Ana")).unwrap();
        repo.append(&sale(6, "Luis")).unwrap();
        repo.append(&sale(6, "Marta")).unwrap();

        let customers: Vec<_> = repo
            .load()
            .unwrap()
            .into_iter()
            .map(|r| r.customer)
            .collect();
        assert_eq!(customers, ["Ana", "Luis", "Marta"]);
    }

    #[test]
    fn test_query_by_date_filters_and_restarts() {
        let (_dir, repo) = repo();
        repo.append(&sale(5, "Ana")).unwrap();
        repo.append(&sale(6, "Luis")).unwrap();

        let day = NaiveDate::from_ymd_opt(2024, 3, 6).unwrap();
        let hits: Vec<_> = repo.query_by_date(day).unwrap().collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer, "Luis");

        // Re-running the query sees records appended in between.
        repo.append(&sale(6, "Marta")).unwrap();
        assert_eq!(repo.query_by_date(day).unwrap().count(), 2);
    }

    #[test]
    fn test_malformed_fecha_is_corrupt() {
        let (dir, repo) = repo();
        std::fs::write(
            dir.path().join(crate::config::SALES_FILE),
            "Fecha,Cliente,Lineas,Cantidad,Total\nayer,Ana,[],0,0.00\n",
        )
        .unwrap();

        assert!(matches!(
            repo.load().unwrap_err(),
            StoreError::Corrupt { .. }
        ));
    }
}
