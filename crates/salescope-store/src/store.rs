use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, instrument};

use salescope_core::{Sale, SalesSummary};

use crate::error::{Result, StoreError};

/// Thread-safe owner of the sales dataset.
///
/// Wraps a single SQLite connection in a `Mutex`. The report job's snapshot
/// and the upload path's replace go through the same lock, so the snapshot
/// operation is atomic with respect to a full-table replace.
pub struct SalesStore {
    db: Mutex<Connection>,
}

impl SalesStore {
    /// Wrap an already-open (and `init_db`-initialised) connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Mutex::new(conn),
        }
    }

    /// Replace the whole dataset in one transaction.
    #[instrument(skip(self, sales), fields(rows = sales.len()))]
    pub fn replace_all(&self, sales: &[Sale]) -> Result<usize> {
        let mut db = self.db.lock().unwrap();
        let tx = db.transaction()?;
        tx.execute("DELETE FROM sales", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO sales
                 (sale_id, sale_date, customer_id, customer_name, product,
                  quantity, unit_price, total)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for sale in sales {
                stmt.execute(rusqlite::params![
                    sale.sale_id,
                    sale.sale_date,
                    sale.customer_id,
                    sale.customer_name,
                    sale.product,
                    sale.quantity,
                    sale.unit_price,
                    sale.total,
                ])?;
            }
        }
        tx.commit()?;
        debug!("dataset replaced");
        Ok(sales.len())
    }

    /// Owned snapshot of the dataset in insertion order.
    ///
    /// A replace that lands after this returns cannot touch an in-flight
    /// report run — the rows belong to the caller.
    pub fn snapshot(&self) -> Result<Vec<Sale>> {
        let db = self.db.lock().unwrap();
        let mut stmt = db.prepare(
            "SELECT sale_id, sale_date, customer_id, customer_name, product,
                    quantity, unit_price, total
             FROM sales ORDER BY sale_id",
        )?;
        let rows = stmt.query_map([], row_to_sale)?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Dataset-wide aggregates for the analysis endpoint.
    pub fn summary(&self) -> Result<SalesSummary> {
        let db = self.db.lock().unwrap();
        db.query_row(
            "SELECT COALESCE(SUM(total), 0.0),
                    COALESCE(SUM(quantity), 0),
                    COALESCE(AVG(total), 0.0)
             FROM sales",
            [],
            |row| {
                Ok(SalesSummary {
                    total_revenue: row.get(0)?,
                    total_quantity: row.get::<_, i64>(1)? as u64,
                    average_sale: row.get(2)?,
                })
            },
        )
        .map_err(StoreError::Database)
    }

    /// Remove every stored sale (the stop action resets the dataset).
    pub fn clear(&self) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute("DELETE FROM sales", [])?;
        Ok(())
    }
}

/// Map a SQLite row to a `Sale`.
fn row_to_sale(row: &rusqlite::Row<'_>) -> rusqlite::Result<Sale> {
    Ok(Sale {
        sale_id: row.get(0)?,
        sale_date: row.get(1)?,
        customer_id: row.get(2)?,
        customer_name: row.get(3)?,
        product: row.get(4)?,
        quantity: row.get::<_, i64>(5)? as u32,
        unit_price: row.get(6)?,
        total: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn open_store() -> SalesStore {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_db(&conn).unwrap();
        SalesStore::new(conn)
    }

    fn sale(id: i64, customer: &str, product: &str, quantity: u32, total: f64) -> Sale {
        Sale {
            sale_id: id,
            sale_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            customer_id: id * 10,
            customer_name: customer.to_string(),
            product: product.to_string(),
            quantity,
            unit_price: total / f64::from(quantity.max(1)),
            total,
        }
    }

    #[test]
    fn replace_and_snapshot_round_trip() {
        let store = open_store();
        let sales = vec![
            sale(1, "Alice", "Widget", 2, 100.0),
            sale(2, "Bob", "Gadget", 1, 50.0),
        ];
        assert_eq!(store.replace_all(&sales).unwrap(), 2);
        assert_eq!(store.snapshot().unwrap(), sales);
    }

    #[test]
    fn replace_is_wholesale() {
        let store = open_store();
        store
            .replace_all(&[sale(1, "Alice", "Widget", 2, 100.0)])
            .unwrap();
        store
            .replace_all(&[sale(7, "Carol", "Gizmo", 3, 30.0)])
            .unwrap();

        let rows = store.snapshot().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sale_id, 7);
    }

    #[test]
    fn summary_aggregates() {
        let store = open_store();
        store
            .replace_all(&[
                sale(1, "Alice", "Widget", 2, 100.0),
                sale(2, "Bob", "Gadget", 3, 50.0),
            ])
            .unwrap();

        let summary = store.summary().unwrap();
        assert_eq!(summary.total_revenue, 150.0);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.average_sale, 75.0);
    }

    #[test]
    fn summary_of_empty_dataset_is_zero() {
        let store = open_store();
        let summary = store.summary().unwrap();
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_quantity, 0);
        assert_eq!(summary.average_sale, 0.0);
    }

    #[test]
    fn clear_empties_the_table() {
        let store = open_store();
        store
            .replace_all(&[sale(1, "Alice", "Widget", 2, 100.0)])
            .unwrap();
        store.clear().unwrap();
        assert!(store.snapshot().unwrap().is_empty());
    }
}
