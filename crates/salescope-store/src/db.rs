use rusqlite::Connection;

use crate::error::Result;

/// Initialise the sales schema in `conn`.
///
/// Creates the `sales` table (idempotent) and an index on `sale_date` so the
/// monthly series stays cheap to build as uploads grow.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS sales (
            sale_id       INTEGER NOT NULL PRIMARY KEY,
            sale_date     TEXT    NOT NULL,   -- ISO-8601 calendar date
            customer_id   INTEGER NOT NULL,
            customer_name TEXT    NOT NULL,
            product       TEXT    NOT NULL,
            quantity      INTEGER NOT NULL,
            unit_price    REAL    NOT NULL,
            total         REAL    NOT NULL
        ) STRICT;

        CREATE INDEX IF NOT EXISTS idx_sales_date ON sales (sale_date);
        ",
    )?;
    Ok(())
}
