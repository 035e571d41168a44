//! CSV ingestion.
//!
//! Columns are taken positionally — header names are ignored. Expected
//! order: sale id, sale date, customer id, customer name, product,
//! quantity, unit price, total.

use std::io::Read;

use chrono::NaiveDate;

use salescope_core::Sale;

use crate::error::{Result, StoreError};

const EXPECTED_COLUMNS: usize = 8;

/// Parse a whole CSV document into sales rows.
///
/// The first record is treated as a header and skipped. Any malformed row
/// rejects the whole upload with its 1-based line number.
pub fn parse_sales<R: Read>(reader: R) -> Result<Vec<Sale>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut sales = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let line = idx + 2; // 1-based, after the header row
        let record = record?;
        sales.push(parse_record(&record, line)?);
    }
    Ok(sales)
}

fn parse_record(record: &csv::StringRecord, line: usize) -> Result<Sale> {
    if record.len() != EXPECTED_COLUMNS {
        return Err(StoreError::InvalidRecord {
            line,
            reason: format!(
                "expected {EXPECTED_COLUMNS} columns, got {}",
                record.len()
            ),
        });
    }

    let sale = Sale {
        sale_id: parse_field(record, 0, line, "sale id")?,
        sale_date: NaiveDate::parse_from_str(&record[1], "%Y-%m-%d").map_err(|e| {
            StoreError::InvalidRecord {
                line,
                reason: format!("sale date: {e}"),
            }
        })?,
        customer_id: parse_field(record, 2, line, "customer id")?,
        customer_name: record[3].to_string(),
        product: record[4].to_string(),
        quantity: parse_field(record, 5, line, "quantity")?,
        unit_price: parse_field(record, 6, line, "unit price")?,
        total: parse_field(record, 7, line, "total")?,
    };

    if sale.unit_price < 0.0 || sale.total < 0.0 {
        return Err(StoreError::InvalidRecord {
            line,
            reason: "negative price or total".to_string(),
        });
    }

    Ok(sale)
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    line: usize,
    name: &str,
) -> Result<T> {
    record[index].parse().map_err(|_| StoreError::InvalidRecord {
        line,
        reason: format!("{name}: cannot parse {:?}", &record[index]),
    })
}
