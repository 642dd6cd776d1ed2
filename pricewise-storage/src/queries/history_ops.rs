//! Append and read finalized quote totals.

use chrono::Utc;
use rusqlite::{params, Connection};

use pricewise_core::errors::PricingResult;
use pricewise_core::knowledge::CategoryKey;

use crate::to_storage_err;

pub fn insert_total(conn: &Connection, key: &CategoryKey, total: f64) -> PricingResult<()> {
    conn.execute(
        "INSERT INTO historical_totals (contractor_id, category, total, recorded_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![key.contractor_id, key.category, total, Utc::now().to_rfc3339()],
    )
    .map_err(|e| to_storage_err(format!("insert_total: {e}")))?;
    Ok(())
}

/// Totals in insertion order.
pub fn get_totals(conn: &Connection, key: &CategoryKey) -> PricingResult<Vec<f64>> {
    let mut stmt = conn
        .prepare(
            "SELECT total FROM historical_totals
             WHERE contractor_id = ?1 AND category = ?2 ORDER BY id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![key.contractor_id, key.category], |row| row.get::<_, f64>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}
