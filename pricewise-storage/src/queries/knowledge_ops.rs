//! Get, version-checked upsert, delete and list for pricing knowledge.

use rusqlite::{params, Connection, OptionalExtension};

use pricewise_core::constants::KNOWLEDGE_SCHEMA_VERSION;
use pricewise_core::errors::{PricingError, PricingResult, StorageError};
use pricewise_core::knowledge::{CategoryKey, PricingKnowledge};

use crate::to_storage_err;

/// Load one knowledge document.
pub fn get_knowledge(
    conn: &Connection,
    key: &CategoryKey,
) -> PricingResult<Option<PricingKnowledge>> {
    let row: Option<(u32, i64, String)> = conn
        .query_row(
            "SELECT schema_version, version, document FROM pricing_knowledge
             WHERE contractor_id = ?1 AND category = ?2",
            params![key.contractor_id, key.category],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(format!("get_knowledge: {e}")))?;

    row.map(|(schema_version, version, document)| decode(schema_version, version, &document))
        .transpose()
}

/// Write a knowledge document if the stored version equals `expected_version`.
/// Returns the new version.
pub fn save_knowledge(
    conn: &Connection,
    knowledge: &PricingKnowledge,
    expected_version: u64,
) -> PricingResult<u64> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("save_knowledge begin: {e}")))?;

    match save_knowledge_inner(&tx, knowledge, expected_version) {
        Ok(version) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("save_knowledge commit: {e}")))?;
            Ok(version)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn save_knowledge_inner(
    conn: &Connection,
    knowledge: &PricingKnowledge,
    expected_version: u64,
) -> PricingResult<u64> {
    let key = &knowledge.key;
    let actual = stored_version(conn, key)?.unwrap_or(0);
    if actual != expected_version {
        return Err(PricingError::ConcurrentModification {
            key: key.to_string(),
            expected: expected_version,
            actual,
        });
    }

    let new_version = expected_version + 1;
    let mut document = knowledge.clone();
    document.version = new_version;
    document.schema_version = KNOWLEDGE_SCHEMA_VERSION;
    let json = serde_json::to_string(&document)?;

    conn.execute(
        "INSERT INTO pricing_knowledge (
            contractor_id, category, schema_version, version, document, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT (contractor_id, category) DO UPDATE SET
            schema_version = excluded.schema_version,
            version = excluded.version,
            document = excluded.document,
            updated_at = excluded.updated_at",
        params![
            key.contractor_id,
            key.category,
            KNOWLEDGE_SCHEMA_VERSION,
            new_version as i64,
            json,
            document.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(format!("save_knowledge: {e}")))?;

    Ok(new_version)
}

/// Delete one knowledge document. Historical totals are kept.
pub fn delete_knowledge(conn: &Connection, key: &CategoryKey) -> PricingResult<bool> {
    let removed = conn
        .execute(
            "DELETE FROM pricing_knowledge WHERE contractor_id = ?1 AND category = ?2",
            params![key.contractor_id, key.category],
        )
        .map_err(|e| to_storage_err(format!("delete_knowledge: {e}")))?;
    Ok(removed > 0)
}

/// All knowledge documents of a contractor, ordered by category.
pub fn list_knowledge(
    conn: &Connection,
    contractor_id: &str,
) -> PricingResult<Vec<PricingKnowledge>> {
    let mut stmt = conn
        .prepare(
            "SELECT schema_version, version, document FROM pricing_knowledge
             WHERE contractor_id = ?1 ORDER BY category",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![contractor_id], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?, row.get::<_, String>(2)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut entries = Vec::new();
    for row in rows {
        let (schema_version, version, document) = row.map_err(|e| to_storage_err(e.to_string()))?;
        entries.push(decode(schema_version, version, &document)?);
    }
    Ok(entries)
}

fn stored_version(conn: &Connection, key: &CategoryKey) -> PricingResult<Option<u64>> {
    conn.query_row(
        "SELECT version FROM pricing_knowledge WHERE contractor_id = ?1 AND category = ?2",
        params![key.contractor_id, key.category],
        |row| row.get::<_, i64>(0),
    )
    .optional()
    .map(|v| v.map(|v| v as u64))
    .map_err(|e| to_storage_err(format!("stored_version: {e}")))
}

fn decode(schema_version: u32, version: i64, document: &str) -> PricingResult<PricingKnowledge> {
    if schema_version > KNOWLEDGE_SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchema {
            found: schema_version,
            supported: KNOWLEDGE_SCHEMA_VERSION,
        }
        .into());
    }
    let mut knowledge: PricingKnowledge = serde_json::from_str(document)?;
    // The column is authoritative for optimistic checks.
    knowledge.version = version as u64;
    Ok(knowledge)
}
