//! v001: pricing knowledge documents and historical totals.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS pricing_knowledge (
    contractor_id   TEXT    NOT NULL,
    category        TEXT    NOT NULL,
    schema_version  INTEGER NOT NULL,
    version         INTEGER NOT NULL,
    document        TEXT    NOT NULL,
    updated_at      TEXT    NOT NULL,
    PRIMARY KEY (contractor_id, category)
);

CREATE TABLE IF NOT EXISTS historical_totals (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    contractor_id   TEXT    NOT NULL,
    category        TEXT    NOT NULL,
    total           REAL    NOT NULL,
    recorded_at     TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_historical_totals_key
    ON historical_totals (contractor_id, category);
";
