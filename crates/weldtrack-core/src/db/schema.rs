//! Canonical SQLite schema for the record store.
//!
//! Four record collections plus store metadata:
//! - `workers` holds registered workers
//! - `production_entries` holds one row per `(worker, article, month)`,
//!   enforced by a unique index so live adds must merge, never duplicate
//! - `norms` holds per-article time norms; `article` is unique and
//!   case-sensitive, and its index backs the prefix suggestion lookup
//! - `history_entries` is the append-only ledger of quantity changes;
//!   its ids deliberately carry no foreign keys so ledger rows survive
//!   references that stop resolving
//! - `store_meta` tracks the schema version alongside `PRAGMA user_version`

/// Migration v1: all record tables, indexes, and store metadata.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS workers (
    worker_id TEXT PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0)
);

CREATE TABLE IF NOT EXISTS production_entries (
    entry_id TEXT PRIMARY KEY,
    worker_id TEXT NOT NULL,
    article TEXT NOT NULL CHECK (length(trim(article)) > 0),
    quantity INTEGER NOT NULL CHECK (quantity >= 0),
    month TEXT NOT NULL,
    date TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_worker_article_month
    ON production_entries(worker_id, article, month);

CREATE INDEX IF NOT EXISTS idx_entries_month
    ON production_entries(month);

CREATE INDEX IF NOT EXISTS idx_entries_worker
    ON production_entries(worker_id);

CREATE TABLE IF NOT EXISTS norms (
    norm_id TEXT PRIMARY KEY,
    article TEXT NOT NULL UNIQUE CHECK (length(trim(article)) > 0),
    time_label TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_norms_article
    ON norms(article);

CREATE TABLE IF NOT EXISTS history_entries (
    history_id TEXT PRIMARY KEY,
    worker_id TEXT NOT NULL,
    entry_id TEXT NOT NULL,
    article TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    action TEXT NOT NULL CHECK (action IN ('created', 'added', 'modified')),
    date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_history_entry_worker
    ON history_entries(entry_id, worker_id);

CREATE INDEX IF NOT EXISTS idx_history_worker
    ON history_entries(worker_id);

CREATE TABLE IF NOT EXISTS store_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO store_meta (id, schema_version) VALUES (1, 1);
";

/// Indexes that must exist after migration; checked by schema tests.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_entries_worker_article_month",
    "idx_entries_month",
    "idx_entries_worker",
    "idx_norms_article",
    "idx_history_entry_worker",
    "idx_history_worker",
];
