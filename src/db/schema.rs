/// Schema for the local store. Applied on every open.
pub const SCHEMA: &str = r#"
-- Last known-good payload per resource
CREATE TABLE IF NOT EXISTS resource_cache (
    name TEXT PRIMARY KEY,
    payload BLOB NOT NULL,
    fingerprint TEXT,
    digest TEXT NOT NULL,
    cached_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Small user settings (e.g. preferred language)
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
