//! v001: entity_links, sync_state.

pub const MIGRATION_SQL: &str = "
CREATE TABLE IF NOT EXISTS entity_links (
    external_id TEXT PRIMARY KEY,
    local_id    TEXT NOT NULL UNIQUE,
    linked_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS sync_state (
    local_id            TEXT PRIMARY KEY,
    last_push_ms        INTEGER,
    last_pushed_minutes INTEGER NOT NULL DEFAULT 0
);
";
