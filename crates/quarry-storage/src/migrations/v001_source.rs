//! V001: source corpus.
//! documents, instances, instance_appearances.

pub const MIGRATION_SQL: &str = r#"
-- Documents with their raw text and any further properties (JSON object).
CREATE TABLE IF NOT EXISTS documents (
    doc_id INTEGER PRIMARY KEY,
    tokens TEXT,
    properties TEXT NOT NULL DEFAULT '{}'
) STRICT;

-- Entity instances. labels is a JSON array ordered root to leaf.
CREATE TABLE IF NOT EXISTS instances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    labels TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_instances_name ON instances(name);

-- instance -[APPEARS_IN]-> document, one row per occurrence.
CREATE TABLE IF NOT EXISTS instance_appearances (
    instance_id INTEGER NOT NULL REFERENCES instances(id) ON DELETE CASCADE,
    doc_id INTEGER NOT NULL REFERENCES documents(doc_id) ON DELETE CASCADE,
    position INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE INDEX IF NOT EXISTS idx_appearances_doc
    ON instance_appearances(doc_id, position);
"#;
