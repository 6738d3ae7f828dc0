//! V002: transaction graph.
//! q_documents, q_entities, q_child_of, q_appears_in.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS q_documents (
    doc_id INTEGER PRIMARY KEY,
    tokens TEXT,
    properties TEXT NOT NULL DEFAULT '{}'
) STRICT;

-- One node per category label; short_name is the leaf segment.
CREATE TABLE IF NOT EXISTS q_entities (
    name TEXT PRIMARY KEY,
    short_name TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS q_child_of (
    child TEXT NOT NULL REFERENCES q_entities(name) ON DELETE CASCADE,
    parent TEXT NOT NULL REFERENCES q_entities(name) ON DELETE CASCADE,
    PRIMARY KEY (child, parent)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_child_of_parent ON q_child_of(parent);

-- leaf entity -[APPEARS_IN]-> document
CREATE TABLE IF NOT EXISTS q_appears_in (
    entity TEXT NOT NULL REFERENCES q_entities(name) ON DELETE CASCADE,
    doc_id INTEGER NOT NULL REFERENCES q_documents(doc_id) ON DELETE CASCADE,
    PRIMARY KEY (entity, doc_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_appears_in_doc ON q_appears_in(doc_id);
"#;
