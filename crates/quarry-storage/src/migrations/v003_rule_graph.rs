//! V003: rule graph.
//! q_rules, q_antecedents, q_consequents.

pub const MIGRATION_SQL: &str = r#"
-- rule_id is the rule's position in the ranked output.
CREATE TABLE IF NOT EXISTS q_rules (
    rule_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    short_name TEXT NOT NULL,
    confidence REAL NOT NULL,
    support REAL NOT NULL,
    lift REAL NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_rules_lift ON q_rules(lift DESC);

-- entity -[ANTE]-> rule
CREATE TABLE IF NOT EXISTS q_antecedents (
    entity TEXT NOT NULL REFERENCES q_entities(name) ON DELETE CASCADE,
    rule_id INTEGER NOT NULL REFERENCES q_rules(rule_id) ON DELETE CASCADE,
    PRIMARY KEY (entity, rule_id)
) STRICT;

-- entity -[CONS]-> rule
CREATE TABLE IF NOT EXISTS q_consequents (
    entity TEXT NOT NULL REFERENCES q_entities(name) ON DELETE CASCADE,
    rule_id INTEGER NOT NULL REFERENCES q_rules(rule_id) ON DELETE CASCADE,
    PRIMARY KEY (entity, rule_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_antecedents_rule ON q_antecedents(rule_id);
CREATE INDEX IF NOT EXISTS idx_consequents_rule ON q_consequents(rule_id);
"#;
