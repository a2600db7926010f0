//! Schema creation
//!
//! Creates the `timesheets` table on startup. The unique index follows the
//! configured date uniqueness scope; switching scopes drops the other index.

use sqlx::PgPool;
use ts_core::config::DateUniqueness;

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS timesheets (
    id UUID PRIMARY KEY,
    cost_id TEXT NOT NULL,
    date DATE NOT NULL,
    day_type TEXT NOT NULL CHECK (day_type IN ('working', 'sick', 'vacation')),
    working_hours INTEGER NOT NULL CHECK (working_hours >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const CREATE_COST_ID_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_timesheets_cost_id_date ON timesheets (cost_id, date)";

const GLOBAL_INDEX: &str = "timesheets_date_key";
const PER_COST_ID_INDEX: &str = "timesheets_cost_id_date_key";

/// Statements that bring the schema in line with a uniqueness scope
pub fn statements(uniqueness: DateUniqueness) -> Vec<String> {
    let (keep, drop) = match uniqueness {
        DateUniqueness::Global => (
            format!("CREATE UNIQUE INDEX IF NOT EXISTS {} ON timesheets (date)", GLOBAL_INDEX),
            PER_COST_ID_INDEX,
        ),
        DateUniqueness::PerCostId => (
            format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON timesheets (cost_id, date)",
                PER_COST_ID_INDEX
            ),
            GLOBAL_INDEX,
        ),
    };

    vec![
        CREATE_TABLE.trim().to_string(),
        CREATE_COST_ID_INDEX.to_string(),
        format!("DROP INDEX IF EXISTS {}", drop),
        keep,
    ]
}

/// Create the table and indexes if they do not exist
pub async fn ensure_schema(pool: &PgPool, uniqueness: DateUniqueness) -> Result<(), sqlx::Error> {
    for statement in statements(uniqueness) {
        sqlx::query(&statement).execute(pool).await?;
    }

    tracing::info!(?uniqueness, "Timesheet schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_scope_indexes_date_only() {
        let statements = statements(DateUniqueness::Global);
        assert!(statements.iter().any(|s| s.contains("ON timesheets (date)")));
        assert!(statements.iter().any(|s| s == "DROP INDEX IF EXISTS timesheets_cost_id_date_key"));
    }

    #[test]
    fn test_per_cost_id_scope() {
        let statements = statements(DateUniqueness::PerCostId);
        assert!(statements
            .iter()
            .any(|s| s.starts_with("CREATE UNIQUE INDEX") && s.contains("(cost_id, date)")));
        assert!(statements.iter().any(|s| s == "DROP INDEX IF EXISTS timesheets_date_key"));
    }
}
