//! Team Repository
//!
//! Loads teams from the fact store.

use beacon_core::domain::team::Team;
use sqlx::PgConnection;
use uuid::Uuid;

/// List all teams, without their pipelines
pub async fn list_all(conn: &mut PgConnection) -> Result<Vec<Team>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeamRow>(
        r#"
        SELECT id, name
        FROM teams
        ORDER BY name ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
            pipelines: Vec::new(),
        }
    }
}
