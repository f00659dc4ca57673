//! Pipeline Repository
//!
//! Loads the pipelines a viewer is allowed to see.

use beacon_core::domain::pipeline::Pipeline;
use sqlx::PgConnection;
use uuid::Uuid;

/// List pipelines owned by `viewer_team` plus every exposed pipeline
///
/// Anonymous viewers pass `None` and only get exposed pipelines.
pub async fn list_visible(
    conn: &mut PgConnection,
    viewer_team: Option<&str>,
) -> Result<Vec<Pipeline>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PipelineRow>(
        r#"
        SELECT p.id, t.name AS team, p.name, p.paused, p.exposed
        FROM pipelines p
        JOIN teams t ON t.id = p.team_id
        WHERE p.exposed OR t.name = $1
        ORDER BY t.name ASC, p.ordering ASC, p.name ASC
        "#,
    )
    .bind(viewer_team)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct PipelineRow {
    id: Uuid,
    team: String,
    name: String,
    paused: bool,
    exposed: bool,
}

impl From<PipelineRow> for Pipeline {
    fn from(row: PipelineRow) -> Self {
        Pipeline {
            id: row.id,
            team: row.team,
            name: row.name,
            paused: row.paused,
            exposed: row.exposed,
            jobs: Vec::new(),
        }
    }
}
