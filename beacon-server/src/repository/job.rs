//! Job Repository
//!
//! Loads the jobs of a set of pipelines.

use beacon_core::domain::job::Job;
use sqlx::PgConnection;
use uuid::Uuid;

/// List jobs belonging to any of `pipeline_ids`, in configured order
pub async fn list_for_pipelines(
    conn: &mut PgConnection,
    pipeline_ids: &[Uuid],
) -> Result<Vec<Job>, sqlx::Error> {
    if pipeline_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, pipeline_id, name
        FROM jobs
        WHERE pipeline_id = ANY($1)
        ORDER BY pipeline_id, ordering ASC, name ASC
        "#,
    )
    .bind(pipeline_ids)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    pipeline_id: Uuid,
    name: String,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            pipeline_id: row.pipeline_id,
            name: row.name,
            builds: Vec::new(),
        }
    }
}
