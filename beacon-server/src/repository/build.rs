//! Build Repository
//!
//! Loads build histories for a set of jobs.

use beacon_core::domain::build::{Build, BuildStatus};
use sqlx::PgConnection;
use uuid::Uuid;

/// List every build of the given jobs, oldest first
pub async fn list_for_jobs(
    conn: &mut PgConnection,
    job_ids: &[Uuid],
) -> Result<Vec<Build>, sqlx::Error> {
    if job_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, BuildRow>(
        r#"
        SELECT job_id, number, status, start_time, end_time
        FROM builds
        WHERE job_id = ANY($1)
        ORDER BY job_id, number ASC
        "#,
    )
    .bind(job_ids)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Unknown status strings are malformed records and count as errored
fn string_to_status(s: &str) -> BuildStatus {
    BuildStatus::parse(s).unwrap_or_else(|| {
        tracing::warn!("Unknown build status '{}', treating as errored", s);
        BuildStatus::Errored
    })
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct BuildRow {
    job_id: Uuid,
    number: i32,
    status: String,
    start_time: Option<chrono::DateTime<chrono::Utc>>,
    end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<BuildRow> for Build {
    fn from(row: BuildRow) -> Self {
        Build {
            job_id: row.job_id,
            number: row.number.max(0) as u32,
            status: string_to_status(&row.status),
            start_time: row.start_time,
            end_time: row.end_time,
        }
    }
}
