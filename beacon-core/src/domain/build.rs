//! Build domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One execution attempt of a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub job_id: Uuid,
    /// Sequence number within the job, starting at 1
    pub number: u32,
    pub status: BuildStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Build execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Pending,
    Started,
    Succeeded,
    Failed,
    Errored,
    Aborted,
}

impl BuildStatus {
    /// Whether the build has finished and will not change status again
    pub fn is_terminal(self) -> bool {
        match self {
            BuildStatus::Succeeded
            | BuildStatus::Failed
            | BuildStatus::Errored
            | BuildStatus::Aborted => true,
            BuildStatus::Pending | BuildStatus::Started => false,
        }
    }

    /// Part of an unresolved failure streak when scanning history backward
    pub fn is_unsuccessful(self) -> bool {
        matches!(
            self,
            BuildStatus::Failed | BuildStatus::Errored | BuildStatus::Aborted
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BuildStatus::Pending => "pending",
            BuildStatus::Started => "started",
            BuildStatus::Succeeded => "succeeded",
            BuildStatus::Failed => "failed",
            BuildStatus::Errored => "errored",
            BuildStatus::Aborted => "aborted",
        }
    }

    /// Parses the lowercase status name used by the fact store
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BuildStatus::Pending),
            "started" => Some(BuildStatus::Started),
            "succeeded" => Some(BuildStatus::Succeeded),
            "failed" => Some(BuildStatus::Failed),
            "errored" => Some(BuildStatus::Errored),
            "aborted" => Some(BuildStatus::Aborted),
            _ => None,
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Build {
    /// Whether the record respects the build invariants
    ///
    /// The end time is set exactly when the status is terminal and never
    /// precedes the start time. A build aborted before it started has an end
    /// time but no start time.
    pub fn is_consistent(&self) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end < start => false,
            (_, Some(_)) => self.status.is_terminal(),
            (_, None) => !self.status.is_terminal(),
        }
    }

    /// Status used for aggregation; inconsistent records count as errored
    pub fn effective_status(&self) -> BuildStatus {
        if self.is_consistent() {
            self.status
        } else {
            BuildStatus::Errored
        }
    }

    /// Earliest known timestamp of the build
    pub fn began_at(&self) -> Option<DateTime<Utc>> {
        self.start_time.or(self.end_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn build(status: BuildStatus, start: Option<i64>, end: Option<i64>) -> Build {
        let at = |secs| Utc.timestamp_opt(1_499_245_505 + secs, 0).unwrap();
        Build {
            job_id: Uuid::nil(),
            number: 1,
            status,
            start_time: start.map(at),
            end_time: end.map(at),
        }
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(BuildStatus::Succeeded.is_terminal());
        assert!(BuildStatus::Aborted.is_terminal());
        assert!(!BuildStatus::Started.is_terminal());
        assert!(!BuildStatus::Pending.is_terminal());
    }

    #[test]
    fn test_end_before_start_is_errored() {
        let b = build(BuildStatus::Succeeded, Some(10), Some(5));
        assert!(!b.is_consistent());
        assert_eq!(b.effective_status(), BuildStatus::Errored);
    }

    #[test]
    fn test_end_time_on_running_build_is_errored() {
        let b = build(BuildStatus::Started, Some(10), Some(12));
        assert_eq!(b.effective_status(), BuildStatus::Errored);
    }

    #[test]
    fn test_finished_build_without_end_time_is_errored() {
        let failed = build(BuildStatus::Failed, None, None);
        assert!(!failed.is_consistent());
        assert_eq!(failed.effective_status(), BuildStatus::Errored);

        let succeeded = build(BuildStatus::Succeeded, Some(0), None);
        assert_eq!(succeeded.effective_status(), BuildStatus::Errored);
    }

    #[test]
    fn test_unfinished_build_without_end_time_is_consistent() {
        assert!(build(BuildStatus::Started, Some(0), None).is_consistent());
        assert!(build(BuildStatus::Pending, None, None).is_consistent());
    }

    #[test]
    fn test_aborted_before_start_is_consistent() {
        let b = build(BuildStatus::Aborted, None, Some(3));
        assert!(b.is_consistent());
        assert_eq!(b.began_at(), b.end_time);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for status in [
            BuildStatus::Pending,
            BuildStatus::Started,
            BuildStatus::Succeeded,
            BuildStatus::Failed,
            BuildStatus::Errored,
            BuildStatus::Aborted,
        ] {
            assert_eq!(BuildStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BuildStatus::parse("exploded"), None);
    }
}
