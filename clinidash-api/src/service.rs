//! Dataset-backed dashboard operations
//!
//! Each call re-reads the snapshot through [`DatasetReader`]; nothing is
//! cached between calls.

use chrono::{DateTime, Utc};
use clinidash_common::{DatasetReader, Result};
use tracing::debug;

use crate::aggregation::{get_dashboard_data, Summary};
use crate::pagination::{get_patient_sentiment, PatientPage, QueryNumber};
use crate::timeframe::Timeframe;

/// Source of "now" for timeframe windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Wall clock
    System,
    /// Frozen instant
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => clinidash_common::time::now(),
            Clock::Fixed(instant) => *instant,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    reader: DatasetReader,
    clock: Clock,
}

impl DashboardService {
    pub fn new(reader: DatasetReader, clock: Clock) -> Self {
        Self { reader, clock }
    }

    /// Dashboard summary for `timeframe`
    ///
    /// Fails only when the snapshot cannot be read or parsed.
    pub fn dashboard(&self, timeframe: &Timeframe) -> Result<Summary> {
        let dataset = self.reader.read()?;
        let summary = get_dashboard_data(&dataset, timeframe, self.clock.now());
        debug!(
            ?timeframe,
            meetings = summary.meetings,
            tasks = summary.tasks,
            likes = summary.likes,
            "Computed dashboard summary"
        );
        Ok(summary)
    }

    /// One page of the (optionally sentiment-filtered) patient roster
    pub fn patient_sentiment(
        &self,
        page: QueryNumber,
        limit: QueryNumber,
        sentiment: Option<&str>,
    ) -> Result<PatientPage> {
        let dataset = self.reader.read()?;
        let result = get_patient_sentiment(&dataset, page, limit, sentiment);
        debug!(
            ?page,
            ?limit,
            sentiment,
            total = result.total,
            returned = result.data.len(),
            "Paginated patient sentiment"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn service_for(content: &str, clock: Clock) -> (tempfile::NamedTempFile, DashboardService) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        let service = DashboardService::new(DatasetReader::new(file.path()), clock);
        (file, service)
    }

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2023, 12, 20, 10, 0, 0).unwrap();
        assert_eq!(Clock::Fixed(instant).now(), instant);
    }

    #[test]
    fn test_dashboard_uses_injected_clock() {
        let content = r#"{"liveCalls": [{"createdAt": "2023-12-15T10:00:00Z"}, {"createdAt": "2023-11-01T10:00:00Z"}]}"#;
        let december = Clock::Fixed(Utc.with_ymd_and_hms(2023, 12, 20, 10, 0, 0).unwrap());
        let (_file, service) = service_for(content, december);

        assert_eq!(service.dashboard(&Timeframe::Weekly).unwrap().meetings, 1);
        assert_eq!(service.dashboard(&Timeframe::All).unwrap().meetings, 2);
    }

    #[test]
    fn test_dashboard_is_idempotent() {
        let content = r#"{"liveCalls": [{"createdAt": "2023-12-15T10:00:00Z"}], "likes": [{"createdAt": "2023-12-16"}]}"#;
        let (_file, service) = service_for(content, Clock::System);

        let first = service.dashboard(&Timeframe::Yearly).unwrap();
        let second = service.dashboard(&Timeframe::Yearly).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_read_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let service = DashboardService::new(
            DatasetReader::new(dir.path().join("DataSet.json")),
            Clock::System,
        );

        assert!(service.dashboard(&Timeframe::All).unwrap_err().is_read_failure());
        assert!(service
            .patient_sentiment(QueryNumber::Number(1), QueryNumber::Number(10), None)
            .unwrap_err()
            .is_read_failure());
    }

    #[test]
    fn test_parse_failure_propagates() {
        let (_file, service) = service_for("invalid json", Clock::System);

        assert!(service.dashboard(&Timeframe::All).unwrap_err().is_parse_failure());
        assert!(service
            .patient_sentiment(QueryNumber::Number(1), QueryNumber::Number(10), None)
            .unwrap_err()
            .is_parse_failure());
    }
}
