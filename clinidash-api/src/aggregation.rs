//! Dashboard summary aggregation
//!
//! Activity collections (live calls, communication, tasks, likes) are windowed
//! by `createdAt`; the satisfaction rosters are a current-state snapshot and
//! are returned unfiltered for every timeframe.

use chrono::{DateTime, Utc};
use clinidash_common::dataset::{CommunicationKind, Timestamped};
use clinidash_common::{Dataset, RosterEntry};
use serde::Serialize;

use crate::timeframe::Timeframe;

/// Minutes saved per meeting
pub const MINUTES_SAVED_PER_MEETING: usize = 5;

/// Dashboard summary response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub meetings: usize,
    pub brushing: usize,
    pub instructions_sent: usize,
    pub tasks: usize,
    pub time_saved: usize,
    pub patients_satisfaction: Vec<RosterEntry>,
    pub employees_satisfaction: Vec<RosterEntry>,
    pub likes: usize,
}

/// Compute the dashboard summary for `timeframe` relative to `now`
pub fn get_dashboard_data(dataset: &Dataset, timeframe: &Timeframe, now: DateTime<Utc>) -> Summary {
    let start_date = timeframe.start_date(now);

    let meetings = in_window(&dataset.live_calls, start_date).count();
    let count_kind = |kind: CommunicationKind| {
        in_window(&dataset.communication, start_date)
            .filter(|c| c.kind() == Some(kind))
            .count()
    };

    Summary {
        meetings,
        brushing: count_kind(CommunicationKind::Brushing),
        instructions_sent: count_kind(CommunicationKind::Instructions),
        tasks: in_window(&dataset.tasks, start_date).count(),
        time_saved: meetings * MINUTES_SAVED_PER_MEETING,
        patients_satisfaction: dataset.patients().to_vec(),
        employees_satisfaction: dataset.employees().to_vec(),
        likes: in_window(&dataset.likes, start_date).count(),
    }
}

/// Items created at or after `start_date`; invalid timestamps never match
fn in_window<T: Timestamped>(
    items: &[T],
    start_date: DateTime<Utc>,
) -> impl Iterator<Item = &T> + '_ {
    items
        .iter()
        .filter(move |item| item.created_at().is_some_and(|created| created >= start_date))
}
