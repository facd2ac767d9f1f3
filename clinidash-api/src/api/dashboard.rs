//! Dashboard summary endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use super::{query_value, run_blocking, ApiError};
use crate::aggregation::Summary;
use crate::timeframe::Timeframe;
use crate::AppState;

/// Query parameters for the dashboard summary
#[derive(Debug, Default)]
pub struct DashboardQuery {
    /// `weekly`, `monthly`, `yearly` or `all`; anything else means all time
    pub timeframe: Option<String>,
}

impl DashboardQuery {
    /// Build from raw query pairs; repeated keys are joined, never rejected
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            timeframe: query_value(pairs, "timeframe"),
        }
    }
}

/// GET /api/dashboard
///
/// Returns activity counts for the requested timeframe plus the current
/// satisfaction rosters.
pub async fn get_dashboard_data(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Summary>, ApiError> {
    let query = DashboardQuery::from_pairs(&pairs);
    let timeframe = Timeframe::parse(query.timeframe.as_deref());
    let service = state.service.clone();

    run_blocking(move || service.dashboard(&timeframe))
        .await
        .map(Json)
        .map_err(ApiError::Dashboard)
}
