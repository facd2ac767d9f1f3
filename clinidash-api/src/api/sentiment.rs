//! Patient sentiment endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use super::{query_value, run_blocking, ApiError};
use crate::pagination::{PatientPage, QueryNumber, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::AppState;

/// Raw query parameters for patient sentiment
///
/// `page` and `limit` stay strings here so that malformed values reach
/// [`QueryNumber::parse`] instead of being rejected by the extractor.
#[derive(Debug, Default)]
pub struct SentimentQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sentiment: Option<String>,
}

impl SentimentQuery {
    /// Build from raw query pairs; repeated keys are joined, never rejected
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: query_value(pairs, "page"),
            limit: query_value(pairs, "limit"),
            sentiment: query_value(pairs, "sentiment"),
        }
    }
}

/// GET /api/dashboard/sentiment/patients
///
/// Returns one page of the patient roster, optionally filtered by exact
/// satisfaction value. Missing `page`/`limit` default to 1 and 10.
pub async fn get_patient_sentiment(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PatientPage>, ApiError> {
    let query = SentimentQuery::from_pairs(&pairs);
    let page = QueryNumber::from_param(query.page.as_deref(), DEFAULT_PAGE);
    let limit = QueryNumber::from_param(query.limit.as_deref(), DEFAULT_LIMIT);
    let service = state.service.clone();

    run_blocking(move || service.patient_sentiment(page, limit, query.sentiment.as_deref()))
        .await
        .map(Json)
        .map_err(ApiError::PatientSentiment)
}
