//! HTTP API handlers for clinidash-api

pub mod dashboard;
pub mod error;
pub mod health;
pub mod sentiment;

pub use dashboard::get_dashboard_data;
pub use error::ApiError;
pub use health::health_routes;
pub use sentiment::get_patient_sentiment;

use clinidash_common::{Error, Result};

/// Run a dataset operation off the async worker threads
async fn run_blocking<T, F>(operation: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(operation)
        .await
        .map_err(|e| Error::Internal(format!("Dataset task failed: {}", e)))?
}

/// Value of `key` in the raw query pairs
///
/// A key given more than once yields its values joined with `,`, so
/// `?timeframe=weekly&timeframe=monthly` reads as `"weekly,monthly"` and
/// falls through to the unrecognized-token handling instead of being rejected.
fn query_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    let values: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
