//! Filing Read Handlers
//!
//! Read-only access to the in-memory filing store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::handlers::error_response;
use crate::AppState;
use gstflow_models::{Filing, FilingSummary};
use gstflow_utils::GstError;

/// List all filings
///
/// GET /api/v1/filings
pub async fn list_filings(State(state): State<AppState>) -> Json<Vec<FilingSummary>> {
    Json(state.store.list().await)
}

/// Fetch one filing in full
///
/// GET /api/v1/filings/:id
pub async fn get_filing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Filing>, (StatusCode, String)> {
    match state.store.get(id).await {
        Some(filing) => Ok(Json(filing)),
        None => Err(error_response(GstError::not_found(format!("filing {}", id)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::upload::process_upload;
    use crate::test_state;
    use axum::extract::{Path, State};

    #[tokio::test]
    async fn test_list_and_get_roundtrip() {
        let state = test_state();
        let csv = b"amount,tax_rate,state,product\n1000,18,Home State,Soap";
        let (filing, _) = process_upload(&state, "sales.csv", csv).await.unwrap();

        let listed = list_filings(State(state.clone())).await;
        assert_eq!(listed.0.len(), 1);
        assert_eq!(listed.0[0].id, filing.id);

        let fetched = get_filing(State(state), Path(filing.id)).await.unwrap();
        assert_eq!(fetched.0.id, filing.id);
    }

    #[tokio::test]
    async fn test_missing_filing_is_not_found() {
        let state = test_state();

        let (status, message) = get_filing(State(state), Path(42)).await.unwrap_err();

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(message.contains("filing 42"));
    }
}
