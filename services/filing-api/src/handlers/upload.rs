//! Filing Upload Handler
//!
//! Accepts a multipart CSV of sales transactions and runs the full
//! processing pipeline: parse, normalize, aggregate, analyze, compose,
//! render, store.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Serialize;

use crate::engine;
use crate::handlers::error_response;
use crate::planner;
use crate::store::FilingDraft;
use crate::AppState;
use gstflow_models::Filing;
use gstflow_utils::{
    validate_file_size, validate_file_type, GstResult, RecordNormalizer, SalesCsvParser,
};

/// Filing upload response
#[derive(Debug, Serialize)]
pub struct FilingUploadResponse {
    pub filing: Filing,
    pub warnings: Vec<String>,
}

/// Upload and process a sales CSV
///
/// POST /api/v1/filings/upload
pub async fn upload_filing(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FilingUploadResponse>, (StatusCode, String)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read upload: {}", e)))?
        .ok_or((StatusCode::BAD_REQUEST, "No file provided".to_string()))?;

    let filename = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "sales.csv".to_string());

    let data = field.bytes().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read file data: {}", e),
        )
    })?;

    validate_file_type(&filename, &["csv"]).map_err(error_response)?;
    validate_file_size(data.len() as u64, state.config.server.max_request_size as u64)
        .map_err(error_response)?;

    let (filing, warnings) = process_upload(&state, &filename, &data)
        .await
        .map_err(error_response)?;

    Ok(Json(FilingUploadResponse { filing, warnings }))
}

/// Full pipeline from raw CSV bytes to a stored filing. Returns the
/// stored filing along with any row-level parse warnings.
pub(crate) async fn process_upload(
    state: &AppState,
    filename: &str,
    data: &[u8],
) -> GstResult<(Filing, Vec<String>)> {
    let parsed = SalesCsvParser::new().parse_bytes(filename, data)?;
    let records = RecordNormalizer::new().normalize(&parsed.rows);

    let calculation = engine::aggregate(&records);
    let analysis = engine::analyze(&records, &calculation)?;

    let mut plan = planner::compose(&analysis, Utc::now().date_naive());
    let knowledge = state.retriever.retrieve(
        &planner::knowledge_query(&analysis),
        state.config.knowledge.max_results,
    );
    let (advisory, source) = state
        .advisor
        .compliance_advisory(&analysis, &plan, &knowledge)
        .await;
    plan.advisory = advisory;
    plan.advisory_source = source;

    let documents = state.documents.render_all(filename, &calculation, &plan);

    let filing = state
        .store
        .insert(FilingDraft {
            filename: filename.to_string(),
            records,
            calculation,
            analysis,
            plan,
            documents,
        })
        .await;

    tracing::info!(
        filing_id = filing.id,
        records = filing.records.len(),
        total_tax = filing.calculation.total_tax,
        "Processed sales upload"
    );

    Ok((filing, parsed.parse_warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::{Advisor, LlmClient, TemplateAdvisor};
    use crate::test_state;
    use gstflow_models::AdvisorySource;
    use gstflow_utils::AdvisorConfig;
    use std::sync::Arc;

    const SAMPLE_CSV: &[u8] =
        b"amount,tax_rate,state,product\n1000,18,Home State,Soap\n2000,18,Other,Soap";

    #[tokio::test]
    async fn test_pipeline_produces_stored_filing() {
        let state = test_state();

        let (filing, warnings) = process_upload(&state, "sales.csv", SAMPLE_CSV)
            .await
            .unwrap();

        assert!(warnings.is_empty());
        assert_eq!(filing.calculation.total_sales, 3000.0);
        assert_eq!(filing.calculation.total_tax, 540.0);
        assert_eq!(
            filing.calculation.total_tax,
            filing.calculation.cgst + filing.calculation.sgst + filing.calculation.igst
        );
        assert!(!filing.plan.advisory.is_empty());
        assert_eq!(filing.documents.len(), 2);

        let stored = state.store.get(filing.id).await.unwrap();
        assert_eq!(stored, filing);
    }

    #[tokio::test]
    async fn test_empty_dataset_is_rejected() {
        let state = test_state();

        let err = process_upload(&state, "sales.csv", b"amount,tax_rate,state,product\n")
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "EMPTY_DATASET");
        assert_eq!(state.store.count().await, 0);
    }

    #[tokio::test]
    async fn test_failing_generator_falls_back_to_template() {
        // Point the external client at a closed port so every call fails.
        let mut state = test_state();
        let config = AdvisorConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            max_tokens: 64,
            temperature: 0.0,
            timeout_seconds: 1,
        };
        state.advisor = Arc::new(Advisor::Llm {
            client: LlmClient::new(&config, "test-key".to_string()).unwrap(),
            fallback: TemplateAdvisor::new(),
        });

        let (filing, _) = process_upload(&state, "sales.csv", SAMPLE_CSV)
            .await
            .unwrap();

        assert_eq!(filing.plan.advisory_source, AdvisorySource::Template);
        assert!(!filing.plan.advisory.is_empty());
        assert_eq!(filing.plan.applicable_returns, vec!["GSTR-1", "GSTR-3B"]);
        assert_eq!(filing.plan.deadlines.len(), 3);
    }
}
