//! Assistant Handler
//!
//! Free-text GST questions answered from the knowledge corpus, with the
//! advisor capability composing the final answer text.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::handlers::error_response;
use crate::AppState;
use gstflow_models::AdvisorySource;
use gstflow_utils::validate_model;

#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 500, message = "Question must be 1-500 characters"))]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub answer_source: AdvisorySource,
    pub sources: Vec<SourceReference>,
}

/// Document id and relevance score backing an answer.
#[derive(Debug, Serialize)]
pub struct SourceReference {
    pub id: String,
    pub score: f64,
}

/// Ask the GST assistant a question
///
/// POST /api/v1/assistant/ask
pub async fn ask_assistant(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    validate_model(&request).map_err(error_response)?;

    let ranked = state
        .retriever
        .retrieve(&request.question, state.config.knowledge.max_results);
    let (answer, answer_source) = state
        .advisor
        .assistant_answer(&request.question, &ranked)
        .await;

    let sources = ranked
        .iter()
        .map(|r| SourceReference {
            id: r.document.id.clone(),
            score: r.score,
        })
        .collect();

    Ok(Json(AskResponse {
        answer,
        answer_source,
        sources,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_state;
    use axum::extract::State;

    #[tokio::test]
    async fn test_question_with_corpus_match() {
        let state = test_state();
        let request = AskRequest {
            question: "Am I eligible for the composition scheme?".to_string(),
        };

        let Json(response) = ask_assistant(State(state), Json(request)).await.unwrap();

        assert!(!response.sources.is_empty());
        assert_eq!(response.sources[0].id, "composition-scheme");
        assert!(response.answer.contains("Composition Scheme"));
    }

    #[tokio::test]
    async fn test_question_with_no_match() {
        let state = test_state();
        let request = AskRequest {
            question: "blockchain derivatives margin".to_string(),
        };

        let Json(response) = ask_assistant(State(state), Json(request)).await.unwrap();

        assert!(response.sources.is_empty());
        assert!(response.answer.contains("No matching guidance"));
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let state = test_state();
        let request = AskRequest {
            question: String::new(),
        };

        let (status, _) = ask_assistant(State(state), Json(request))
            .await
            .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
