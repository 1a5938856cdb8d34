use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::*, AppState};

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/filings/upload", post(upload_filing))
        .route("/filings", get(list_filings))
        .route("/filings/:id", get(get_filing))
        .route("/assistant/ask", post(ask_assistant))
}
