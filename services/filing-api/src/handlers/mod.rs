pub mod assistant;
pub mod filings;
pub mod upload;

pub use assistant::*;
pub use filings::*;
pub use upload::*;

use axum::http::StatusCode;
use gstflow_utils::GstError;

/// Maps a core error onto its HTTP rejection.
pub(crate) fn error_response(error: GstError) -> (StatusCode, String) {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, error.to_string())
}
