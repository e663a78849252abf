//! Name label printing handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::NametagError;

use super::super::state::AppState;

/// Request body for `POST /print-label`.
#[derive(Debug, Deserialize)]
pub struct LabelRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintStatus {
    Success,
    Error,
}

/// Response body for every outcome.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrintResult {
    pub status: PrintStatus,
    pub message: String,
}

/// Names present and non-empty. Whitespace counts as present.
fn required_names(request: LabelRequest) -> Option<(String, String)> {
    match (request.first_name, request.last_name) {
        (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => Some((first, last)),
        _ => None,
    }
}

/// Handle POST /print-label - render a name label and print it.
pub async fn print(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LabelRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::error!("Rejected request body: {}", rejection.body_text());
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {}", rejection.body_text()),
            );
        }
    };

    let Some((first_name, last_name)) = required_names(request) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "first_name and last_name are required".to_string(),
        );
    };

    // Rendering and printing block (font I/O, model query, USB), run in separate thread
    let print_result =
        tokio::task::spawn_blocking(move || print_label(&state, &first_name, &last_name)).await;

    match print_result {
        Ok(Ok(())) => success_response(),
        Ok(Err(e)) => {
            log::error!("{}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            log::error!("Print task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Server error: {}", e),
            )
        }
    }
}

/// Render then dispatch.
fn print_label(state: &AppState, first_name: &str, last_name: &str) -> Result<(), NametagError> {
    let label = state.renderer.render(first_name, last_name)?;
    state.dispatcher.dispatch(&label)?;
    log::info!("Printed label for '{}'", label.text());
    Ok(())
}

fn success_response() -> Response {
    (
        StatusCode::OK,
        Json(PrintResult {
            status: PrintStatus::Success,
            message: "Label printed successfully".to_string(),
        }),
    )
        .into_response()
}

fn error_response(code: StatusCode, message: String) -> Response {
    (
        code,
        Json(PrintResult {
            status: PrintStatus::Error,
            message,
        }),
    )
        .into_response()
}
