//! # HTTP Server for Name Label Printing
//!
//! One endpoint: `POST /print-label` with `{"first_name": ..., "last_name": ...}`.
//!
//! ## Usage
//!
//! ```bash
//! nametag serve --listen 0.0.0.0:5000 --printer usb://0x04f9:0x209b --model QL-800
//! ```
//!
//! ```bash
//! curl -X POST http://localhost:5000/print-label \
//!   -H 'Content-Type: application/json' \
//!   -d '{"first_name": "Jane", "last_name": "Doe"}'
//! ```
//!
//! ## Responses
//!
//! | Status | Body |
//! |--------|------|
//! | 200 | `{"status":"success","message":"Label printed successfully"}` |
//! | 400 | `{"status":"error","message":"first_name and last_name are required"}` |
//! | 500 | `{"status":"error","message":"<what went wrong>"}` |

mod handlers;
mod state;

pub use handlers::label::{LabelRequest, PrintResult, PrintStatus};
pub use state::{AppState, DEFAULT_FONT, DEFAULT_LISTEN_ADDR, ServerConfig};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::post,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::error::NametagError;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/print-label", post(handlers::label::print))
        .layer(cors)
        .with_state(state)
}

/// Any origin when `origins` is empty, otherwise only the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.is_empty() {
        return layer.allow_origin(Any).allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use nametag::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), nametag::error::NametagError> {
/// serve(ServerConfig::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), NametagError> {
    let app = router(Arc::new(AppState::from_config(config.clone())));

    log::info!("nametag HTTP server starting");
    log::info!("Listening on: {}", config.listen_addr);
    log::info!(
        "Printer: {} ({})",
        config.printer.identifier,
        config.printer.model
    );
    log::info!("Font: {}", config.font_path.display());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            NametagError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, app)
        .await
        .map_err(|e| NametagError::Server(e.to_string()))?;

    Ok(())
}
