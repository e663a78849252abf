//! End-to-end tests for `POST /print-label`.
//!
//! The router runs in-process with a block font and a stub dispatcher, so no
//! font file or printer is needed.

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use image::{GrayImage, Luma};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use nametag::{
    Dispatch, LabelRenderer, RenderedLabel,
    error::{DispatchError, RenderError},
    render::{
        FontSource, Typeface,
        fit::{LineMetrics, TextBounds, TextMeasure},
    },
    server::{self, AppState, ServerConfig},
};

/// Glyphs are solid blocks half an em wide.
struct BlockFont;

impl TextMeasure for BlockFont {
    fn measure(&self, text: &str, size: u32) -> TextBounds {
        let size = size as i32;
        TextBounds {
            left: 0,
            top: size / 5,
            right: text.chars().count() as i32 * size / 2,
            bottom: size * 9 / 10,
        }
    }
}

impl Typeface for BlockFont {
    fn line_metrics(&self, size: u32) -> LineMetrics {
        LineMetrics {
            ascent: size as i32 * 9 / 10,
            descent: size as i32 / 5,
        }
    }

    fn draw(&self, canvas: &mut GrayImage, text: &str, size: u32, origin: (i32, i32)) {
        let b = self.measure(text, size);
        for y in (origin.1 + b.top).max(0)..(origin.1 + b.bottom) {
            for x in (origin.0 + b.left).max(0)..(origin.0 + b.right) {
                if (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                    canvas.put_pixel(x as u32, y as u32, Luma([0]));
                }
            }
        }
    }
}

impl FontSource for BlockFont {
    fn load(&self) -> Result<Arc<dyn Typeface>, RenderError> {
        Ok(Arc::new(BlockFont))
    }
}

struct MissingFont;

impl FontSource for MissingFont {
    fn load(&self) -> Result<Arc<dyn Typeface>, RenderError> {
        Err(RenderError::Font("font 'arial.ttf' not found".to_string()))
    }
}

/// Records what it was asked to print and answers with a fixed result.
#[derive(Default)]
struct StubDispatcher {
    printed: Mutex<Vec<(String, u32, u32)>>,
    reject_model: Option<String>,
}

impl Dispatch for StubDispatcher {
    fn dispatch(&self, label: &RenderedLabel) -> Result<(), DispatchError> {
        if let Some(model) = &self.reject_model {
            return Err(DispatchError::UnsupportedModel {
                model: model.clone(),
                supported: "Supported models:\n QL-700\n QL-800\n".to_string(),
            });
        }
        self.printed.lock().unwrap().push((
            label.text().to_string(),
            label.width(),
            label.height(),
        ));
        Ok(())
    }
}

fn app_with(fonts: Arc<dyn FontSource>, dispatcher: Arc<StubDispatcher>) -> axum::Router {
    let state = AppState::new(ServerConfig::default(), LabelRenderer::new(fonts), dispatcher);
    server::router(Arc::new(state))
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/print-label")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn call(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_print_label_success() {
    let dispatcher = Arc::new(StubDispatcher::default());
    let app = app_with(Arc::new(BlockFont), dispatcher.clone());

    let body = json!({"first_name": "Jane", "last_name": "Doe"}).to_string();
    let (status, json) = call(app, post_json(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"status": "success", "message": "Label printed successfully"})
    );
    assert_eq!(
        dispatcher.printed.lock().unwrap().as_slice(),
        &[("Jane Doe".to_string(), 991, 306)]
    );
}

#[tokio::test]
async fn test_missing_names_are_bad_request() {
    let bodies = [
        json!({"first_name": "Jane"}),
        json!({"last_name": "Doe"}),
        json!({"first_name": "", "last_name": "Doe"}),
        json!({"first_name": "Jane", "last_name": ""}),
        json!({"first_name": null, "last_name": "Doe"}),
        json!({}),
    ];

    for body in bodies {
        let dispatcher = Arc::new(StubDispatcher::default());
        let app = app_with(Arc::new(BlockFont), dispatcher.clone());
        let (status, json) = call(app, post_json(body.to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(
            json,
            json!({"status": "error", "message": "first_name and last_name are required"})
        );
        assert!(dispatcher.printed.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_whitespace_last_name_is_accepted() {
    let dispatcher = Arc::new(StubDispatcher::default());
    let app = app_with(Arc::new(BlockFont), dispatcher.clone());

    let body = json!({"first_name": "Cher", "last_name": " "}).to_string();
    let (status, _) = call(app, post_json(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dispatcher.printed.lock().unwrap()[0].0, "Cher  ");
}

#[tokio::test]
async fn test_unsupported_model_is_server_error() {
    let dispatcher = Arc::new(StubDispatcher {
        reject_model: Some("QL-9000".to_string()),
        ..Default::default()
    });
    let app = app_with(Arc::new(BlockFont), dispatcher);

    let body = json!({"first_name": "Jane", "last_name": "Doe"}).to_string();
    let (status, json) = call(app, post_json(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("not recognized"));
    assert!(message.contains("Supported models:\n QL-700\n QL-800\n"));
}

#[tokio::test]
async fn test_missing_font_is_server_error() {
    let dispatcher = Arc::new(StubDispatcher::default());
    let app = app_with(Arc::new(MissingFont), dispatcher.clone());

    let body = json!({"first_name": "Jane", "last_name": "Doe"}).to_string();
    let (status, json) = call(app, post_json(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["message"],
        "Failed to create label image: font 'arial.ttf' not found"
    );
    assert!(dispatcher.printed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_server_error() {
    let app = app_with(Arc::new(BlockFont), Arc::new(StubDispatcher::default()));

    let (status, json) = call(app, post_json("{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().starts_with("Server error: "));
}

#[tokio::test]
async fn test_non_string_name_is_body_rejection() {
    let dispatcher = Arc::new(StubDispatcher::default());
    let app = app_with(Arc::new(BlockFont), dispatcher.clone());

    let body = json!({"first_name": 7, "last_name": "Doe"}).to_string();
    let (status, json) = call(app, post_json(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().starts_with("Server error: "));
    assert!(dispatcher.printed.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = app_with(Arc::new(BlockFont), Arc::new(StubDispatcher::default()));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/print-label")
        .header(header::ORIGIN, "http://localhost:4200")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_get_is_not_allowed() {
    let app = app_with(Arc::new(BlockFont), Arc::new(StubDispatcher::default()));

    let request = Request::builder()
        .uri("/print-label")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
