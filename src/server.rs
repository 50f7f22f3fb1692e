//! REST API Server
//!
//! A single-endpoint HTTP wrapper around the inputs parser. The request
//! body is YAML (or JSON) naming either a workflow location to fetch or
//! inline workflow content; the response is the JSON field array.

use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use log::{error, info};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::error::CwlInputsError;
use crate::inputs::InputField;
use crate::{inputs_from_content, inputs_from_location, VERSION};

/// Request body for the parse endpoint. Exactly one of the two fields is
/// needed; `wf_location` wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub wf_location: Option<String>,
    #[serde(default)]
    pub wf_content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Builds the application router: `GET|POST /` parses a workflow,
/// `GET /health` reports liveness. CORS is wide open; the service is
/// meant to sit behind UIs on other origins.
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(parse_workflow).post(parse_workflow))
        .route("/health", get(health_check))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn parse_workflow(
    body: String,
) -> Result<Json<Vec<InputField>>, (StatusCode, Json<ErrorResponse>)> {
    let request: ParseRequest = serde_yaml::from_str(&body)
        .map_err(|e| bad_request(format!("Invalid request body: {}", e)))?;

    let result = match (&request.wf_location, &request.wf_content) {
        (None, None) => return Err(bad_request("Missing arguments".to_string())),
        (Some(location), _) => {
            info!("Parsing workflow from location: {}", location.trim());
            inputs_from_location(location.trim()).await
        }
        (None, Some(content)) => {
            info!("Parsing workflow from inline content ({} bytes)", content.len());
            inputs_from_content(content)
        }
    };

    match result {
        Ok(fields) => {
            info!("Extracted {} input field(s)", fields.len());
            Ok(Json(fields))
        }
        Err(e) => {
            error!("Failed to parse workflow inputs: {}", e);
            Err(reject(e))
        }
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

fn bad_request(message: String) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { message }))
}

/// Document, conversion, and fetch failures are the client's problem (bad
/// or unsupported workflow); everything else is a server fault.
fn reject(err: CwlInputsError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        CwlInputsError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorResponse {
            message: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::util::ServiceExt;

    async fn post(body: String) -> axum::response::Response {
        create_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let response = post("{}".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Missing arguments");
    }

    #[tokio::test]
    async fn test_parse_inline_content() {
        let workflow = r#"
class: CommandLineTool
cwlVersion: v1.2
inputs:
  - id: reads
    type: File
    secondaryFiles: .bai
"#;
        let request = json!({ "wf_content": workflow }).to_string();
        let response = post(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body[0]["id"], "reads");
        assert_eq!(body[0]["type"], "File");
        assert_eq!(body[0]["array"], false);
        assert_eq!(body[0]["required"], true);
        assert_eq!(body[0]["secondaryFiles"][0]["pattern"], ".bai");
        assert_eq!(body[0]["secondaryFiles"][0]["required"], true);
    }

    #[tokio::test]
    async fn test_parse_unsupported_shape() {
        let workflow = r#"
class: CommandLineTool
inputs:
  - id: color
    type: {type: enum, symbols: [red, blue]}
"#;
        let request = json!({ "wf_content": workflow }).to_string();
        let response = post(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["message"].as_str().unwrap().contains("enum"));
    }

    #[tokio::test]
    async fn test_parse_invalid_body() {
        let response = post("not: [valid".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = create_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_get_with_body_also_parses() {
        let workflow = "class: CommandLineTool\ninputs: []\n";
        let request = json!({ "wf_content": workflow }).to_string();
        let response = create_router()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/")
                    .body(Body::from(request))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}
