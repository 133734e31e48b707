//! # API REST
//!
//! REST API for the stroke risk service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `stroke-core` for scoring.

#![warn(rust_2018_idioms)]

pub mod startup;

use advisory::{AdvisoryError, AdvisoryResponder};
use api_shared::{
    AssessmentReq, AssessmentRes, ChatReq, ChatRes, ErrorRes, HealthRes, HealthService,
    RiskFactorRes,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use stroke_core::{AssessmentForm, InferenceContext, ScoringError};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:5000";

/// Application state shared by every request handler.
///
/// Both members are built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<InferenceContext>,
    pub advisory: Arc<AdvisoryResponder>,
}

impl AppState {
    pub fn new(ctx: InferenceContext, advisory: AdvisoryResponder) -> Self {
        Self {
            ctx: Arc::new(ctx),
            advisory: Arc::new(advisory),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, assess, chat),
    components(schemas(
        HealthRes,
        AssessmentReq,
        AssessmentRes,
        RiskFactorRes,
        ChatReq,
        ChatRes,
        ErrorRes,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<ErrorRes>);

/// Build the REST router with Swagger UI and a permissive CORS layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assessment", post(assess))
        .route("/api/chat", post(chat))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Reports whether the process is alive and whether the model artifacts were loaded.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(&state.ctx))
}

#[utoipa::path(
    post,
    path = "/assessment",
    request_body = AssessmentReq,
    responses(
        (status = 200, description = "Risk assessment", body = AssessmentRes),
        (status = 400, description = "Invalid or missing input field", body = ErrorRes),
        (status = 500, description = "Scoring failed", body = ErrorRes),
        (status = 503, description = "Model artifacts unavailable", body = ErrorRes)
    )
)]
/// Score a single assessment
///
/// Validates the submitted fields, runs the scoring pipeline and returns the risk label, the
/// probability as a percentage and up to three contributing factors.
///
/// # Errors
/// - `400 Bad Request` if the body is malformed or a field is missing or invalid.
/// - `503 Service Unavailable` if the model artifacts were not loaded at startup.
/// - `500 Internal Server Error` if the pipeline produced a non-finite value.
#[axum::debug_handler]
async fn assess(
    State(state): State<AppState>,
    body: Result<Json<AssessmentReq>, JsonRejection>,
) -> Result<Json<AssessmentRes>, ApiError> {
    let Json(req) = body.map_err(rejection_response)?;
    let form = AssessmentForm::from(req);

    let assessment = state.ctx.assess_form(&form).map_err(scoring_error_response)?;

    let assessment_id = uuid::Uuid::new_v4();
    tracing::info!(
        %assessment_id,
        label = %assessment.label,
        probability = assessment.probability_percent(),
        factors = assessment.top_factors.len(),
        "assessment scored"
    );

    Ok(Json(AssessmentRes::from(&assessment)))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatReq,
    responses(
        (status = 200, description = "Advisory answer", body = ChatRes),
        (status = 400, description = "No message provided", body = ErrorRes)
    )
)]
/// Stroke awareness chat
///
/// Answers from the static knowledge base, or from the generative service when one is
/// configured and responsive.
#[axum::debug_handler]
async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatReq>, JsonRejection>,
) -> Result<Json<ChatRes>, ApiError> {
    let Json(req) = body.map_err(rejection_response)?;

    match state.advisory.respond(&req.message).await {
        Ok(response) => Ok(Json(ChatRes { response })),
        Err(AdvisoryError::EmptyMessage) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorRes::new("No message provided")),
        )),
        Err(e) => {
            tracing::error!("chat failed: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorRes::new(e.to_string())),
            ))
        }
    }
}

fn rejection_response(rejection: JsonRejection) -> ApiError {
    tracing::warn!("rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorRes::new(rejection.body_text())),
    )
}

fn scoring_error_response(e: ScoringError) -> ApiError {
    let status = match &e {
        ScoringError::Validation { .. } => StatusCode::BAD_REQUEST,
        ScoringError::ArtifactUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_client_error() {
        tracing::warn!("assessment rejected: {}", e);
    } else {
        tracing::error!("assessment failed: {:?}", e);
    }
    (status, Json(ErrorRes::new(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use stroke_core::classifier::LogisticRegression;
    use stroke_core::{ArtifactSet, ScoringConfig, StandardScaler, FEATURE_COUNT};
    use tower::ServiceExt;

    /// Identity scaler and a logistic model driven by age alone: z = 0.1 * age - 9.
    fn ready_state() -> AppState {
        let scaler = StandardScaler::new([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]).unwrap();
        let mut coef = [0.0; FEATURE_COUNT];
        coef[0] = 0.1;
        let classifier = LogisticRegression::new(coef, -9.0).unwrap();
        let artifacts = ArtifactSet::new(scaler, Box::new(classifier)).unwrap();
        AppState::new(
            InferenceContext::new(ScoringConfig::default(), artifacts),
            AdvisoryResponder::new(),
        )
    }

    fn degraded_state() -> AppState {
        AppState::new(
            InferenceContext::unavailable(ScoringConfig::default(), "stroke_model.json missing"),
            AdvisoryResponder::new(),
        )
    }

    fn scenario_a() -> Value {
        json!({
            "age": "65",
            "hypertension": "1",
            "heart_disease": "1",
            "avg_glucose_level": "160",
            "bmi": "32",
            "gender": "Male",
            "ever_married": "Yes",
            "work_type": "Private",
            "residence_type": "Urban",
            "smoking_status": "smokes"
        })
    }

    fn scenario_b() -> Value {
        json!({
            "age": 50,
            "hypertension": 0,
            "heart_disease": 0,
            "avg_glucose_level": 100,
            "bmi": 25,
            "gender": "Female",
            "ever_married": "No",
            "work_type": "Govt_job",
            "residence_type": "Rural",
            "smoking_status": "never smoked"
        })
    }

    async fn post_json(state: AppState, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(state: AppState, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn high_risk_assessment() {
        let (status, body) = post_json(ready_state(), "/assessment", &scenario_a()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "prediction": "High Risk of Stroke",
                "probability": 7.6,
                "risk_factors": [
                    {"name": "Advanced Age", "value": 65, "impact": 3},
                    {"name": "Hypertension", "value": "Yes", "impact": 3},
                    {"name": "Heart Disease", "value": "Yes", "impact": 3}
                ]
            })
        );
    }

    #[tokio::test]
    async fn low_risk_assessment_with_numeric_fields() {
        let (status, body) = post_json(ready_state(), "/assessment", &scenario_b()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["prediction"], "Low Risk of Stroke");
        assert_eq!(body["probability"], 1.8);
        assert_eq!(
            body["risk_factors"],
            json!([{"name": "Overweight", "value": 25.0, "impact": 1}])
        );
    }

    #[tokio::test]
    async fn invalid_field_is_bad_request() {
        let mut req = scenario_a();
        req["age"] = json!("sixty-five");
        let (status, body) = post_json(ready_state(), "/assessment", &req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("age"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let mut req = scenario_a();
        req.as_object_mut().unwrap().remove("smoking_status");
        let (status, body) = post_json(ready_state(), "/assessment", &req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("smoking_status"));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/assessment")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router(ready_state()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unavailable_artifacts_are_service_unavailable() {
        let (status, body) = post_json(degraded_state(), "/assessment", &scenario_a()).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("stroke_model.json missing"));
    }

    #[tokio::test]
    async fn health_reports_artifact_state() {
        let (status, body) = get_json(ready_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["artifacts_loaded"], true);

        let (_, body) = get_json(degraded_state(), "/health").await;
        assert_eq!(body["artifacts_loaded"], false);
    }

    #[tokio::test]
    async fn chat_answers_from_knowledge_base() {
        let (status, body) = post_json(
            ready_state(),
            "/api/chat",
            &json!({"message": "What is FAST?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].as_str().unwrap().contains("FAST"));
    }

    #[tokio::test]
    async fn chat_without_message_is_bad_request() {
        let (status, body) = post_json(ready_state(), "/api/chat", &json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No message provided"}));
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (status, body) = get_json(ready_state(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        assert!(paths.contains_key("/assessment"));
        assert!(paths.contains_key("/api/chat"));
        assert!(paths.contains_key("/health"));
    }
}
