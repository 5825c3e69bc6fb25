use crate::infra::{parse_industries, AppState};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use venture_score::assessment::{
    AnswerImport, AssessmentExport, AssessmentResult, AssessmentSession, Question, QuestionSet,
    Scorer,
};
use venture_score::error::AppError;
use venture_score::report::{render_pdf, ReportAssembler, ReportOptions};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuestionsQuery {
    /// Comma separated industry labels or keys.
    #[serde(default)]
    pub(crate) industries: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionsResponse {
    pub(crate) industry: String,
    pub(crate) industries: Vec<&'static str>,
    pub(crate) questions: Vec<Question>,
}

pub(crate) fn app_router(scorer: Arc<Scorer>, state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/questions", get(questions_endpoint))
        .route("/api/v1/assessments", post(assessment_endpoint))
        .route("/api/v1/assessments/report", post(report_endpoint))
        .with_state(scorer)
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(
    Extension(state): Extension<AppState>,
) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questions_endpoint(
    Query(query): Query<QuestionsQuery>,
) -> Result<Json<QuestionsResponse>, AppError> {
    let requested: Vec<&str> = query
        .industries
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect();
    let industries = parse_industries(&requested)?;
    let set = QuestionSet::for_industries(&industries)
        .map_err(venture_score::assessment::AssessmentError::from)?;

    Ok(Json(QuestionsResponse {
        industry: set.industry_label(),
        industries: set.industries().iter().map(|industry| industry.label()).collect(),
        questions: set.questions().to_vec(),
    }))
}

async fn run_assessment(
    scorer: &Scorer,
    payload: AnswerImport,
) -> Result<AssessmentResult, AppError> {
    let mut session = AssessmentSession::from_import(payload)?;
    Ok(session.assess(scorer, |_| {}).await?)
}

pub(crate) async fn assessment_endpoint(
    State(scorer): State<Arc<Scorer>>,
    Json(payload): Json<AnswerImport>,
) -> Result<Json<AssessmentExport>, AppError> {
    let result = run_assessment(&scorer, payload).await?;
    Ok(Json(AssessmentExport::from_result(&result, Utc::now())))
}

pub(crate) async fn report_endpoint(
    State(scorer): State<Arc<Scorer>>,
    Json(payload): Json<AnswerImport>,
) -> Result<Response, AppError> {
    let result = run_assessment(&scorer, payload).await?;
    let document = ReportAssembler::new(ReportOptions::new(Local::now().date_naive()))
        .assemble(&result)?;
    let bytes = render_pdf(&document)?;
    let disposition = format!("attachment; filename=\"{}\"", document.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn router(ready: bool) -> Router {
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        app_router(Arc::new(Scorer::heuristic()), state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = router(false)
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = router(true)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn questions_route_unions_selected_industries() {
        let response = router(true)
            .oneshot(
                Request::get("/api/v1/questions?industries=fintech,EdTech")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(payload["industry"], "Fintech, EdTech");
        assert_eq!(payload["questions"].as_array().map(Vec::len), Some(21));
    }

    #[tokio::test]
    async fn unknown_industries_are_unprocessable() {
        let response = router(true)
            .oneshot(
                Request::get("/api/v1/questions?industries=space")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn empty_submissions_are_unprocessable() {
        let response = router(true)
            .oneshot(post_json("/api/v1/assessments", json!({ "answers": {} })))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert!(payload["error"].as_str().unwrap().contains("answer at least one"));
    }

    #[tokio::test]
    async fn assessment_route_returns_export() {
        let body = json!({
            "startupName": "Acme",
            "industries": ["SaaS / B2B"],
            "answers": {
                "q1": "We do things.",
                "saas3": "MRR is $42k with 8% monthly growth."
            }
        });
        let response = router(true)
            .oneshot(post_json("/api/v1/assessments", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);

        let payload = read_json_body(response).await;
        assert_eq!(payload["startupName"], "Acme");
        assert_eq!(payload["industry"], "SaaS / B2B");
        assert_eq!(payload["responses"].as_array().map(Vec::len), Some(2));
        assert_eq!(payload["aiPowered"], false);
        assert!(payload["finalScore"].as_u64().is_some());
    }

    #[tokio::test]
    async fn report_route_streams_pdf_attachment() {
        let body = json!({
            "startupName": "Acme Rockets",
            "answers": { "q1": "Reusable launch vehicles for small satellites." }
        });
        let response = router(true)
            .oneshot(post_json("/api/v1/assessments/report", body))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition
            .starts_with("attachment; filename=\"venture-score-analysis-Acme_Rockets-"));

        let bytes = axum::body::to_bytes(response.into_body(), 1 << 22)
            .await
            .expect("read body");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
