//! HTTP routes: form-driven page flow plus the JSON API.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, Form, Query, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use edugen_core::{
    render::export_filename, EduGenError, ExportFormat, SessionSnapshot, SessionState, Tab,
    SUGGESTED_TOPICS,
};
use serde::Deserialize;

use crate::views::render_page;
use crate::AppState;

type ApiError = (StatusCode, String);

#[derive(Deserialize)]
pub struct GenerateRequest {
    topic: String,
    #[serde(default)]
    keywords: String,
}

#[derive(Deserialize)]
pub struct SuggestForm {
    suggestion: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
}

#[derive(Deserialize)]
pub struct TabForm {
    tab: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    keywords: Option<String>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    format: Option<String>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(index))
        .route("/generate", post(generate_form))
        .route("/suggest", post(suggest_form))
        .route("/tab", post(tab_form))
        .route("/cancel", post(cancel_form))
        .route("/reset", post(reset_form))
        .route("/api/v1/suggestions", get(suggestions))
        .route("/api/v1/state", get(session_state))
        .route("/api/v1/generate", post(generate_api))
        .route("/api/v1/cancel", post(cancel_api))
        .route("/api/v1/article/export", get(export_article))
        .with_state(Arc::new(state))
        .layer(axum::middleware::from_fn(log_requests))
}

async fn log_requests(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    match connect_info {
        Some(ConnectInfo(addr)) => tracing::info!(
            %method, %path, peer = %addr, status = response.status().as_u16(), "request"
        ),
        None => tracing::info!(%method, %path, status = response.status().as_u16(), "request"),
    }
    response
}

fn status_for(err: &EduGenError) -> StatusCode {
    match err {
        EduGenError::EmptyTopic => StatusCode::UNPROCESSABLE_ENTITY,
        EduGenError::UnknownSuggestion(_) | EduGenError::UnknownFormat(_) => StatusCode::BAD_REQUEST,
        EduGenError::GenerationInFlight | EduGenError::Cancelled => StatusCode::CONFLICT,
        EduGenError::NoDocument => StatusCode::NOT_FOUND,
        EduGenError::UnsupportedFormat(_) => StatusCode::NOT_IMPLEMENTED,
        EduGenError::Task(_) | EduGenError::Config(_) | EduGenError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn api_error(err: EduGenError) -> ApiError {
    (status_for(&err), err.to_string())
}

async fn health() -> &'static str {
    "OK"
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let session = state.generator.session().read().await;
    Html(render_page(&state.config.app_name, &session, None))
}

/// Re-render the page as-is with a notice and an error status.
async fn page_with_notice(state: &AppState, err: EduGenError) -> Response {
    let session = state.generator.session().read().await;
    let html = render_page(&state.config.app_name, &session, Some(&err.to_string()));
    (status_for(&err), Html(html)).into_response()
}

async fn generate_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GenerateRequest>,
) -> Response {
    match state.generator.trigger(&form.topic, &form.keywords).await {
        Ok(handle) => {
            tracing::debug!(generation_id = %handle.id, "form generation accepted");
            Redirect::to("/").into_response()
        }
        Err(e) => page_with_notice(&state, e).await,
    }
}

async fn suggest_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SuggestForm>,
) -> Response {
    let applied = {
        let mut session = state.generator.session().write().await;
        keep_typed_fields(&mut session, form.topic, form.keywords);
        session.apply_suggestion(&form.suggestion)
    };
    match applied {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => page_with_notice(&state, e).await,
    }
}

async fn tab_form(State(state): State<Arc<AppState>>, Form(form): Form<TabForm>) -> Response {
    let Some(tab) = Tab::parse(&form.tab) else {
        return (StatusCode::BAD_REQUEST, format!("unknown tab: {}", form.tab)).into_response();
    };
    let mut session = state.generator.session().write().await;
    keep_typed_fields(&mut session, form.topic, form.keywords);
    if !session.select_tab(tab) {
        tracing::debug!(?tab, "tab not available");
    }
    Redirect::to("/").into_response()
}

/// Save unsubmitted form text posted alongside a suggestion or tab click.
/// Ignored while a generation is busy so the in-flight values stay on screen.
fn keep_typed_fields(session: &mut SessionState, topic: Option<String>, keywords: Option<String>) {
    if session.is_busy() {
        return;
    }
    if let Some(topic) = topic {
        session.set_topic(topic);
    }
    if let Some(keywords) = keywords {
        session.set_keywords(keywords);
    }
}

async fn cancel_form(State(state): State<Arc<AppState>>) -> Redirect {
    state.generator.cancel().await;
    Redirect::to("/")
}

async fn reset_form(State(state): State<Arc<AppState>>) -> Redirect {
    state.generator.reset().await;
    Redirect::to("/")
}

async fn suggestions() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "suggestions": SUGGESTED_TOPICS }))
}

async fn session_state(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.generator.session().read().await.snapshot())
}

/// Start a generation and wait for its document.
async fn generate_api(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<edugen_core::Document>, ApiError> {
    let handle = state
        .generator
        .trigger(&body.topic, &body.keywords)
        .await
        .map_err(api_error)?;
    let document = handle.wait().await.map_err(api_error)?;
    Ok(Json(document.as_ref().clone()))
}

async fn cancel_api(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let cancelled = state.generator.cancel().await;
    Json(serde_json::json!({ "cancelled": cancelled }))
}

async fn export_article(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = match query.format.as_deref() {
        Some(f) => f.parse().map_err(api_error)?,
        None => ExportFormat::default(),
    };

    let document = state
        .generator
        .session()
        .read()
        .await
        .document()
        .cloned()
        .ok_or_else(|| api_error(EduGenError::NoDocument))?;

    let body = edugen_core::export(&document, format).map_err(api_error)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(&document, format)
    );
    tracing::info!(format = format.as_str(), title = %document.title, "article exported");

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edugen_core::EduGenConfig;
    use tower::ServiceExt;

    fn test_config() -> EduGenConfig {
        EduGenConfig {
            app_name: "Test EduGen".to_string(),
            generation_delay_ms: 0,
            ..EduGenConfig::default()
        }
    }

    fn test_state() -> (Router, Arc<edugen_core::Generator>) {
        let state = AppState::from_config(test_config());
        let generator = Arc::clone(&state.generator);
        (build_router(state), generator)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_state();
        let res = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "OK");
    }

    #[tokio::test]
    async fn test_index_renders_input_tab() {
        let (app, _) = test_state();
        let res = app.oneshot(get_req("/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_string(res).await;
        assert!(html.contains("<title>Test EduGen</title>"));
        assert!(html.contains("Create Your Educational Article"));
        assert!(html.contains("Machine Learning Fundamentals"));
    }

    #[tokio::test]
    async fn test_api_generate_returns_document() {
        let (app, generator) = test_state();
        let req = json_post(
            "/api/v1/generate",
            serde_json::json!({ "topic": "Machine Learning Fundamentals", "keywords": "svm" }),
        );
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(json["title"], "Comprehensive Guide to Machine Learning Fundamentals");
        assert_eq!(json["sections"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["references"].as_array().map(Vec::len), Some(4));

        let session = generator.session().read().await;
        assert_eq!(session.tab(), Tab::Output);
        assert!(session.document().is_some());
    }

    #[tokio::test]
    async fn test_api_generate_rejects_blank_topic() {
        let (app, generator) = test_state();
        let req = json_post("/api/v1/generate", serde_json::json!({ "topic": "   " }));
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let session = generator.session().read().await;
        assert_eq!(session.tab(), Tab::Input);
        assert!(session.document().is_none());
    }

    #[tokio::test]
    async fn test_api_generate_conflicts_while_busy() {
        let state = AppState::from_config(EduGenConfig {
            generation_delay_ms: 60_000,
            ..test_config()
        });
        let generator = Arc::clone(&state.generator);
        let app = build_router(state);

        let _first = generator.trigger("Geometry", "").await.unwrap();
        let req = json_post("/api/v1/generate", serde_json::json!({ "topic": "Algebra" }));
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = app.oneshot(json_post("/api/v1/cancel", serde_json::json!({}))).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(json["cancelled"], true);
        assert!(!generator.session().read().await.is_busy());
    }

    #[tokio::test]
    async fn test_form_generate_redirects_and_blank_is_unprocessable() {
        let (app, generator) = test_state();
        let res = app
            .clone()
            .oneshot(form_post("/generate", "topic=+++&keywords=abc"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_string(res).await;
        assert!(html.contains("topic must not be empty"));
        assert_eq!(generator.session().read().await.tab(), Tab::Input);

        let res = app
            .oneshot(form_post("/generate", "topic=Music+Theory&keywords=scales"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let session = generator.session().read().await;
        assert_eq!(session.topic(), "Music Theory");
        assert_eq!(session.tab(), Tab::Output);
    }

    #[tokio::test]
    async fn test_suggest_sets_topic() {
        let (app, generator) = test_state();
        let res = app
            .clone()
            .oneshot(form_post("/suggest", "suggestion=Psychology+of+Learning"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(generator.session().read().await.topic(), "Psychology of Learning");

        let res = app
            .oneshot(form_post("/suggest", "suggestion=Knitting"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(generator.session().read().await.topic(), "Psychology of Learning");
    }

    #[tokio::test]
    async fn test_suggest_keeps_typed_keywords() {
        let (app, generator) = test_state();
        let res = app
            .oneshot(form_post(
                "/suggest",
                "topic=half+typed&keywords=backprop%2C+tensors&suggestion=Machine+Learning+Fundamentals",
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let session = generator.session().read().await;
        assert_eq!(session.topic(), "Machine Learning Fundamentals");
        assert_eq!(session.keywords(), "backprop, tensors");
    }

    #[tokio::test]
    async fn test_tab_switch_keeps_typed_fields() {
        let (app, generator) = test_state();
        generator.trigger("Botany", "ferns").await.unwrap().wait().await.unwrap();

        let res = app
            .clone()
            .oneshot(form_post("/tab", "tab=input"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let res = app
            .clone()
            .oneshot(form_post("/tab", "topic=Zoology&keywords=mammals&tab=output"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        {
            let session = generator.session().read().await;
            assert_eq!(session.tab(), Tab::Output);
            assert_eq!(session.topic(), "Zoology");
            assert_eq!(session.keywords(), "mammals");
            assert!(session.document().is_some());
        }

        let html = body_string(app.oneshot(get_req("/")).await.unwrap()).await;
        assert!(html.contains(r#"name="keywords" value="mammals""#));
    }

    #[tokio::test]
    async fn test_api_generate_conflicts_when_cancelled_while_waiting() {
        let state = AppState::from_config(EduGenConfig {
            generation_delay_ms: 60_000,
            ..test_config()
        });
        let generator = Arc::clone(&state.generator);
        let app = build_router(state);

        let req = json_post("/api/v1/generate", serde_json::json!({ "topic": "Algebra" }));
        let pending = tokio::spawn(app.oneshot(req));
        while !generator.session().read().await.is_busy() {
            tokio::task::yield_now().await;
        }
        assert!(generator.cancel().await);

        let res = pending.await.unwrap().unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(body_string(res).await, "generation was cancelled");
        assert_eq!(generator.session().read().await.tab(), Tab::Input);
    }

    #[tokio::test]
    async fn test_output_tab_requires_article() {
        let (app, generator) = test_state();
        let res = app
            .clone()
            .oneshot(form_post("/tab", "tab=output"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(generator.session().read().await.tab(), Tab::Input);

        let res = app.oneshot(form_post("/tab", "tab=settings")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_formats() {
        let (app, generator) = test_state();

        let res = app.clone().oneshot(get_req("/api/v1/article/export")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        generator
            .trigger("Data Science Introduction", "")
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        let res = app.clone().oneshot(get_req("/api/v1/article/export")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"comprehensive-guide-to-data-science-introduction.md\""
        );
        let md = body_string(res).await;
        assert!(md.starts_with("# Comprehensive Guide to Data Science Introduction"));

        let res = app
            .clone()
            .oneshot(get_req("/api/v1/article/export?format=pdf"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);

        let res = app
            .oneshot(get_req("/api/v1/article/export?format=docx"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_state_and_reset() {
        let (app, generator) = test_state();
        generator.trigger("Botany", "ferns").await.unwrap().wait().await.unwrap();

        let res = app.clone().oneshot(get_req("/api/v1/state")).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(json["status"], "done");
        assert_eq!(json["keywords"], "ferns");
        assert_eq!(json["document"]["title"], "Comprehensive Guide to Botany");

        let res = app.clone().oneshot(form_post("/reset", "")).await.unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);

        let res = app.oneshot(get_req("/api/v1/state")).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["tab"], "input");
        assert!(json["document"].is_null());
    }
}
