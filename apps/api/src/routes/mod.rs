pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::chat::handlers as chat;
use crate::results;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Assessment wizard
        .route("/api/v1/assessment", post(assessment::handle_start))
        .route(
            "/api/v1/assessment/:id",
            get(assessment::handle_get).delete(assessment::handle_abandon),
        )
        .route(
            "/api/v1/assessment/:id/submit",
            post(assessment::handle_submit),
        )
        .route("/api/v1/assessment/:id/back", post(assessment::handle_back))
        .route(
            "/api/v1/assessment/:id/confirm",
            post(assessment::handle_confirm),
        )
        .route(
            "/api/v1/assessment/:id/dismiss",
            post(assessment::handle_dismiss),
        )
        // Results view
        .route("/api/v1/results", get(results::handle_results))
        // Advisor chat
        .route(
            "/api/v1/chat",
            get(chat::handle_open).post(chat::handle_message),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::assessment::models::AssessmentRecord;
    use crate::assessment::sessions::SessionStore;
    use crate::assessment::sink::CompletionSink;
    use crate::config::Config;
    use crate::errors::AppError;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<(Uuid, AssessmentRecord)>>,
    }

    #[async_trait]
    impl CompletionSink for RecordingSink {
        async fn deliver(&self, session_id: Uuid, record: &AssessmentRecord) -> Result<(), AppError> {
            self.delivered
                .lock()
                .unwrap()
                .push((session_id, record.clone()));
            Ok(())
        }
    }

    /// Fails the first `failures` deliveries, then records like `RecordingSink`.
    struct FlakySink {
        failures: AtomicUsize,
        inner: RecordingSink,
    }

    #[async_trait]
    impl CompletionSink for FlakySink {
        async fn deliver(&self, session_id: Uuid, record: &AssessmentRecord) -> Result<(), AppError> {
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                return Err(anyhow::anyhow!("completion outbox unavailable").into());
            }
            self.inner.deliver(session_id, record).await
        }
    }

    fn app_with_sink(sink: Arc<dyn CompletionSink>) -> Router {
        build_router(AppState {
            config: Config::default(),
            sessions: Arc::new(SessionStore::new(chrono::Duration::minutes(30))),
            sink,
        })
    }

    fn test_app() -> (Router, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (app_with_sink(sink.clone()), sink)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri).method(method);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_string(&json).unwrap())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn personal_info() -> Value {
        json!({
            "step": "personal_info",
            "data": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "education": "undergraduate",
                "major": "Computer Science"
            }
        })
    }

    fn skills() -> Value {
        json!({
            "step": "skills",
            "data": {
                "programmingExperience": "intermediate",
                "preferredLanguages": "Python, JS",
                "projectExperience": "Built a portfolio site"
            }
        })
    }

    fn interests() -> Value {
        json!({
            "step": "interests",
            "data": {
                "careerInterests": "Cloud",
                "workPreference": "remote",
                "learningStyle": "interactive"
            }
        })
    }

    async fn start(app: &Router) -> String {
        let (status, json) = send(app, Method::POST, "/api/v1/assessment", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = test_app();
        let (status, json) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["active_sessions"], 0);
    }

    #[tokio::test]
    async fn test_start_returns_first_step() {
        let (app, _) = test_app();
        let (status, json) = send(&app, Method::POST, "/api/v1/assessment", None).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["state"], "step1");
        assert_eq!(json["progress"]["label"], "Step 1/3");
        assert_eq!(json["step"]["title"], "Personal Information");
        assert_eq!(json["step"]["can_go_back"], false);
        assert!(json.get("gate").is_none());
    }

    #[tokio::test]
    async fn test_invalid_submit_returns_field_errors() {
        let (app, _) = test_app();
        let id = start(&app).await;

        let mut bad = personal_info();
        bad["data"]["name"] = json!("A");
        let (status, json) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/submit"),
            Some(bad),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(
            json["error"]["fields"]["name"],
            "Name must be at least 2 characters"
        );
        // The rejected form comes back with what was typed and the errors inline.
        assert_eq!(json["error"]["step"]["step"], 1);
        assert_eq!(json["error"]["step"]["fields"][0]["value"], "A");
        assert_eq!(
            json["error"]["step"]["fields"][0]["error"],
            "Name must be at least 2 characters"
        );
        assert!(json["error"]["step"]["fields"][1].get("error").is_none());

        let (_, json) = send(&app, Method::GET, &format!("/api/v1/assessment/{id}"), None).await;
        assert_eq!(json["state"], "step1");
        assert_eq!(json["step"]["fields"][0]["value"], "");
    }

    #[tokio::test]
    async fn test_wrong_step_is_a_conflict() {
        let (app, _) = test_app();
        let id = start(&app).await;

        let (status, json) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/submit"),
            Some(skills()),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "INVALID_TRANSITION");

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/back"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_back_repopulates_previous_step() {
        let (app, _) = test_app();
        let id = start(&app).await;
        let submit = format!("/api/v1/assessment/{id}/submit");

        let (status, json) = send(&app, Method::POST, &submit, Some(personal_info())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "step2");

        let (status, json) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/back"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "step1");
        assert_eq!(json["step"]["fields"][0]["value"], "Jane Doe");
        assert_eq!(json["step"]["fields"][1]["value"], "jane@example.com");
    }

    #[tokio::test]
    async fn test_full_assessment_flow() {
        let (app, sink) = test_app();
        let id = start(&app).await;
        let submit = format!("/api/v1/assessment/{id}/submit");

        send(&app, Method::POST, &submit, Some(personal_info())).await;
        let (_, json) = send(&app, Method::POST, &submit, Some(skills())).await;
        assert_eq!(json["state"], "step3");
        assert_eq!(json["step"]["submit_label"], "Complete Assessment");

        let (status, json) = send(&app, Method::POST, &submit, Some(interests())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "confirming");
        assert_eq!(json["gate"]["action_label"], "View My Results");

        // Dismissing the gate returns to step 3 with values intact.
        let (_, json) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/dismiss"),
            None,
        )
        .await;
        assert_eq!(json["state"], "step3");
        assert_eq!(json["step"]["fields"][0]["value"], "Cloud");
        send(&app, Method::POST, &submit, Some(interests())).await;

        let (status, json) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/confirm"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "completed");
        assert_eq!(json["redirect"], "/results");
        assert_eq!(json["record"]["personalInfo"]["name"], "Jane Doe");
        assert_eq!(json["record"]["skills"]["preferredLanguages"], "Python, JS");
        assert_eq!(json["record"]["interests"]["learningStyle"], "interactive");

        let delivered = sink.delivered.lock().unwrap().clone();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].0.to_string(), id);
        assert_eq!(delivered[0].1.personal_info.email, "jane@example.com");

        // The session is discarded once confirmed.
        let (status, _) = send(&app, Method::GET, &format!("/api/v1/assessment/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_hand_off_keeps_session_for_retry() {
        let sink = Arc::new(FlakySink {
            failures: AtomicUsize::new(1),
            inner: RecordingSink::default(),
        });
        let app = app_with_sink(sink.clone());
        let id = start(&app).await;
        let submit = format!("/api/v1/assessment/{id}/submit");
        let confirm = format!("/api/v1/assessment/{id}/confirm");
        for step in [personal_info(), skills(), interests()] {
            let (status, _) = send(&app, Method::POST, &submit, Some(step)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, json) = send(&app, Method::POST, &confirm, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");

        // Still at the gate with the record intact.
        let (status, json) = send(&app, Method::GET, &format!("/api/v1/assessment/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "confirming");
        assert_eq!(json["gate"]["title"], "Assessment Complete!");
        assert_eq!(json["record"]["personalInfo"]["name"], "Jane Doe");

        let (status, json) = send(&app, Method::POST, &confirm, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "completed");
        assert_eq!(sink.inner.delivered.lock().unwrap().len(), 1);

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/assessment/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_requests_use_error_body() {
        let (app, _) = test_app();

        let (status, json) = send(&app, Method::GET, "/api/v1/assessment/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let id = start(&app).await;
        let submit = format!("/api/v1/assessment/{id}/submit");
        let (status, json) = send(
            &app,
            Method::POST,
            &submit,
            Some(json!({ "step": "hobbies", "data": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, json) = send(&app, Method::POST, &submit, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, json) = send(&app, Method::POST, "/api/v1/chat", Some(json!([1, 2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        // Nothing changed for the session.
        let (_, json) = send(&app, Method::GET, &format!("/api/v1/assessment/{id}"), None).await;
        assert_eq!(json["state"], "step1");
    }

    #[tokio::test]
    async fn test_confirm_before_last_step_rejected() {
        let (app, sink) = test_app();
        let id = start(&app).await;

        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/v1/assessment/{id}/confirm"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(sink.delivered.lock().unwrap().is_empty());

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/assessment/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_and_abandoned_sessions() {
        let (app, _) = test_app();
        let missing = Uuid::new_v4();
        let (status, json) = send(
            &app,
            Method::GET,
            &format!("/api/v1/assessment/{missing}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");

        let id = start(&app).await;
        let uri = format!("/api/v1/assessment/{id}");
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_results_endpoint() {
        let (app, _) = test_app();
        let (status, json) = send(&app, Method::GET, "/api/v1/results", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["top_career_paths"][0]["match_percent"], 94);
        assert_eq!(json["learning_resources"][1]["kind"], "tutorial");
        assert_eq!(json["roadmap"][0]["title"], "Foundation");
    }

    #[tokio::test]
    async fn test_chat_endpoints() {
        let (app, _) = test_app();

        let (status, json) = send(
            &app,
            Method::POST,
            "/api/v1/chat",
            Some(json!({ "message": "   " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");

        let (status, json) = send(
            &app,
            Method::POST,
            "/api/v1/chat",
            Some(json!({ "message": "Tell me about data science" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"]["role"], "assistant");
        assert!(json["reply"]["content"]
            .as_str()
            .unwrap()
            .starts_with("Data Science combines"));

        let (_, json) = send(
            &app,
            Method::GET,
            "/api/v1/chat?topic=Tell%20me%20more%20about%20becoming%20a%20Full%20Stack%20Developer",
            None,
        )
        .await;
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1]["role"], "user");
        assert!(messages[2]["content"]
            .as_str()
            .unwrap()
            .starts_with("Full Stack Development"));
    }
}
