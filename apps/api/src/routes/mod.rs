pub mod health;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::access::handlers as access;
use crate::attendance::handlers as attendance;
use crate::auth;
use crate::dashboard::handlers as dashboard;
use crate::ess::handlers as ess;
use crate::policies::handlers as policies;
use crate::recruitment::handlers as recruitment;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/user", get(auth::current_user_handler))
        .route("/api/dashboard", get(dashboard::handle_dashboard))
        // Recruitment
        .route(
            "/api/recruitment-requests",
            get(recruitment::handle_list_requests).post(recruitment::handle_create_request),
        )
        .route(
            "/api/recruitment-requests/:id",
            get(recruitment::handle_get_request).patch(recruitment::handle_update_request),
        )
        .route(
            "/api/candidates",
            get(recruitment::handle_list_candidates).post(recruitment::handle_create_candidate),
        )
        .route("/api/candidates/:id", get(recruitment::handle_get_candidate))
        .route(
            "/api/candidates/:id/stage",
            patch(recruitment::handle_update_stage),
        )
        .route("/api/pipeline", get(recruitment::handle_pipeline_board))
        .route(
            "/api/availability-slots",
            get(recruitment::handle_list_slots).post(recruitment::handle_create_slot),
        )
        .route(
            "/api/interviews",
            get(recruitment::handle_list_interviews).post(recruitment::handle_create_interview),
        )
        .route(
            "/api/interviews/:id",
            get(recruitment::handle_get_interview).patch(recruitment::handle_update_interview),
        )
        // Attendance
        .route(
            "/api/attendance",
            get(attendance::handle_list_attendance).post(attendance::handle_create_attendance),
        )
        .route("/api/attendance/clock-in", post(attendance::handle_clock_in))
        .route("/api/attendance/clock-out", post(attendance::handle_clock_out))
        .route(
            "/api/attendance/:id",
            get(attendance::handle_get_attendance).patch(attendance::handle_update_attendance),
        )
        // Employee self-service
        .route("/api/ess", get(ess::handle_list_ess).post(ess::handle_create_ess))
        .route("/api/ess/:id", patch(ess::handle_update_ess))
        // Policies
        .route(
            "/api/policies",
            get(policies::handle_list_policies).post(policies::handle_create_policy),
        )
        .route(
            "/api/policies/:id",
            get(policies::handle_get_policy).patch(policies::handle_update_policy),
        )
        .route(
            "/api/policy-acks",
            get(policies::handle_list_acks).post(policies::handle_create_ack),
        )
        // Templates
        .route(
            "/api/templates",
            get(templates::handle_list_templates).post(templates::handle_create_template),
        )
        .route("/api/templates/:id", get(templates::handle_get_template))
        // Access
        .route(
            "/api/passes",
            get(access::handle_list_passes).post(access::handle_create_pass),
        )
        .route("/api/passes/:id", get(access::handle_get_pass))
        .route(
            "/api/audit-logs",
            get(access::handle_list_audit_logs).post(access::handle_create_audit_log),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/api/health", get(health::health_handler))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_api_tokens, Config};
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let config = Config {
            database_url: None,
            database_max_connections: 1,
            run_migrations: false,
            api_tokens: parse_api_tokens("t1=emp-1,t2=emp-2").unwrap(),
            port: 0,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            store: Arc::new(MemoryStore::new()),
            config,
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn authed(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send(app, method, uri, Some("t1"), body).await
    }

    async fn authed_raw(app: &Router, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, "Bearer t1")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_missing_or_unknown_token_is_401() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/candidates", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) = send(&app, "GET", "/api/candidates", Some("nope"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_auth_user_returns_caller() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/auth/user", Some("t2"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "emp-2");
    }

    #[tokio::test]
    async fn test_candidate_stage_transition() {
        let app = app();
        let (status, created) = authed(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "name": "Ana", "email": "ana@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["currentStage"], "applied");
        let id = created["id"].as_str().unwrap().to_string();

        let (status, updated) = authed(
            &app,
            "PATCH",
            &format!("/api/candidates/{id}/stage"),
            Some(json!({ "stage": "offer" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["currentStage"], "offer");

        // backwards moves are allowed
        let (status, _) = authed(
            &app,
            "PATCH",
            &format!("/api/candidates/{id}/stage"),
            Some(json!({ "stage": "screen" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, fetched) = authed(&app, "GET", &format!("/api/candidates/{id}"), None).await;
        assert_eq!(fetched["currentStage"], "screen");
    }

    #[tokio::test]
    async fn test_unknown_stage_is_400() {
        let app = app();
        let (status, body) = authed(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "name": "Bo", "email": "bo@example.com", "currentStage": "limbo" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (_, created) = authed(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "name": "Bo", "email": "bo@example.com" })),
        )
        .await;
        let id = created["id"].as_str().unwrap();
        let (status, _) = authed(
            &app,
            "PATCH",
            &format!("/api/candidates/{id}/stage"),
            Some(json!({ "stage": "limbo" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_records_are_404() {
        let app = app();
        let missing = uuid::Uuid::new_v4();
        let (status, body) = authed(
            &app,
            "PATCH",
            &format!("/api/candidates/{missing}/stage"),
            Some(json!({ "stage": "offer" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        let (status, _) = authed(
            &app,
            "PATCH",
            &format!("/api/recruitment-requests/{missing}"),
            Some(json!({ "status": "closed" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = authed(&app, "GET", &format!("/api/policies/{missing}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_clock_in_twice_is_rejected() {
        let app = app();
        let (status, log) = authed(&app, "POST", "/api/attendance/clock-in", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(log["employeeId"], "emp-1");
        assert_eq!(log["status"], "pending");

        let (status, body) = authed(&app, "POST", "/api/attendance/clock-in", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Already clocked in today");

        // a different employee is unaffected
        let (status, _) = authed(
            &app,
            "POST",
            "/api/attendance/clock-in",
            Some(json!({ "employeeId": "emp-3" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_malformed_clock_body_is_rejected() {
        let app = app();
        let (status, body) =
            authed_raw(&app, "POST", "/api/attendance/clock-in", r#"{"employeeId": "#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        // nobody was clocked in on the caller's behalf
        let (_, logs) = authed(&app, "GET", "/api/attendance", None).await;
        assert!(logs.as_array().unwrap().is_empty());

        let (status, _) =
            authed_raw(&app, "POST", "/api/attendance/clock-out", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clock_for_another_employee() {
        let app = app();
        let other = Some(json!({ "employeeId": "emp-3" }));

        let (status, log) =
            authed(&app, "POST", "/api/attendance/clock-in", other.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(log["employeeId"], "emp-3");

        // the caller has no record of their own yet
        let (status, _) = authed(&app, "POST", "/api/attendance/clock-out", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, log) = authed(&app, "POST", "/api/attendance/clock-out", other).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(log["employeeId"], "emp-3");
        assert_eq!(log["status"], "approved");

        let (_, mine) = authed(&app, "GET", "/api/attendance", None).await;
        assert!(mine.as_array().unwrap().is_empty());
        let (_, theirs) = authed(&app, "GET", "/api/attendance?employeeId=emp-3", None).await;
        assert_eq!(theirs.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_bad_bodies_and_paths_use_error_envelope() {
        let app = app();
        let (status, body) = authed(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "name": "NoEmail" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("email"));

        let (status, body) = authed(&app, "GET", "/api/candidates/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = authed(&app, "GET", "/api/candidates?rrId=nope", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_clock_out_without_clock_in_is_rejected() {
        let app = app();
        let (status, body) = authed(&app, "POST", "/api/attendance/clock-out", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No clock-in record found for today");
    }

    #[tokio::test]
    async fn test_clock_in_then_out_approves_the_day() {
        let app = app();
        authed(&app, "POST", "/api/attendance/clock-in", None).await;

        let (status, log) = authed(&app, "POST", "/api/attendance/clock-out", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(log["status"], "approved");
        assert!(log["timeOut"].is_string());
        assert_eq!(log["totalHours"], json!(0.0));

        let (status, _) = authed(&app, "POST", "/api/attendance/clock-out", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, logs) = authed(&app, "GET", "/api/attendance", None).await;
        assert_eq!(logs.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_manual_attendance_fills_total_hours() {
        let app = app();
        let (status, log) = authed(
            &app,
            "POST",
            "/api/attendance",
            Some(json!({
                "employeeId": "emp-1",
                "date": "2026-04-14",
                "timeIn": "2026-04-14T09:00:00Z",
                "timeOut": "2026-04-14T17:30:00Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(log["totalHours"], json!(8.5));
    }

    #[tokio::test]
    async fn test_repeated_acks_are_all_recorded() {
        let app = app();
        let (_, policy) = authed(
            &app,
            "POST",
            "/api/policies",
            Some(json!({ "title": "Code of Conduct", "version": "2" })),
        )
        .await;
        let ack = json!({ "policyId": policy["id"], "version": "2" });

        let (first, _) = authed(&app, "POST", "/api/policy-acks", Some(ack.clone())).await;
        let (second, _) = authed(&app, "POST", "/api/policy-acks", Some(ack)).await;
        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CREATED);

        let (_, acks) = authed(&app, "GET", "/api/policy-acks", None).await;
        let acks = acks.as_array().unwrap();
        assert_eq!(acks.len(), 2);
        assert!(acks.iter().all(|a| a["employeeId"] == "emp-1"));

        let (_, others) = send(&app, "GET", "/api/policy-acks", Some("t2"), None).await;
        assert!(others.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ess_defaults_to_caller() {
        let app = app();
        let (status, created) = authed(
            &app,
            "POST",
            "/api/ess",
            Some(json!({ "type": "leave", "payload": { "days": 2 } })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["employeeId"], "emp-1");
        assert_eq!(created["type"], "leave");
        assert_eq!(created["status"], "open");

        let id = created["id"].as_str().unwrap();
        let (_, updated) = authed(
            &app,
            "PATCH",
            &format!("/api/ess/{id}"),
            Some(json!({ "status": "approved" })),
        )
        .await;
        assert_eq!(updated["status"], "approved");
        assert_eq!(updated["type"], "leave");
    }

    #[tokio::test]
    async fn test_pass_starts_unused() {
        let app = app();
        let (status, pass) = authed(
            &app,
            "POST",
            "/api/passes",
            Some(json!({ "userId": "emp-1", "type": "visitor", "usedCount": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(pass["usedCount"], 0);
        assert_eq!(pass["maxUses"], 1);
        assert_eq!(pass["status"], "active");
    }

    #[tokio::test]
    async fn test_pipeline_board_columns_in_order() {
        let app = app();
        authed(
            &app,
            "POST",
            "/api/candidates",
            Some(json!({ "name": "Cy", "email": "cy@example.com", "currentStage": "interview" })),
        )
        .await;

        let (status, board) = authed(&app, "GET", "/api/pipeline", None).await;
        assert_eq!(status, StatusCode::OK);
        let stages: Vec<&str> = board
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["stage"].as_str().unwrap())
            .collect();
        assert_eq!(
            stages,
            ["applied", "screen", "interview", "offer", "onboarding", "hired", "rejected"]
        );
        assert_eq!(board[2]["count"], 1);
    }

    #[tokio::test]
    async fn test_dashboard_summary() {
        let app = app();
        authed(
            &app,
            "POST",
            "/api/recruitment-requests",
            Some(json!({ "title": "SRE", "department": "Platform" })),
        )
        .await;
        authed(&app, "POST", "/api/attendance/clock-in", None).await;

        let (status, summary) = authed(&app, "GET", "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["openPositions"], 1);
        assert_eq!(summary["todaysAttendance"], 1);
        assert_eq!(summary["activeCandidates"], 0);
    }
}
