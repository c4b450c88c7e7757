//! HTTP API
//!
//! Route groups and the guards they run behind:
//!
//! - public: `/`, `/health`, login, refresh-token, `/uploads/*`
//! - every admin: my-business, campaigns, firm-stats (scoped to the admin's business)
//! - super admin only: register, firms, users, global stats

pub mod auth;
pub mod campaigns;
pub mod dashboard;
pub mod firms;
pub mod form;
pub mod health;
pub mod users;

use axum::routing::get;
use axum::{Router, middleware};
use http::{Method, header};
use shared::error::AppError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::admin_auth::{admin_auth_middleware, super_admin_middleware};
use crate::state::AppState;
use crate::upload::PUBLIC_PREFIX;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Build the application with all middleware and state
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(auth::public_router());

    let super_admin = Router::new()
        .merge(auth::admin_router())
        .merge(firms::admin_router())
        .merge(users::router())
        .merge(dashboard::admin_router())
        .route_layer(middleware::from_fn(super_admin_middleware));

    let admin = Router::new()
        .merge(firms::router())
        .merge(campaigns::router())
        .merge(dashboard::router());

    // Outer route_layer runs first: authenticate, then the super admin check
    let protected = super_admin.merge(admin).route_layer(middleware::from_fn_with_state(
        state.clone(),
        admin_auth_middleware,
    ));

    Router::new()
        .merge(public)
        .merge(protected)
        .nest_service(PUBLIC_PREFIX, ServeDir::new(state.uploads.root()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::auth::session::{Subject, SubjectKind, create_token};
    use crate::config::Config;

    const BOUNDARY: &str = "loyalty-test-boundary";

    fn test_state(upload_dir: &std::path::Path) -> AppState {
        let config = Config {
            database_url: "postgres://localhost/loyalty_test".into(),
            port: 0,
            environment: "development".into(),
            jwt_secret: "router-test-secret".into(),
            upload_dir: upload_dir.to_path_buf(),
            stats_utc_offset_minutes: 180,
        };
        // Never connects: these paths are rejected before any query
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        AppState::with_pool(pool, &config).unwrap()
    }

    fn token(state: &AppState, kind: SubjectKind, role: &str, business_id: Option<i64>) -> String {
        let subject = Subject {
            id: 1,
            kind,
            role: role.to_string(),
            business_id,
        };
        create_token(&subject, &state.jwt_secret).unwrap()
    }

    fn super_admin(state: &AppState) -> String {
        token(state, SubjectKind::Admin, "super_admin", None)
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Bearer {t}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, file_name, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    #[tokio::test]
    async fn test_root_is_public() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let response = create_router(state).oneshot(get("/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Admin Panel API is running");
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let (status, body) = send(&state, get("/api/dashboard/stats", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "No token provided");

        let (status, _) = send(&state, get("/api/firms", Some("garbage"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_customer_token_is_403_on_admin_routes() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let customer = token(&state, SubjectKind::Customer, "customer", None);
        let (status, _) = send(&state, get("/api/campaigns/business/1", Some(&customer))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_business_admin_cannot_reach_super_admin_routes() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let business = token(&state, SubjectKind::Admin, "business", Some(5));
        for uri in ["/api/dashboard/stats", "/api/firms", "/api/users"] {
            let (status, _) = send(&state, get(uri, Some(&business))).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_firm_stats_requires_business_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let token = super_admin(&state);
        let (status, body) = send(&state, get("/api/dashboard/firm-stats", Some(&token))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Business ID is required");
    }

    #[tokio::test]
    async fn test_firm_stats_of_other_business_is_403() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let business = token(&state, SubjectKind::Admin, "business", Some(5));
        let (status, _) = send(
            &state,
            get("/api/dashboard/firm-stats?businessId=6", Some(&business)),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_campaign_without_end_date_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let token = super_admin(&state);

        let body = multipart_body(
            &[("businessId", "1"), ("title", "Yaz Kampanyası")],
            Some(("headerImage", "header.png", b"\x89PNG\r\n\x1a\n")),
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/campaigns")
            .header("Authorization", format!("Bearer {token}"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(&state, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "İşletme Kimliği, Başlık ve Bitiş Tarihi zorunludur."
        );
        assert!(!dir.path().join("campaigns").exists());
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/firms")
            .header("Origin", "http://localhost:5173")
            .header("Access-Control-Request-Method", "PATCH")
            .body(Body::empty())
            .unwrap();
        let response = create_router(state).oneshot(request).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }
}
