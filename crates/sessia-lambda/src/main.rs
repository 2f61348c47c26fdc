use std::env;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod routes;
mod state;

use state::AppState;

const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bucket = env::var("SESSIA_BUCKET").unwrap_or_else(|_| "sessia".to_string());
    let model_id = env::var("SESSIA_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

    let s3 = sessia_storage::client::shared_client().await.clone();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

    let state = AppState {
        s3,
        aws_config,
        bucket,
        model_id,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/clients", get(routes::clients::list_clients))
        .route("/clients", post(routes::clients::create_client))
        .route("/clients/{id}", get(routes::clients::get_client))
        .route("/clients/{id}", put(routes::clients::update_client))
        .route("/clients/{id}", delete(routes::clients::delete_client))
        .route(
            "/clients/{id}/sessions",
            get(routes::sessions::list_sessions),
        )
        .route(
            "/clients/{id}/sessions",
            post(routes::sessions::create_session),
        )
        .route(
            "/sessions/{client_id}/{id}",
            get(routes::sessions::get_session),
        )
        .route(
            "/sessions/{client_id}/{id}",
            put(routes::sessions::update_session),
        )
        .route(
            "/sessions/{client_id}/{id}/status",
            post(routes::sessions::set_session_status),
        )
        .route(
            "/sessions/{client_id}/{id}",
            delete(routes::sessions::delete_session),
        )
        .route("/clients/{id}/ai/{kind}", post(routes::ai::generate))
        .route("/clients/{id}/ai", get(routes::ai::list_reports))
        .route(
            "/clients/{id}/reports",
            post(routes::reports::create_report),
        )
        .route("/clients/{id}/reports", get(routes::reports::list_reports))
        .route(
            "/clients/{id}/reports/{rid}",
            get(routes::reports::get_report),
        )
        .route(
            "/clients/{id}/reports/{rid}",
            delete(routes::reports::delete_report),
        )
        .route(
            "/clients/{id}/consent-forms",
            post(routes::consent::create_consent_form),
        )
        .route(
            "/clients/{id}/consent-forms",
            get(routes::consent::list_consent_forms),
        )
        .route(
            "/clients/{id}/invoices",
            post(routes::invoices::create_invoice),
        )
        .route(
            "/clients/{id}/invoices",
            get(routes::invoices::list_invoices),
        )
        .route(
            "/clients/{id}/invoices/{iid}/upload-url",
            post(routes::invoices::upload_url),
        )
        .route(
            "/clients/{id}/invoices/{iid}/download-url",
            get(routes::invoices::download_url),
        )
        .route(
            "/clients/{id}/invoices/{iid}",
            delete(routes::invoices::delete_invoice),
        )
        .route(
            "/subscription",
            get(routes::subscriptions::get_subscription),
        )
        .route(
            "/subscription",
            put(routes::subscriptions::update_subscription),
        )
        .route("/me", get(routes::me::get_me))
        .route("/me", put(routes::me::update_me))
        .route("/audit", get(routes::audit::list_audit))
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    let app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Consent signing happens out of band via a time-limited token
        .route(
            "/consent-forms/sign",
            post(routes::consent::sign_consent_form),
        )
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
