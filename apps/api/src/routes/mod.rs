pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::calculator::handlers as calculator;
use crate::catalog::handlers as catalog;
use crate::session::handlers as session;
use crate::state::AppState;
use crate::tips;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless lookups
        .route("/api/v1/tips", get(tips::handle_get_tips))
        .route("/api/v1/catalog", get(catalog::handle_get_catalog))
        .route("/api/v1/dti", post(calculator::handle_dti))
        // Wizard sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(session::handle_reset_session),
        )
        .route(
            "/api/v1/sessions/:id/category",
            put(session::handle_select_category),
        )
        .route(
            "/api/v1/sessions/:id/language",
            put(session::handle_set_language),
        )
        .route("/api/v1/sessions/:id/mode", put(session::handle_set_mode))
        .route(
            "/api/v1/sessions/:id/manual",
            put(session::handle_update_manual),
        )
        .route(
            "/api/v1/sessions/:id/slots/:descriptor_id",
            post(session::handle_upload_documents),
        )
        .route(
            "/api/v1/sessions/:id/documents/:file_id",
            axum::routing::delete(session::handle_remove_document),
        )
        .route(
            "/api/v1/sessions/:id/documents/:file_id/preview",
            get(session::handle_preview_document),
        )
        // Analysis
        .route(
            "/api/v1/sessions/:id/analysis",
            post(analysis::handle_run_analysis).get(analysis::handle_get_analysis),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
