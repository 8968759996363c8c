//! Admin endpoints.
//!
//! Hidden (404) unless `admin.enabled`; otherwise every route requires
//! `Authorization: Bearer <admin.api_key>`. Both are read from the live
//! config, so a reload can turn the endpoints on or off.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::{get_status, get_table};
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/table", get(get_table))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
