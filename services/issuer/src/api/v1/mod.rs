//! API v1 routes.

mod plates;

use axum::Router;

use crate::state::AppState;

/// Create API v1 routes.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/plates", plates::routes())
}
