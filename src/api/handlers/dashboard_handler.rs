use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::DashboardStats;
use crate::errors::AppResult;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(stats))
}

/// Aggregate counts for the dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Counts per collection and status", body = DashboardStats),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(stats))
}
