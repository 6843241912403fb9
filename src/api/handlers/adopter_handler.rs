//! Adopter handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Adopter, AdopterChanges, NewAdopter};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, SearchParams};

pub fn adopter_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_adopters).post(create_adopter))
        .route("/:id", get(get_adopter).put(update_adopter).delete(delete_adopter))
}

#[utoipa::path(
    get,
    path = "/adopters",
    tag = "Adopters",
    security(("bearer_auth" = [])),
    params(SearchParams),
    responses(
        (status = 200, description = "Adopters ordered by name", body = Vec<Adopter>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_adopters(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Adopter>>> {
    let adopters = state.adopter_service.list_adopters(params.into_term()).await?;
    Ok(Json(adopters))
}

/// Register an adopter; CPF, RG, email and phone must be unused
#[utoipa::path(
    post,
    path = "/adopters",
    tag = "Adopters",
    security(("bearer_auth" = [])),
    request_body = NewAdopter,
    responses(
        (status = 201, description = "Adopter registered", body = Adopter),
        (status = 400, description = "Validation error"),
        (status = 409, description = "CPF, RG, email or phone already registered")
    )
)]
pub async fn create_adopter(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewAdopter>,
) -> AppResult<Created<Adopter>> {
    let adopter = state.adopter_service.register_adopter(payload).await?;
    Ok(Created(adopter))
}

#[utoipa::path(
    get,
    path = "/adopters/{id}",
    tag = "Adopters",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Adopter ID")),
    responses(
        (status = 200, description = "Adopter", body = Adopter),
        (status = 404, description = "Adopter not found")
    )
)]
pub async fn get_adopter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Adopter>> {
    let adopter = state.adopter_service.get_adopter(id).await?;
    Ok(Json(adopter))
}

#[utoipa::path(
    put,
    path = "/adopters/{id}",
    tag = "Adopters",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Adopter ID")),
    request_body = AdopterChanges,
    responses(
        (status = 200, description = "Adopter updated", body = Adopter),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Adopter not found"),
        (status = 409, description = "Identity already used by another adopter")
    )
)]
pub async fn update_adopter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AdopterChanges>,
) -> AppResult<Json<Adopter>> {
    let adopter = state.adopter_service.update_adopter(id, payload).await?;
    Ok(Json(adopter))
}

#[utoipa::path(
    delete,
    path = "/adopters/{id}",
    tag = "Adopters",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Adopter ID")),
    responses(
        (status = 204, description = "Adopter deleted"),
        (status = 404, description = "Adopter not found")
    )
)]
pub async fn delete_adopter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.adopter_service.delete_adopter(id).await?;
    Ok(NoContent)
}
