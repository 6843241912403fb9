//! Adoption handlers.
//!
//! Every write here also moves the linked animal's status.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Adoption, AdoptionRow, AdoptionUpdate, NewAdoption};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, SearchParams};

pub fn adoption_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_adoptions).post(create_adoption))
        .route("/:id", get(get_adoption).put(update_adoption).delete(delete_adoption))
}

/// Adoption board rows, newest first
#[utoipa::path(
    get,
    path = "/adoptions",
    tag = "Adoptions",
    security(("bearer_auth" = [])),
    params(SearchParams),
    responses(
        (status = 200, description = "Adoption rows with resolved names", body = Vec<AdoptionRow>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_adoptions(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<AdoptionRow>> {
    Json(state.adoption_board.search(params.term().unwrap_or_default()))
}

/// Register an adoption for an available animal
#[utoipa::path(
    post,
    path = "/adoptions",
    tag = "Adoptions",
    security(("bearer_auth" = [])),
    request_body = NewAdoption,
    responses(
        (status = 201, description = "Adoption registered; animal status updated", body = Adoption),
        (status = 400, description = "Animal not available or invalid status"),
        (status = 404, description = "Animal, adopter or staff member not found")
    )
)]
pub async fn create_adoption(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewAdoption>,
) -> AppResult<Created<Adoption>> {
    let adoption = state.adoption_service.register_adoption(payload).await?;
    Ok(Created(adoption))
}

#[utoipa::path(
    get,
    path = "/adoptions/{id}",
    tag = "Adoptions",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Adoption ID")),
    responses(
        (status = 200, description = "Adoption", body = Adoption),
        (status = 404, description = "Adoption not found")
    )
)]
pub async fn get_adoption(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Adoption>> {
    let adoption = state.adoption_service.get_adoption(id).await?;
    Ok(Json(adoption))
}

/// Change an adoption's status; "Devolvido" makes the animal available again
#[utoipa::path(
    put,
    path = "/adoptions/{id}",
    tag = "Adoptions",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Adoption ID")),
    request_body = AdoptionUpdate,
    responses(
        (status = 200, description = "Adoption updated; animal status updated", body = Adoption),
        (status = 400, description = "Animal already has another active adoption"),
        (status = 404, description = "Adoption or animal not found")
    )
)]
pub async fn update_adoption(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AdoptionUpdate>,
) -> AppResult<Json<Adoption>> {
    let adoption = state.adoption_service.update_adoption(id, payload).await?;
    Ok(Json(adoption))
}

#[utoipa::path(
    delete,
    path = "/adoptions/{id}",
    tag = "Adoptions",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Adoption ID")),
    responses(
        (status = 204, description = "Adoption deleted; animal is available again"),
        (status = 404, description = "Adoption not found")
    )
)]
pub async fn delete_adoption(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.adoption_service.delete_adoption(id).await?;
    Ok(NoContent)
}
