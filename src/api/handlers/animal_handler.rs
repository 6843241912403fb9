//! Animal handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AnimalChanges, AnimalResponse, AnimalStatusChange, ImageUpload, NewAnimal};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, SearchParams};

pub fn animal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_animals).post(create_animal))
        .route("/:id", get(get_animal).put(update_animal).delete(delete_animal))
        .route("/:id/status", put(change_status))
        .route("/:id/image", put(set_image))
}

fn respond(animal: crate::domain::Animal) -> AnimalResponse {
    AnimalResponse::new(animal, Utc::now().date_naive())
}

/// List animals from the live mirror
#[utoipa::path(
    get,
    path = "/animals",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(SearchParams),
    responses(
        (status = 200, description = "Animals ordered by name", body = Vec<AnimalResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_animals(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<AnimalResponse>> {
    let snapshot = state.animals.current();
    let animals = snapshot.search(params.term().unwrap_or_default());
    Json(animals.into_iter().map(respond).collect())
}

/// Register an animal
#[utoipa::path(
    post,
    path = "/animals",
    tag = "Animals",
    security(("bearer_auth" = [])),
    request_body = NewAnimal,
    responses(
        (status = 201, description = "Animal registered", body = AnimalResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_animal(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewAnimal>,
) -> AppResult<Created<AnimalResponse>> {
    let animal = state.animal_service.register_animal(payload).await?;
    Ok(Created(respond(animal)))
}

#[utoipa::path(
    get,
    path = "/animals/{id}",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Animal ID")),
    responses(
        (status = 200, description = "Animal", body = AnimalResponse),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AnimalResponse>> {
    let animal = state.animal_service.get_animal(id).await?;
    Ok(Json(respond(animal)))
}

#[utoipa::path(
    put,
    path = "/animals/{id}",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Animal ID")),
    request_body = AnimalChanges,
    responses(
        (status = 200, description = "Animal updated", body = AnimalResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AnimalChanges>,
) -> AppResult<Json<AnimalResponse>> {
    let animal = state.animal_service.update_animal(id, payload).await?;
    Ok(Json(respond(animal)))
}

/// Set the status directly, outside any adoption
#[utoipa::path(
    put,
    path = "/animals/{id}/status",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Animal ID")),
    request_body = AnimalStatusChange,
    responses(
        (status = 200, description = "Status changed", body = AnimalResponse),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AnimalStatusChange>,
) -> AppResult<Json<AnimalResponse>> {
    let animal = state.animal_service.change_status(id, payload.status).await?;
    Ok(Json(respond(animal)))
}

/// Replace the animal's picture
#[utoipa::path(
    put,
    path = "/animals/{id}/image",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Animal ID")),
    request_body = ImageUpload,
    responses(
        (status = 200, description = "Image stored", body = AnimalResponse),
        (status = 400, description = "Not a valid image"),
        (status = 404, description = "Animal not found"),
        (status = 503, description = "Object storage unavailable")
    )
)]
pub async fn set_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ImageUpload>,
) -> AppResult<Json<AnimalResponse>> {
    let animal = state.animal_service.set_animal_image(id, payload).await?;
    Ok(Json(respond(animal)))
}

#[utoipa::path(
    delete,
    path = "/animals/{id}",
    tag = "Animals",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Animal ID")),
    responses(
        (status = 204, description = "Animal deleted"),
        (status = 404, description = "Animal not found")
    )
)]
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.animal_service.delete_animal(id).await?;
    Ok(NoContent)
}
