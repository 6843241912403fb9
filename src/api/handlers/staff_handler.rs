//! Staff handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{ImageUpload, NewStaff, Staff, StaffChanges};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, SearchParams};

pub fn staff_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_staff).post(create_staff))
        .route("/:id", get(get_staff).put(update_staff).delete(delete_staff))
        .route("/:id/image", put(set_image))
}

#[utoipa::path(
    get,
    path = "/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(SearchParams),
    responses(
        (status = 200, description = "Staff ordered by name", body = Vec<Staff>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_staff(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Staff>>> {
    let staff = state.staff_service.list_staff(params.into_term()).await?;
    Ok(Json(staff))
}

#[utoipa::path(
    post,
    path = "/staff",
    tag = "Staff",
    security(("bearer_auth" = [])),
    request_body = NewStaff,
    responses(
        (status = 201, description = "Staff member registered", body = Staff),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewStaff>,
) -> AppResult<Created<Staff>> {
    let member = state.staff_service.register_staff(payload).await?;
    Ok(Created(member))
}

#[utoipa::path(
    get,
    path = "/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    responses(
        (status = 200, description = "Staff member", body = Staff),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn get_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Staff>> {
    let member = state.staff_service.get_staff(id).await?;
    Ok(Json(member))
}

#[utoipa::path(
    put,
    path = "/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    request_body = StaffChanges,
    responses(
        (status = 200, description = "Staff member updated", body = Staff),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<StaffChanges>,
) -> AppResult<Json<Staff>> {
    let member = state.staff_service.update_staff(id, payload).await?;
    Ok(Json(member))
}

#[utoipa::path(
    put,
    path = "/staff/{id}/image",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    request_body = ImageUpload,
    responses(
        (status = 200, description = "Image stored", body = Staff),
        (status = 400, description = "Not a valid image"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn set_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ImageUpload>,
) -> AppResult<Json<Staff>> {
    let member = state.staff_service.set_staff_image(id, payload).await?;
    Ok(Json(member))
}

#[utoipa::path(
    delete,
    path = "/staff/{id}",
    tag = "Staff",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Staff member ID")),
    responses(
        (status = 204, description = "Staff member deleted"),
        (status = 404, description = "Staff member not found")
    )
)]
pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state.staff_service.delete_staff(id).await?;
    Ok(NoContent)
}
