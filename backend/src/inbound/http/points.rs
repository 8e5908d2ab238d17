//! Map point HTTP handlers.
//!
//! ```text
//! GET /api/points
//! PUT /api/points {"longitude":37.6173,"latitude":55.7558,"description":"Red Square"}
//! PUT /api/points/{id}
//! DELETE /api/points/{id}
//! ```
//!
//! Saving checks authentication, then the payload, then existence and
//! ownership. Deleting checks existence before authentication. A session
//! whose user no longer exists counts as unauthenticated.

use actix_web::{HttpResponse, delete, get, put, web};

use crate::domain::ports::{DeletePointRequest, SavePointRequest};
use crate::domain::{Error, PointDraft, PointId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{PointRequest, PointResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::UserSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_point_draft, parse_point_id};

type PointPayload = Result<web::Json<PointRequest>, actix_web::Error>;

fn draft_from(payload: PointPayload) -> Result<PointDraft, Error> {
    let body = payload.map_err(Error::from)?.into_inner();
    parse_point_draft(
        body.longitude.as_ref(),
        body.latitude.as_ref(),
        body.description.as_ref(),
    )
}

async fn save(
    state: &HttpState,
    actor: UserId,
    target: Option<PointId>,
    draft: PointDraft,
) -> ApiResult<web::Json<PointResponse>> {
    let point = state
        .points_command
        .save_point(SavePointRequest {
            actor,
            target,
            draft,
        })
        .await?;
    Ok(web::Json(PointResponse::from(point)))
}

/// List every point. No session is required.
#[utoipa::path(
    get,
    path = "/api/points",
    responses(
        (status = 200, description = "All points ordered by id", body = [PointResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "listPoints",
    security([])
)]
#[get("/points")]
pub async fn list_points(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PointResponse>>> {
    let points = state.points_query.list_points().await?;
    Ok(web::Json(
        points.into_iter().map(PointResponse::from).collect(),
    ))
}

/// Create a point owned by the signed-in user.
#[utoipa::path(
    put,
    path = "/api/points",
    request_body = PointRequest,
    responses(
        (status = 200, description = "Created point", body = PointResponse),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "createPoint"
)]
#[put("/points")]
pub async fn create_point(
    state: web::Data<HttpState>,
    session: UserSession,
    payload: PointPayload,
) -> ApiResult<web::Json<PointResponse>> {
    let actor = session
        .require_existing_user(state.current_user.as_ref())
        .await?;
    let draft = draft_from(payload)?;
    save(&state, actor, None, draft).await
}

/// Replace the coordinates and description of one of the caller's points.
#[utoipa::path(
    put,
    path = "/api/points/{id}",
    params(("id" = i64, Path, description = "Point identifier")),
    request_body = PointRequest,
    responses(
        (status = 200, description = "Updated point", body = PointResponse),
        (status = 400, description = "Invalid payload", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Point belongs to another user", body = ErrorSchema),
        (status = 404, description = "Point not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "updatePoint"
)]
#[put("/points/{id}")]
pub async fn update_point(
    state: web::Data<HttpState>,
    session: UserSession,
    path: web::Path<String>,
    payload: PointPayload,
) -> ApiResult<web::Json<PointResponse>> {
    let actor = session
        .require_existing_user(state.current_user.as_ref())
        .await?;
    let draft = draft_from(payload)?;
    let target = parse_point_id(&path)?;
    save(&state, actor, Some(target), draft).await
}

/// Delete one of the caller's points.
#[utoipa::path(
    delete,
    path = "/api/points/{id}",
    params(("id" = i64, Path, description = "Point identifier")),
    responses(
        (status = 204, description = "Point deleted"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Point belongs to another user", body = ErrorSchema),
        (status = 404, description = "Point not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["points"],
    operation_id = "deletePoint"
)]
#[delete("/points/{id}")]
pub async fn delete_point(
    state: web::Data<HttpState>,
    session: UserSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let target = parse_point_id(&path)?;
    state.points_query.find_point(target).await?;
    let actor = session
        .require_existing_user(state.current_user.as_ref())
        .await?;
    state
        .points_command
        .delete_point(DeletePointRequest { actor, target })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "points_tests.rs"]
mod tests;
