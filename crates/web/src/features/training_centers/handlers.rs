use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use storage::{
    Database,
    dto::{
        common::{Page, PaginationParams},
        training_center::{CreateTrainingCenterRequest, TrainingCenterResponse},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, extract::Session};

use super::services;

#[utoipa::path(
    post,
    path = "/centros_treinamento",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 400, description = "Malformed body or validation error"),
        (status = 409, description = "A training center with this nome already exists")
    ),
    tag = "centros_treinamento"
)]
pub async fn create_training_center(
    State(db): State<Database>,
    WithRejection(Json(req), _): WithRejection<Json<CreateTrainingCenterRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let mut uow = db.begin_write().await?;
    let center = services::create_training_center(&mut uow, &req).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(TrainingCenterResponse::from(center))).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of training centers", body = Page<TrainingCenterResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "centros_treinamento"
)]
pub async fn list_training_centers(
    WithRejection(Query(params), _): WithRejection<Query<PaginationParams>, WebError>,
    mut session: Session,
) -> Result<Json<Page<TrainingCenterResponse>>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let centers = services::list_training_centers(&mut session).await?;

    Ok(Json(
        Page::paginate(centers, &params).map(TrainingCenterResponse::from),
    ))
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Training center not found")
    ),
    tag = "centros_treinamento"
)]
pub async fn get_training_center(
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
    mut session: Session,
) -> Result<Response, WebError> {
    let center = services::get_training_center(&mut session, id).await?;

    Ok(Json(TrainingCenterResponse::from(center)).into_response())
}
