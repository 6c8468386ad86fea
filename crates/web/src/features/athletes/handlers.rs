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
        athlete::{
            AthleteResponse, AthleteSummaryResponse, CreateAthleteRequest, UpdateAthleteRequest,
        },
        common::{Page, PaginationParams},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, extract::Session};

use super::services;

#[utoipa::path(
    post,
    path = "/atletas",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 400, description = "Malformed body, validation error or unknown category / training center"),
        (status = 409, description = "An athlete with this cpf already exists")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    WithRejection(Json(req), _): WithRejection<Json<CreateAthleteRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let mut uow = db.begin_write().await?;
    let athlete = services::create_athlete(&mut uow, &req).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of athletes in summary form", body = Page<AthleteSummaryResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    WithRejection(Query(params), _): WithRejection<Query<PaginationParams>, WebError>,
    mut session: Session,
) -> Result<Json<Page<AthleteSummaryResponse>>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let athletes = services::list_athletes(&mut session).await?;

    Ok(Json(
        Page::paginate(athletes, &params).map(AthleteSummaryResponse::from),
    ))
}

#[utoipa::path(
    get,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete(
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
    mut session: Session,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(&mut session, id).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/por-nome/{nome}",
    params(
        ("nome" = String, Path, description = "Athlete name; the earliest registered match is returned")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete_by_nome(
    WithRejection(Path(nome), _): WithRejection<Path<String>, WebError>,
    mut session: Session,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete_by_nome(&mut session, &nome).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/por-cpf/{cpf}",
    params(
        ("cpf" = String, Path, description = "Athlete cpf")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete_by_cpf(
    WithRejection(Path(cpf), _): WithRejection<Path<String>, WebError>,
    mut session: Session,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete_by_cpf(&mut session, &cpf).await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Malformed id or body, or validation error"),
        (status = 404, description = "Athlete not found"),
        (status = 409, description = "Another athlete already has this cpf")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
    WithRejection(Json(update_req), _): WithRejection<Json<UpdateAthleteRequest>, WebError>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let mut uow = db.begin_write().await?;
    let updated = services::update_athlete(&mut uow, id, &update_req).await?;
    uow.commit().await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
) -> Result<Response, WebError> {
    let mut uow = db.begin_write().await?;
    services::delete_athlete(&mut uow, id).await?;
    uow.commit().await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
