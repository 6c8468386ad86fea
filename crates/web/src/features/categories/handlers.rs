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
        category::{CategoryResponse, CreateCategoryRequest},
        common::{Page, PaginationParams},
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::WebError, extract::Session};

use super::services;

#[utoipa::path(
    post,
    path = "/categorias",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Malformed body or validation error"),
        (status = 409, description = "A category with this nome already exists")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    State(db): State<Database>,
    WithRejection(Json(req), _): WithRejection<Json<CreateCategoryRequest>, WebError>,
) -> Result<Response, WebError> {
    req.validate()?;

    let mut uow = db.begin_write().await?;
    let category = services::create_category(&mut uow, &req).await?;
    uow.commit().await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias",
    params(PaginationParams),
    responses(
        (status = 200, description = "Page of categories", body = Page<CategoryResponse>),
        (status = 400, description = "Invalid pagination parameters")
    ),
    tag = "categorias"
)]
pub async fn list_categories(
    WithRejection(Query(params), _): WithRejection<Query<PaginationParams>, WebError>,
    mut session: Session,
) -> Result<Json<Page<CategoryResponse>>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let categories = services::list_categories(&mut session).await?;

    Ok(Json(
        Page::paginate(categories, &params).map(CategoryResponse::from),
    ))
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, WebError>,
    mut session: Session,
) -> Result<Response, WebError> {
    let category = services::get_category(&mut session, id).await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}
