use axum::Json;
use utoipa::OpenApi;

use crate::features::{athletes, categories, training_centers};

#[derive(OpenApi)]
#[openapi(
    paths(
        categories::handlers::create_category,
        categories::handlers::list_categories,
        categories::handlers::get_category,
        training_centers::handlers::create_training_center,
        training_centers::handlers::list_training_centers,
        training_centers::handlers::get_training_center,
        athletes::handlers::create_athlete,
        athletes::handlers::list_athletes,
        athletes::handlers::get_athlete,
        athletes::handlers::get_athlete_by_nome,
        athletes::handlers::get_athlete_by_cpf,
        athletes::handlers::update_athlete,
        athletes::handlers::delete_athlete,
    ),
    components(
        schemas(
            storage::dto::category::CreateCategoryRequest,
            storage::dto::category::CategoryResponse,
            storage::dto::training_center::CreateTrainingCenterRequest,
            storage::dto::training_center::TrainingCenterResponse,
            storage::dto::athlete::CreateAthleteRequest,
            storage::dto::athlete::UpdateAthleteRequest,
            storage::dto::athlete::AthleteResponse,
            storage::dto::athlete::AthleteSummaryResponse,
            storage::dto::athlete::CategoryRef,
            storage::dto::athlete::TrainingCenterRef,
            storage::dto::common::PaginationParams,
        )
    ),
    tags(
        (name = "categorias", description = "Category endpoints"),
        (name = "centros_treinamento", description = "Training center endpoints"),
        (name = "atletas", description = "Athlete endpoints"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
