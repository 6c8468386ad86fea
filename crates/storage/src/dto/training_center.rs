use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::TrainingCenter;

/// Request payload for creating a new training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateTrainingCenterRequest {
    #[schema(example = "CT King")]
    #[validate(length(min = 1, max = 20, message = "nome must be between 1 and 20 characters"))]
    pub nome: String,

    #[schema(example = "Rua X, Q02")]
    #[validate(length(
        min = 1,
        max = 60,
        message = "endereco must be between 1 and 60 characters"
    ))]
    pub endereco: String,

    #[schema(example = "Marcos")]
    #[validate(length(
        min = 1,
        max = 30,
        message = "proprietario must be between 1 and 30 characters"
    ))]
    pub proprietario: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub proprietario: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(center: TrainingCenter) -> Self {
        Self {
            id: center.id,
            nome: center.nome,
            endereco: center.endereco,
            proprietario: center.proprietario,
        }
    }
}
