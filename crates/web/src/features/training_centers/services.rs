use storage::{
    UnitOfWork, dto::training_center::CreateTrainingCenterRequest, error::Result,
    models::TrainingCenter,
};
use uuid::Uuid;

/// List all training centers
pub async fn list_training_centers(uow: &mut UnitOfWork) -> Result<Vec<TrainingCenter>> {
    uow.training_centers().list().await
}

/// Get training center by external id
pub async fn get_training_center(uow: &mut UnitOfWork, id: Uuid) -> Result<TrainingCenter> {
    uow.training_centers().find_by_id(id).await
}

/// Create a new training center
pub async fn create_training_center(
    uow: &mut UnitOfWork,
    request: &CreateTrainingCenterRequest,
) -> Result<TrainingCenter> {
    let center = uow.training_centers().create(request).await?;
    tracing::info!(id = %center.id, nome = %center.nome, "Training center created");
    Ok(center)
}
