use storage::{
    UnitOfWork,
    dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest},
    error::Result,
    models::{AthleteRecord, AthleteSummary},
};
use uuid::Uuid;

use crate::error::{ApiResult, WebError};

/// List all athletes in the summary projection
pub async fn list_athletes(uow: &mut UnitOfWork) -> Result<Vec<AthleteSummary>> {
    uow.athletes().list_summaries().await
}

pub async fn get_athlete(uow: &mut UnitOfWork, id: Uuid) -> Result<AthleteRecord> {
    uow.athletes().find_by_id(id).await
}

pub async fn get_athlete_by_nome(uow: &mut UnitOfWork, nome: &str) -> Result<AthleteRecord> {
    uow.athletes().find_by_nome(nome).await
}

pub async fn get_athlete_by_cpf(uow: &mut UnitOfWork, cpf: &str) -> Result<AthleteRecord> {
    uow.athletes().find_by_cpf(cpf).await
}

/// Create a new athlete.
///
/// Category and training center are referenced by name and must already
/// exist; a missing one is reported as a bad request, not a missing resource.
pub async fn create_athlete(
    uow: &mut UnitOfWork,
    request: &CreateAthleteRequest,
) -> ApiResult<AthleteRecord> {
    let categoria_nome = &request.categoria.nome;
    let Some(category) = uow.categories().find_by_nome(categoria_nome).await? else {
        tracing::warn!(categoria = %categoria_nome, "Athlete references unknown category");
        return Err(WebError::BadRequest(format!(
            "A Categoria {categoria_nome} não encontrada."
        )));
    };

    let centro_nome = &request.centro_treinamento.nome;
    let Some(center) = uow.training_centers().find_by_nome(centro_nome).await? else {
        tracing::warn!(centro_treinamento = %centro_nome, "Athlete references unknown training center");
        return Err(WebError::BadRequest(format!(
            "O centro de treinamento {centro_nome} não foi encontrado."
        )));
    };

    let athlete = uow.athletes().create(request, &category, &center).await?;
    tracing::info!(id = %athlete.athlete.id, "Athlete created");

    Ok(athlete)
}

/// Update an athlete
pub async fn update_athlete(
    uow: &mut UnitOfWork,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> Result<AthleteRecord> {
    let mut repo = uow.athletes();

    let existing = repo.find_by_id(id).await?;
    repo.update(existing, request).await
}

/// Delete an athlete
pub async fn delete_athlete(uow: &mut UnitOfWork, id: Uuid) -> Result<()> {
    let mut repo = uow.athletes();

    let existing = repo.find_by_id(id).await?;
    repo.delete(&existing.athlete).await?;
    tracing::info!(%id, "Athlete deleted");

    Ok(())
}
