use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError};
use crate::models::TrainingCenter;

/// Repository for TrainingCenter database operations
pub struct TrainingCenterRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List all training centers in insertion order
    pub async fn list(&mut self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, nome, endereco, proprietario
            FROM centros_treinamento
            ORDER BY pk_id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(centers)
    }

    /// Get a training center by its external id
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, nome, endereco, proprietario
            FROM centros_treinamento
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| {
            StorageError::NotFound(format!("Centro de treinamento não encontrado no id: {id}"))
        })
    }

    pub async fn find_by_nome(&mut self, nome: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT pk_id, id, nome, endereco, proprietario
            FROM centros_treinamento
            WHERE nome = ?
            "#,
        )
        .bind(nome)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(center)
    }

    /// Create a new training center with a freshly generated external id
    pub async fn create(&mut self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let id = Uuid::new_v4();

        let result = sqlx::query(
            r#"
            INSERT INTO centros_treinamento (id, nome, endereco, proprietario)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&req.nome)
        .bind(&req.endereco)
        .bind(&req.proprietario)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| {
            StorageError::from(e).on_unique_violation(|| {
                format!(
                    "Já existe um centro de treinamento cadastrado com esse nome: {}",
                    req.nome
                )
            })
        })?;

        Ok(TrainingCenter {
            pk_id: result.last_insert_rowid(),
            id,
            nome: req.nome.clone(),
            endereco: req.endereco.clone(),
            proprietario: req.proprietario.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn request(nome: &str) -> CreateTrainingCenterRequest {
        CreateTrainingCenterRequest {
            nome: nome.to_string(),
            endereco: "Rua X, Q02".to_string(),
            proprietario: "Marcos".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_list_and_find() {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        let first = uow.training_centers().create(&request("CT King")).await.unwrap();
        uow.training_centers().create(&request("CT Queen")).await.unwrap();

        let all = uow.training_centers().list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].nome, "CT King");

        let found = uow.training_centers().find_by_nome("CT King").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_duplicate_nome_is_a_constraint_violation() {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        let mut uow = db.begin().await.unwrap();

        uow.training_centers().create(&request("CT King")).await.unwrap();
        let err = uow.training_centers().create(&request("CT King")).await.unwrap_err();

        assert!(matches!(err, StorageError::ConstraintViolation(ref msg) if msg.contains("CT King")));
    }
}
