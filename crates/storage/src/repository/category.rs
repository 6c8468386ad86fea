use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::dto::category::CreateCategoryRequest;
use crate::error::{Result, StorageError};
use crate::models::Category;

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List all categories in insertion order
    pub async fn list(&mut self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT pk_id, id, nome FROM categorias ORDER BY pk_id",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(categories)
    }

    /// Get a category by its external id
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>("SELECT pk_id, id, nome FROM categorias WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Categoria não encontrada no id: {id}")))
    }

    pub async fn find_by_nome(&mut self, nome: &str) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT pk_id, id, nome FROM categorias WHERE nome = ?")
                .bind(nome)
                .fetch_optional(&mut *self.conn)
                .await?;

        Ok(category)
    }

    /// Create a new category with a freshly generated external id
    pub async fn create(&mut self, req: &CreateCategoryRequest) -> Result<Category> {
        let id = Uuid::new_v4();

        let result = sqlx::query("INSERT INTO categorias (id, nome) VALUES (?, ?)")
            .bind(id)
            .bind(&req.nome)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| {
                StorageError::from(e).on_unique_violation(|| {
                    format!("Já existe uma categoria cadastrada com esse nome: {}", req.nome)
                })
            })?;

        Ok(Category {
            pk_id: result.last_insert_rowid(),
            id,
            nome: req.nome.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db
    }

    fn request(nome: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            nome: nome.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let db = setup().await;
        let mut uow = db.begin().await.unwrap();

        let created = uow.categories().create(&request("Scale")).await.unwrap();
        let found = uow.categories().find_by_id(created.id).await.unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.pk_id, created.pk_id);
        assert_eq!(found.nome, "Scale");
    }

    #[tokio::test]
    async fn test_duplicate_nome_is_a_constraint_violation() {
        let db = setup().await;
        let mut uow = db.begin().await.unwrap();

        uow.categories().create(&request("Scale")).await.unwrap();
        let err = uow.categories().create(&request("Scale")).await.unwrap_err();

        match err {
            StorageError::ConstraintViolation(msg) => assert!(msg.contains("Scale")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(uow.categories().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let db = setup().await;
        let mut uow = db.begin().await.unwrap();
        let id = Uuid::new_v4();

        let err = uow.categories().find_by_id(id).await.unwrap_err();

        match err {
            StorageError::NotFound(msg) => assert!(msg.contains(&id.to_string())),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dropped_unit_of_work_rolls_back() {
        let db = setup().await;
        {
            let mut uow = db.begin().await.unwrap();
            uow.categories().create(&request("Scale")).await.unwrap();
        }

        let mut uow = db.begin().await.unwrap();
        assert!(uow.categories().find_by_nome("Scale").await.unwrap().is_none());
    }
}
