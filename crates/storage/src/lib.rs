use std::str::FromStr;

use sqlx::{
    Sqlite, SqlitePool, Transaction,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;

use error::Result;
use repository::{
    athlete::AthleteRepository, category::CategoryRepository,
    training_center::TrainingCenterRepository,
};

/// Shared connection pool. Cloning is cheap and every clone talks to the same store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Single-connection in-memory store, used by tests.
    ///
    /// The connection is never recycled: dropping it would discard the database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Opens a read-only unit of work.
    pub async fn begin(&self) -> Result<UnitOfWork> {
        let tx = self.pool.begin().await?;
        Ok(UnitOfWork { tx })
    }

    /// Opens a unit of work that will write.
    ///
    /// The write lock is taken up front, so concurrent writers queue on the
    /// busy timeout instead of failing when their reads turn into writes.
    pub async fn begin_write(&self) -> Result<UnitOfWork> {
        let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        Ok(UnitOfWork { tx })
    }
}

/// One transaction against the store, handed to a single request.
///
/// Repositories borrow its connection. Nothing is persisted until
/// [`UnitOfWork::commit`]; dropping it rolls the transaction back.
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    pub fn categories(&mut self) -> CategoryRepository<'_> {
        CategoryRepository::new(&mut self.tx)
    }

    pub fn training_centers(&mut self) -> TrainingCenterRepository<'_> {
        TrainingCenterRepository::new(&mut self.tx)
    }

    pub fn athletes(&mut self) -> AthleteRepository<'_> {
        AthleteRepository::new(&mut self.tx)
    }

    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::dto::athlete::{CategoryRef, CreateAthleteRequest, TrainingCenterRef};
    use crate::dto::category::CreateCategoryRequest;
    use crate::dto::training_center::CreateTrainingCenterRequest;
    use crate::error::StorageError;
    use crate::models::AthleteRecord;

    async fn file_database(dir: &tempfile::TempDir) -> Database {
        let url = format!("sqlite://{}", dir.path().join("workout.db").display());
        let db = Database::new(&url, 4).await.unwrap();
        db.run_migrations().await.unwrap();

        let mut uow = db.begin_write().await.unwrap();
        uow.categories()
            .create(&CreateCategoryRequest {
                nome: "Iniciante".to_string(),
            })
            .await
            .unwrap();
        uow.training_centers()
            .create(&CreateTrainingCenterRequest {
                nome: "CT King".to_string(),
                endereco: "Rua X, Q02".to_string(),
                proprietario: "Marcos".to_string(),
            })
            .await
            .unwrap();
        uow.commit().await.unwrap();

        db
    }

    fn request(cpf: &str) -> CreateAthleteRequest {
        CreateAthleteRequest {
            nome: "Joao".to_string(),
            cpf: cpf.to_string(),
            idade: 25,
            peso: 75.5,
            altura: 1.7,
            sexo: "M".to_string(),
            categoria: CategoryRef {
                nome: "Iniciante".to_string(),
            },
            centro_treinamento: TrainingCenterRef {
                nome: "CT King".to_string(),
            },
        }
    }

    /// Resolves references, inserts, holds the transaction open for `hold`, then commits.
    async fn create_athlete(db: Database, cpf: &'static str, hold: Duration) -> Result<AthleteRecord> {
        let mut uow = db.begin_write().await?;
        let category = uow.categories().find_by_nome("Iniciante").await?.unwrap();
        let center = uow.training_centers().find_by_nome("CT King").await?.unwrap();

        let record = uow.athletes().create(&request(cpf), &category, &center).await?;
        tokio::time::sleep(hold).await;
        uow.commit().await?;

        Ok(record)
    }

    #[tokio::test]
    async fn test_overlapping_writers_both_commit() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir).await;

        let first = tokio::spawn(create_athlete(db.clone(), "11111111111", Duration::from_millis(200)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = tokio::spawn(create_athlete(db.clone(), "22222222222", Duration::ZERO));

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let mut uow = db.begin().await.unwrap();
        assert_eq!(uow.athletes().list_summaries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_writers_with_same_cpf_surface_a_constraint_violation() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir).await;

        let first = tokio::spawn(create_athlete(db.clone(), "11111111111", Duration::from_millis(200)));
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = tokio::spawn(create_athlete(db.clone(), "11111111111", Duration::ZERO));

        first.await.unwrap().unwrap();
        let err = second.await.unwrap().unwrap_err();
        assert!(matches!(err, StorageError::ConstraintViolation(ref msg) if msg.contains("11111111111")));

        let mut uow = db.begin().await.unwrap();
        assert_eq!(uow.athletes().list_summaries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reader_is_not_blocked_by_open_writer() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_database(&dir).await;

        let mut writer = db.begin_write().await.unwrap();
        let category = writer.categories().find_by_nome("Iniciante").await.unwrap().unwrap();
        let center = writer.training_centers().find_by_nome("CT King").await.unwrap().unwrap();
        writer
            .athletes()
            .create(&request("11111111111"), &category, &center)
            .await
            .unwrap();

        let mut reader = db.begin().await.unwrap();
        assert!(reader.athletes().list_summaries().await.unwrap().is_empty());
        drop(reader);

        writer.commit().await.unwrap();
    }
}
