use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub pk_id: i64,
    pub id: Uuid,
    pub nome: String,
}
