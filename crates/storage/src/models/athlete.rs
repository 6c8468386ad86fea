use chrono::NaiveDateTime;
use sqlx::FromRow;
use uuid::Uuid;

/// Row of the `atletas` table.
#[derive(Debug, Clone, FromRow)]
pub struct Athlete {
    pub pk_id: i64,
    pub id: Uuid,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub criado_em: NaiveDateTime,
    pub categoria_id: i64,
    pub centro_treinamento_id: i64,
}

/// Athlete joined with the names of its category and training center.
#[derive(Debug, Clone, FromRow)]
pub struct AthleteRecord {
    #[sqlx(flatten)]
    pub athlete: Athlete,
    pub categoria_nome: String,
    pub centro_treinamento_nome: String,
}

/// Light projection used by the athlete listing.
#[derive(Debug, Clone, FromRow)]
pub struct AthleteSummary {
    pub nome: String,
    pub categoria_nome: String,
    pub centro_treinamento_nome: String,
}
