use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::dto::athlete::{CreateAthleteRequest, UpdateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteRecord, AthleteSummary, Category, TrainingCenter};

const SELECT_RECORD: &str = r#"
    SELECT a.pk_id, a.id, a.nome, a.cpf, a.idade, a.peso, a.altura, a.sexo, a.criado_em,
           a.categoria_id, a.centro_treinamento_id,
           c.nome AS categoria_nome,
           ct.nome AS centro_treinamento_nome
    FROM atletas a
    JOIN categorias c ON c.pk_id = a.categoria_id
    JOIN centros_treinamento ct ON ct.pk_id = a.centro_treinamento_id
"#;

fn duplicate_cpf(cpf: &str) -> String {
    format!("Já existe um atleta cadastrado com o cpf: {cpf}")
}

pub struct AthleteRepository<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// List every athlete in the reduced projection, in insertion order
    pub async fn list_summaries(&mut self) -> Result<Vec<AthleteSummary>> {
        let athletes = sqlx::query_as::<_, AthleteSummary>(
            r#"
            SELECT a.nome,
                   c.nome AS categoria_nome,
                   ct.nome AS centro_treinamento_nome
            FROM atletas a
            JOIN categorias c ON c.pk_id = a.categoria_id
            JOIN centros_treinamento ct ON ct.pk_id = a.centro_treinamento_id
            ORDER BY a.pk_id
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(athletes)
    }

    /// Find athlete by external id
    pub async fn find_by_id(&mut self, id: Uuid) -> Result<AthleteRecord> {
        let sql = format!("{SELECT_RECORD} WHERE a.id = ?");

        sqlx::query_as::<_, AthleteRecord>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Atleta não encontrado com o id: {id}")))
    }

    /// Find athlete by name. Names are not unique: the earliest registered match wins.
    pub async fn find_by_nome(&mut self, nome: &str) -> Result<AthleteRecord> {
        let sql = format!("{SELECT_RECORD} WHERE a.nome = ? ORDER BY a.pk_id LIMIT 1");

        sqlx::query_as::<_, AthleteRecord>(&sql)
            .bind(nome)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| {
                StorageError::NotFound(format!("Atleta não encontrado com o nome: {nome}"))
            })
    }

    pub async fn find_by_cpf(&mut self, cpf: &str) -> Result<AthleteRecord> {
        let sql = format!("{SELECT_RECORD} WHERE a.cpf = ?");

        sqlx::query_as::<_, AthleteRecord>(&sql)
            .bind(cpf)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("Atleta não encontrado com o cpf: {cpf}")))
    }

    /// Create a new athlete attached to already resolved category and training center
    pub async fn create(
        &mut self,
        req: &CreateAthleteRequest,
        category: &Category,
        center: &TrainingCenter,
    ) -> Result<AthleteRecord> {
        let mut athlete = Athlete {
            pk_id: 0,
            id: Uuid::new_v4(),
            nome: req.nome.clone(),
            cpf: req.cpf.clone(),
            idade: req.idade,
            peso: req.peso,
            altura: req.altura,
            sexo: req.sexo.clone(),
            criado_em: Utc::now().naive_utc(),
            categoria_id: category.pk_id,
            centro_treinamento_id: center.pk_id,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO atletas (id, nome, cpf, idade, peso, altura, sexo, criado_em,
                                 categoria_id, centro_treinamento_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(athlete.id)
        .bind(&athlete.nome)
        .bind(&athlete.cpf)
        .bind(athlete.idade)
        .bind(athlete.peso)
        .bind(athlete.altura)
        .bind(&athlete.sexo)
        .bind(athlete.criado_em)
        .bind(athlete.categoria_id)
        .bind(athlete.centro_treinamento_id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(|| duplicate_cpf(&req.cpf)))?;

        athlete.pk_id = result.last_insert_rowid();

        Ok(AthleteRecord {
            athlete,
            categoria_nome: category.nome.clone(),
            centro_treinamento_nome: center.nome.clone(),
        })
    }

    /// Merge the fields present in `req` into `existing` and persist the result
    pub async fn update(
        &mut self,
        existing: AthleteRecord,
        req: &UpdateAthleteRequest,
    ) -> Result<AthleteRecord> {
        let AthleteRecord {
            mut athlete,
            categoria_nome,
            centro_treinamento_nome,
        } = existing;

        if let Some(nome) = &req.nome {
            athlete.nome = nome.clone();
        }
        if let Some(cpf) = &req.cpf {
            athlete.cpf = cpf.clone();
        }
        if let Some(idade) = req.idade {
            athlete.idade = idade;
        }
        if let Some(peso) = req.peso {
            athlete.peso = peso;
        }
        if let Some(altura) = req.altura {
            athlete.altura = altura;
        }
        if let Some(sexo) = &req.sexo {
            athlete.sexo = sexo.clone();
        }

        let result = sqlx::query(
            r#"
            UPDATE atletas
            SET nome = ?, cpf = ?, idade = ?, peso = ?, altura = ?, sexo = ?
            WHERE pk_id = ?
            "#,
        )
        .bind(&athlete.nome)
        .bind(&athlete.cpf)
        .bind(athlete.idade)
        .bind(athlete.peso)
        .bind(athlete.altura)
        .bind(&athlete.sexo)
        .bind(athlete.pk_id)
        .execute(&mut *self.conn)
        .await
        .map_err(|e| StorageError::from(e).on_unique_violation(|| duplicate_cpf(&athlete.cpf)))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!(
                "Atleta não encontrado com o id: {}",
                athlete.id
            )));
        }

        Ok(AthleteRecord {
            athlete,
            categoria_nome,
            centro_treinamento_nome,
        })
    }

    /// Delete an athlete by internal key
    pub async fn delete(&mut self, athlete: &Athlete) -> Result<()> {
        let result = sqlx::query("DELETE FROM atletas WHERE pk_id = ?")
            .bind(athlete.pk_id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!(
                "Atleta não encontrado com o id: {}",
                athlete.id
            )));
        }

        Ok(())
    }
}
