use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{AthleteRecord, AthleteSummary};

/// Category referenced by name from an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryRef {
    #[schema(example = "Scale")]
    #[validate(length(min = 1, max = 10, message = "nome must be between 1 and 10 characters"))]
    pub nome: String,
}

/// Training center referenced by name from an athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TrainingCenterRef {
    #[schema(example = "CT King")]
    #[validate(length(min = 1, max = 20, message = "nome must be between 1 and 20 characters"))]
    pub nome: String,
}

/// Full athlete representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub criado_em: NaiveDateTime,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub categoria: CategoryRef,
    pub centro_treinamento: TrainingCenterRef,
}

/// Reduced athlete view returned by the listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummaryResponse {
    pub nome: String,
    pub categoria: CategoryRef,
    pub centro_treinamento: TrainingCenterRef,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAthleteRequest {
    #[schema(example = "Joao")]
    #[validate(length(min = 1, max = 50, message = "nome must be between 1 and 50 characters"))]
    pub nome: String,

    #[schema(example = "12345678900")]
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,

    #[schema(example = 25)]
    #[validate(range(min = 0, max = 150, message = "idade must be between 0 and 150"))]
    pub idade: i32,

    #[schema(example = 75.5)]
    #[validate(range(exclusive_min = 0.0, message = "peso must be positive"))]
    pub peso: f64,

    #[schema(example = 1.70)]
    #[validate(range(exclusive_min = 0.0, message = "altura must be positive"))]
    pub altura: f64,

    #[schema(example = "M")]
    #[validate(length(equal = 1, message = "sexo must be a single character"))]
    pub sexo: String,

    #[validate(nested)]
    pub categoria: CategoryRef,

    #[validate(nested)]
    pub centro_treinamento: TrainingCenterRef,
}

/// Request payload for partially updating an athlete. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 1, max = 50))]
    pub nome: Option<String>,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,

    #[validate(range(min = 0, max = 150))]
    pub idade: Option<i32>,

    #[validate(range(exclusive_min = 0.0))]
    pub peso: Option<f64>,

    #[validate(range(exclusive_min = 0.0))]
    pub altura: Option<f64>,

    #[validate(length(equal = 1))]
    pub sexo: Option<String>,
}

// Validation helper
fn validate_cpf(cpf: &str) -> Result<(), validator::ValidationError> {
    if cpf.len() == 11 && cpf.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_cpf");
        error.message = Some("cpf must have exactly 11 digits".into());
        Err(error)
    }
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        let athlete = record.athlete;
        Self {
            id: athlete.id,
            criado_em: athlete.criado_em,
            nome: athlete.nome,
            cpf: athlete.cpf,
            idade: athlete.idade,
            peso: athlete.peso,
            altura: athlete.altura,
            sexo: athlete.sexo,
            categoria: CategoryRef {
                nome: record.categoria_nome,
            },
            centro_treinamento: TrainingCenterRef {
                nome: record.centro_treinamento_nome,
            },
        }
    }
}

impl From<AthleteSummary> for AthleteSummaryResponse {
    fn from(summary: AthleteSummary) -> Self {
        Self {
            nome: summary.nome,
            categoria: CategoryRef {
                nome: summary.categoria_nome,
            },
            centro_treinamento: TrainingCenterRef {
                nome: summary.centro_treinamento_nome,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> CreateAthleteRequest {
        serde_json::from_value(json!({
            "nome": "Joao",
            "cpf": "12345678900",
            "idade": 25,
            "peso": 75.5,
            "altura": 1.70,
            "sexo": "M",
            "categoria": { "nome": "Scale" },
            "centro_treinamento": { "nome": "CT King" }
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_cpf_must_be_eleven_digits() {
        let mut req = valid_request();
        req.cpf = "1234567890".to_string();
        assert!(req.validate().is_err());

        req.cpf = "1234567890a".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cpf"));
    }

    #[test]
    fn test_nested_category_name_is_validated() {
        let mut req = valid_request();
        req.categoria.nome = "Intermediario".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_positive_weight_is_rejected() {
        let mut req = valid_request();
        req.peso = 0.0;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("peso"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_value::<UpdateAthleteRequest>(json!({ "apelido": "Jo" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_only_validates_present_fields() {
        let req: UpdateAthleteRequest = serde_json::from_value(json!({ "peso": 80.5 })).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.peso, Some(80.5));
        assert!(req.nome.is_none());

        let req: UpdateAthleteRequest = serde_json::from_value(json!({ "sexo": "MF" })).unwrap();
        assert!(req.validate().is_err());
    }
}
