use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ErroValidacao;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InscricaoRow {
    pub id: i64,
    pub participante_id: i64,
    pub evento_id: i64,
    /// Carimbada uma unica vez na criacao, nunca alterada depois.
    pub data_inscricao: DateTime<Utc>,
    pub status: String,
    #[serde(skip_serializing)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusInscricao {
    Pendente,
    Confirmado,
    Cancelado,
}

impl StatusInscricao {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusInscricao::Pendente => "pendente",
            StatusInscricao::Confirmado => "confirmado",
            StatusInscricao::Cancelado => "cancelado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusInscricao::Pendente => "Pendente",
            StatusInscricao::Confirmado => "Confirmado",
            StatusInscricao::Cancelado => "Cancelado",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ErroValidacao> {
        match raw.trim() {
            "pendente" => Ok(StatusInscricao::Pendente),
            "confirmado" => Ok(StatusInscricao::Confirmado),
            "cancelado" => Ok(StatusInscricao::Cancelado),
            other => Err(ErroValidacao::TipoDesconhecido {
                campo: "status",
                valor: other.to_string(),
            }),
        }
    }
}
