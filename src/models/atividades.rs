use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ErroValidacao;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AtividadeRow {
    pub id: i64,
    pub evento_id: i64,
    pub responsavel_id: Option<i64>,
    pub titulo: String,
    pub descricao: String,
    pub horario_inicio: DateTime<Utc>,
    pub horario_fim: DateTime<Utc>,
    pub tipo: String,
    #[serde(skip_serializing)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoAtividade {
    Palestra,
    Workshop,
    Oficina,
}

impl TipoAtividade {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAtividade::Palestra => "palestra",
            TipoAtividade::Workshop => "workshop",
            TipoAtividade::Oficina => "oficina",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipoAtividade::Palestra => "Palestra",
            TipoAtividade::Workshop => "Workshop",
            TipoAtividade::Oficina => "Oficina",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ErroValidacao> {
        match raw.trim() {
            "palestra" => Ok(TipoAtividade::Palestra),
            "workshop" => Ok(TipoAtividade::Workshop),
            "oficina" => Ok(TipoAtividade::Oficina),
            other => Err(ErroValidacao::TipoDesconhecido {
                campo: "tipo",
                valor: other.to_string(),
            }),
        }
    }
}

/// Teste de sobreposicao de intervalos meio-abertos [s1,e1) e [s2,e2).
/// Intervalos que apenas se tocam (e1 == s2) nao contam como conflito.
pub fn intervalos_sobrepoem(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}
