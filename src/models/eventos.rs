use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EventoRow {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub banner_url: Option<String>,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: DateTime<Utc>,
    pub local: String,
    #[serde(skip_serializing)]
    pub deleted_at: Option<String>,
}

impl EventoRow {
    /// Inscricoes sao aceitas ate o fim do evento, inclusive durante ele.
    pub fn aceita_inscricao(&self, agora: DateTime<Utc>) -> bool {
        self.data_fim >= agora
    }
}
