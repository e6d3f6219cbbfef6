use serde::{Deserialize, Serialize};

use crate::errors::ErroValidacao;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ParticipanteRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub celular: Option<String>,
    pub tipo: String,
    #[serde(skip_serializing)]
    pub deleted_at: Option<String>,
}

/// Papel de um participante. Armazenado como TEXT na tabela; as regras de
/// permissao ficam aqui em vez de espalhadas pelos handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoParticipante {
    Estudante,
    Convidado,
    Palestrante,
    Organizador,
}

impl TipoParticipante {
    pub const ALL: [TipoParticipante; 4] = [
        TipoParticipante::Estudante,
        TipoParticipante::Convidado,
        TipoParticipante::Palestrante,
        TipoParticipante::Organizador,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoParticipante::Estudante => "estudante",
            TipoParticipante::Convidado => "convidado",
            TipoParticipante::Palestrante => "palestrante",
            TipoParticipante::Organizador => "organizador",
        }
    }

    /// Forma de exibicao (relatorio CSV, paginas HTML).
    pub fn label(&self) -> &'static str {
        match self {
            TipoParticipante::Estudante => "Estudante",
            TipoParticipante::Convidado => "Convidado",
            TipoParticipante::Palestrante => "Palestrante",
            TipoParticipante::Organizador => "Organizador",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ErroValidacao> {
        match raw.trim() {
            "estudante" => Ok(TipoParticipante::Estudante),
            "convidado" => Ok(TipoParticipante::Convidado),
            "palestrante" => Ok(TipoParticipante::Palestrante),
            "organizador" => Ok(TipoParticipante::Organizador),
            other => Err(ErroValidacao::TipoDesconhecido {
                campo: "tipo",
                valor: other.to_string(),
            }),
        }
    }

    /// Eventos e atividades so podem ser criados/alterados por organizadores.
    pub fn gerencia_eventos(&self) -> bool {
        matches!(self, TipoParticipante::Organizador)
    }
}

impl ParticipanteRow {
    pub fn tipo(&self) -> TipoParticipante {
        // A coluna so recebe valores validados; um valor estranho vindo de
        // fora da aplicacao cai no papel de menor privilegio.
        TipoParticipante::parse(&self.tipo).unwrap_or(TipoParticipante::Estudante)
    }
}
