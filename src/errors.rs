use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Falhas de validacao de escrita. Cada variante nomeia a invariante
/// violada; todas sao recuperaveis corrigindo a entrada.
#[derive(Debug, Error, PartialEq)]
pub enum ErroValidacao {
    #[error("campo obrigatorio: {0}")]
    CampoObrigatorio(&'static str),

    #[error("{campo}: valor desconhecido '{valor}'")]
    TipoDesconhecido { campo: &'static str, valor: String },

    #[error("data_fim deve ser posterior a data_inicio")]
    PeriodoInvertido,

    #[error("horario da atividade deve estar dentro do periodo do evento")]
    AtividadeForaDoEvento,

    #[error("responsavel ja possui atividade com horario em conflito neste evento")]
    ConflitoDeHorario,

    #[error("username ja esta em uso")]
    UsernameEmUso,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validacao(#[from] ErroValidacao),

    #[error("{0} nao encontrado")]
    NaoEncontrado(&'static str),

    #[error("operacao nao permitida: {0}")]
    SemPermissao(&'static str),

    #[error("erro de banco de dados: {0}")]
    Banco(#[from] sqlx::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validacao(_) => StatusCode::BAD_REQUEST,
            AppError::NaoEncontrado(_) => StatusCode::NOT_FOUND,
            AppError::SemPermissao(_) => StatusCode::FORBIDDEN,
            AppError::Banco(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            // Detalhe do erro de banco fica no log, nao na resposta.
            return (
                status,
                Json(serde_json::json!({ "error": "erro interno" })),
            )
                .into_response();
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
