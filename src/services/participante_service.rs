use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::participante_repo::{self, NewParticipante};
use crate::errors::{AppError, ErroValidacao};
use crate::models::{ParticipanteRow, TipoParticipante};

#[derive(Debug, Deserialize)]
pub struct ParticipanteInput {
    pub username: String,
    pub email: String,
    pub celular: Option<String>,
    #[serde(default = "tipo_padrao")]
    pub tipo: String,
}

fn tipo_padrao() -> String {
    TipoParticipante::Estudante.as_str().to_string()
}

fn validar(input: &ParticipanteInput) -> Result<TipoParticipante, ErroValidacao> {
    if input.username.trim().is_empty() {
        return Err(ErroValidacao::CampoObrigatorio("username"));
    }
    if input.email.trim().is_empty() {
        return Err(ErroValidacao::CampoObrigatorio("email"));
    }
    TipoParticipante::parse(&input.tipo)
}

pub async fn create(
    pool: &SqlitePool,
    input: &ParticipanteInput,
) -> Result<ParticipanteRow, AppError> {
    let tipo = validar(input)?;
    let id = match participante_repo::insert(
        pool,
        NewParticipante {
            username: input.username.trim(),
            email: input.email.trim(),
            celular: input.celular.as_deref(),
            tipo: tipo.as_str(),
        },
    )
    .await
    {
        Ok(id) => id,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(ErroValidacao::UsernameEmUso.into());
        }
        Err(e) => return Err(e.into()),
    };

    participante_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("participante"))
}

/// Atualizacao de perfil; o username e imutavel.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    input: &ParticipanteInput,
) -> Result<ParticipanteRow, AppError> {
    let tipo = validar(input)?;
    let alteradas = participante_repo::update(
        pool,
        id,
        input.email.trim(),
        input.celular.as_deref(),
        tipo.as_str(),
    )
    .await?;
    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("participante"));
    }
    participante_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("participante"))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<ParticipanteRow, AppError> {
    participante_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("participante"))
}

pub async fn list(
    pool: &SqlitePool,
    tipo: Option<&str>,
    busca: Option<&str>,
) -> Result<Vec<ParticipanteRow>, AppError> {
    if let Some(raw) = tipo {
        TipoParticipante::parse(raw)?;
    }
    Ok(participante_repo::list(pool, tipo, busca).await?)
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let agora = chrono::Utc::now().to_rfc3339();
    let alteradas = participante_repo::soft_delete(pool, id, &agora).await?;
    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("participante"));
    }
    Ok(())
}
