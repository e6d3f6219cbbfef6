use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::evento_repo::{self, NewEvento};
use crate::errors::{AppError, ErroValidacao};
use crate::models::EventoRow;

#[derive(Debug, Deserialize)]
pub struct EventoInput {
    pub nome: String,
    #[serde(default)]
    pub descricao: String,
    pub banner_url: Option<String>,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: DateTime<Utc>,
    pub local: String,
}

fn validar(input: &EventoInput) -> Result<(), ErroValidacao> {
    if input.nome.trim().is_empty() {
        return Err(ErroValidacao::CampoObrigatorio("nome"));
    }
    if input.local.trim().is_empty() {
        return Err(ErroValidacao::CampoObrigatorio("local"));
    }
    if input.data_fim <= input.data_inicio {
        return Err(ErroValidacao::PeriodoInvertido);
    }
    Ok(())
}

fn como_registro(input: &EventoInput) -> NewEvento<'_> {
    NewEvento {
        nome: input.nome.trim(),
        descricao: input.descricao.trim(),
        banner_url: input.banner_url.as_deref(),
        data_inicio: input.data_inicio,
        data_fim: input.data_fim,
        local: input.local.trim(),
    }
}

/// Valida e persiste num unico caminho: nada e gravado se a validacao
/// falhar.
pub async fn create(pool: &SqlitePool, input: &EventoInput) -> Result<EventoRow, AppError> {
    validar(input)?;
    let id = evento_repo::insert(pool, como_registro(input)).await?;
    evento_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))
}

pub async fn update(pool: &SqlitePool, id: i64, input: &EventoInput) -> Result<EventoRow, AppError> {
    validar(input)?;
    let alteradas = evento_repo::update(pool, id, como_registro(input)).await?;
    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("evento"));
    }
    evento_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<EventoRow, AppError> {
    evento_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))
}

pub async fn list(
    pool: &SqlitePool,
    busca: Option<&str>,
    local: Option<&str>,
    ordenar: Option<&str>,
) -> Result<Vec<EventoRow>, AppError> {
    let por_nome = matches!(ordenar, Some("nome"));
    Ok(evento_repo::list(pool, busca, local, por_nome).await?)
}

/// Remocao logica em cascata (evento + atividades + inscricoes).
pub async fn remove(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let agora = Utc::now().to_rfc3339();
    let alteradas = evento_repo::soft_delete_cascade(pool, id, &agora).await?;
    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("evento"));
    }
    Ok(())
}
