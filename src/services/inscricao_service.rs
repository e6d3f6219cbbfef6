use chrono::Utc;
use sqlx::SqlitePool;

use crate::database::{evento_repo, inscricao_repo, participante_repo};
use crate::errors::AppError;
use crate::models::{InscricaoRow, StatusInscricao};

/// Desfecho de uma tentativa de inscricao. A camada HTTP mapeia cada
/// variante para uma resposta distinta.
#[derive(Debug)]
pub enum ResultadoInscricao {
    Criada(InscricaoRow),
    JaInscrito,
    EventoEncerrado,
}

/// Regras de inscricao: par (participante, evento) unico e evento ainda
/// nao encerrado no instante da escrita. O pre-check de duplicata so
/// melhora a mensagem; quem decide corridas e a restricao UNIQUE.
pub async fn inscrever(
    pool: &SqlitePool,
    participante_id: i64,
    evento_id: i64,
) -> Result<ResultadoInscricao, AppError> {
    if participante_repo::get(pool, participante_id).await?.is_none() {
        return Err(AppError::NaoEncontrado("participante"));
    }
    let evento = evento_repo::get(pool, evento_id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))?;

    let agora = Utc::now();
    if !evento.aceita_inscricao(agora) {
        return Ok(ResultadoInscricao::EventoEncerrado);
    }

    if inscricao_repo::find_por_par(pool, participante_id, evento_id)
        .await?
        .is_some()
    {
        return Ok(ResultadoInscricao::JaInscrito);
    }

    let id = match inscricao_repo::insert(pool, participante_id, evento_id, agora).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            // Um escritor concorrente chegou primeiro.
            return Ok(ResultadoInscricao::JaInscrito);
        }
        Err(e) => return Err(e.into()),
    };

    let row = inscricao_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("inscricao"))?;
    Ok(ResultadoInscricao::Criada(row))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<InscricaoRow, AppError> {
    inscricao_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("inscricao"))
}

pub async fn list(
    pool: &SqlitePool,
    participante_id: Option<i64>,
    status: Option<&str>,
) -> Result<Vec<InscricaoRow>, AppError> {
    if let Some(raw) = status {
        StatusInscricao::parse(raw)?;
    }
    Ok(inscricao_repo::list(pool, participante_id, status).await?)
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: &str,
) -> Result<InscricaoRow, AppError> {
    let status = StatusInscricao::parse(status)?;
    let alteradas = inscricao_repo::update_status(pool, id, status.as_str()).await?;
    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("inscricao"));
    }
    inscricao_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("inscricao"))
}

/// Cancelamento e uma mudanca de status; a linha permanece para manter o
/// par (participante, evento) unico.
pub async fn cancelar(pool: &SqlitePool, id: i64) -> Result<InscricaoRow, AppError> {
    update_status(pool, id, StatusInscricao::Cancelado.as_str()).await
}
