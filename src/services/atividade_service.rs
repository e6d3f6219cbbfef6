use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::database::{atividade_repo, evento_repo, participante_repo};
use crate::errors::{AppError, ErroValidacao};
use crate::models::{AtividadeRow, EventoRow, TipoAtividade};

#[derive(Debug, Deserialize)]
pub struct AtividadeInput {
    pub titulo: String,
    #[serde(default)]
    pub descricao: String,
    pub horario_inicio: DateTime<Utc>,
    pub horario_fim: DateTime<Utc>,
    pub tipo: String,
    pub responsavel_id: Option<i64>,
}

/// Verificador de conflito de agenda: janela valida, janela contida no
/// periodo do evento e, havendo responsavel, nenhuma outra atividade do
/// mesmo evento com o mesmo responsavel em horario sobreposto.
/// `exceto_id` exclui a propria atividade ao revalidar um update.
async fn validar_janela(
    pool: &SqlitePool,
    evento: &EventoRow,
    input: &AtividadeInput,
    exceto_id: Option<i64>,
) -> Result<TipoAtividade, AppError> {
    if input.titulo.trim().is_empty() {
        return Err(ErroValidacao::CampoObrigatorio("titulo").into());
    }
    let tipo = TipoAtividade::parse(&input.tipo)?;

    if input.horario_fim <= input.horario_inicio {
        return Err(ErroValidacao::PeriodoInvertido.into());
    }
    // Igualdade nas bordas e aceita; so estourar o periodo rejeita.
    if input.horario_inicio < evento.data_inicio || input.horario_fim > evento.data_fim {
        return Err(ErroValidacao::AtividadeForaDoEvento.into());
    }

    if let Some(responsavel_id) = input.responsavel_id {
        if participante_repo::get(pool, responsavel_id).await?.is_none() {
            return Err(AppError::NaoEncontrado("participante"));
        }
        let conflitos = atividade_repo::count_conflitos_responsavel(
            pool,
            evento.id,
            responsavel_id,
            exceto_id,
            input.horario_inicio,
            input.horario_fim,
        )
        .await?;
        if conflitos > 0 {
            return Err(ErroValidacao::ConflitoDeHorario.into());
        }
    }

    Ok(tipo)
}

pub async fn create(
    pool: &SqlitePool,
    evento_id: i64,
    input: &AtividadeInput,
) -> Result<AtividadeRow, AppError> {
    let evento = evento_repo::get(pool, evento_id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))?;
    let tipo = validar_janela(pool, &evento, input, None).await?;

    let id = atividade_repo::insert(
        pool,
        atividade_repo::NewAtividade {
            evento_id,
            responsavel_id: input.responsavel_id,
            titulo: input.titulo.trim(),
            descricao: input.descricao.trim(),
            horario_inicio: input.horario_inicio,
            horario_fim: input.horario_fim,
            tipo: tipo.as_str(),
        },
    )
    .await?;

    atividade_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("atividade"))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    input: &AtividadeInput,
) -> Result<AtividadeRow, AppError> {
    let atual = atividade_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("atividade"))?;
    let evento = evento_repo::get(pool, atual.evento_id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))?;
    let tipo = validar_janela(pool, &evento, input, Some(id)).await?;

    atividade_repo::update(
        pool,
        id,
        atividade_repo::NewAtividade {
            evento_id: atual.evento_id,
            responsavel_id: input.responsavel_id,
            titulo: input.titulo.trim(),
            descricao: input.descricao.trim(),
            horario_inicio: input.horario_inicio,
            horario_fim: input.horario_fim,
            tipo: tipo.as_str(),
        },
    )
    .await?;

    atividade_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("atividade"))
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<AtividadeRow, AppError> {
    atividade_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("atividade"))
}

pub async fn list(
    pool: &SqlitePool,
    evento_id: Option<i64>,
    tipo: Option<&str>,
    busca: Option<&str>,
) -> Result<Vec<AtividadeRow>, AppError> {
    if let Some(raw) = tipo {
        // Falha cedo com a mensagem de vocabulario em vez de lista vazia.
        TipoAtividade::parse(raw)?;
    }
    Ok(atividade_repo::list(pool, evento_id, tipo, busca).await?)
}

/// Troca o responsavel revalidando o conflito de agenda contra a janela
/// atual da atividade.
pub async fn set_responsavel(
    pool: &SqlitePool,
    id: i64,
    responsavel_id: Option<i64>,
) -> Result<AtividadeRow, AppError> {
    let atual = atividade_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("atividade"))?;

    if let Some(responsavel_id) = responsavel_id {
        if participante_repo::get(pool, responsavel_id).await?.is_none() {
            return Err(AppError::NaoEncontrado("participante"));
        }
        let conflitos = atividade_repo::count_conflitos_responsavel(
            pool,
            atual.evento_id,
            responsavel_id,
            Some(id),
            atual.horario_inicio,
            atual.horario_fim,
        )
        .await?;
        if conflitos > 0 {
            return Err(ErroValidacao::ConflitoDeHorario.into());
        }
    }

    atividade_repo::set_responsavel(pool, id, responsavel_id).await?;
    atividade_repo::get(pool, id)
        .await?
        .ok_or(AppError::NaoEncontrado("atividade"))
}

pub async fn remove(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    let agora = Utc::now().to_rfc3339();
    let alteradas = atividade_repo::soft_delete(pool, id, &agora).await?;
    if alteradas == 0 {
        return Err(AppError::NaoEncontrado("atividade"));
    }
    Ok(())
}
