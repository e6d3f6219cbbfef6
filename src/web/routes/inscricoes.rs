use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::InscricaoRow;
use crate::services::inscricao_service;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::{policy, AppState};

#[derive(Debug, Deserialize)]
pub struct InscricoesQuery {
    pub status: Option<String>,
}

/// Organizadores veem todas as inscricoes; os demais, apenas as proprias.
pub async fn list_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<InscricoesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<InscricaoRow>>, AppError> {
    let participante_id = if user.tipo.gerencia_eventos() {
        None
    } else {
        Some(user.id)
    };
    let inscricoes =
        inscricao_service::list(&state.pool, participante_id, query.status.as_deref()).await?;
    Ok(Json(inscricoes))
}

pub async fn get_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<InscricaoRow>, AppError> {
    let inscricao = inscricao_service::get(&state.pool, id).await?;
    policy::exigir_proprio_ou_organizador(&user, inscricao.participante_id)?;
    Ok(Json(inscricao))
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

pub async fn update_status_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<StatusBody>,
) -> Result<Json<InscricaoRow>, AppError> {
    let inscricao = inscricao_service::get(&state.pool, id).await?;
    policy::exigir_proprio_ou_organizador(&user, inscricao.participante_id)?;
    let atualizada = inscricao_service::update_status(&state.pool, id, &body.status).await?;
    state.cache.invalidar_entidade(atualizada.evento_id);
    Ok(Json(atualizada))
}

/// DELETE marca a inscricao como cancelada; a linha permanece para que o
/// par (participante, evento) continue unico.
pub async fn cancel_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<InscricaoRow>, AppError> {
    let inscricao = inscricao_service::get(&state.pool, id).await?;
    policy::exigir_proprio_ou_organizador(&user, inscricao.participante_id)?;
    let cancelada = inscricao_service::cancelar(&state.pool, id).await?;
    state.cache.invalidar_entidade(cancelada.evento_id);
    Ok(Json(cancelada))
}
