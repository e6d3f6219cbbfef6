use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ParticipanteRow;
use crate::services::participante_service;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::{policy, AppState};

#[derive(Debug, Deserialize)]
pub struct ParticipantesQuery {
    pub tipo: Option<String>,
    pub busca: Option<String>,
}

pub async fn list_handler(
    Extension(_user): Extension<AuthenticatedUser>,
    Query(query): Query<ParticipantesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipanteRow>>, AppError> {
    let participantes =
        participante_service::list(&state.pool, query.tipo.as_deref(), query.busca.as_deref())
            .await?;
    Ok(Json(participantes))
}

/// Cadastro de participantes e tarefa de organizador; emissao de
/// credenciais fica fora desta aplicacao.
pub async fn create_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(input): Json<participante_service::ParticipanteInput>,
) -> Result<(StatusCode, Json<ParticipanteRow>), AppError> {
    policy::exigir_organizador(&user)?;
    let participante = participante_service::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(participante)))
}

pub async fn get_handler(
    Extension(_user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ParticipanteRow>, AppError> {
    Ok(Json(participante_service::get(&state.pool, id).await?))
}

pub async fn update_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(input): Json<participante_service::ParticipanteInput>,
) -> Result<Json<ParticipanteRow>, AppError> {
    policy::exigir_proprio_ou_organizador(&user, id)?;
    // So organizadores promovem alguem a organizador.
    if !user.tipo.gerencia_eventos() && input.tipo == "organizador" {
        return Err(AppError::SemPermissao("apenas organizadores alteram papeis"));
    }
    let participante = participante_service::update(&state.pool, id, &input).await?;
    Ok(Json(participante))
}

pub async fn delete_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    policy::exigir_organizador(&user)?;
    participante_service::remove(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
