use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::AtividadeRow;
use crate::services::{atividade_service, participante_service};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::{policy, AppState};

#[derive(Debug, Deserialize)]
pub struct AtividadesQuery {
    pub evento: Option<i64>,
    pub tipo: Option<String>,
    pub busca: Option<String>,
}

pub async fn list_handler(
    Query(query): Query<AtividadesQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AtividadeRow>>, AppError> {
    let atividades = atividade_service::list(
        &state.pool,
        query.evento,
        query.tipo.as_deref(),
        query.busca.as_deref(),
    )
    .await?;
    Ok(Json(atividades))
}

#[derive(Debug, Deserialize)]
pub struct CreateAtividadeBody {
    pub evento_id: i64,
    #[serde(flatten)]
    pub atividade: atividade_service::AtividadeInput,
}

pub async fn create_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(body): Json<CreateAtividadeBody>,
) -> Result<(StatusCode, Json<AtividadeRow>), AppError> {
    policy::exigir_organizador(&user)?;
    let atividade = atividade_service::create(&state.pool, body.evento_id, &body.atividade).await?;
    state.cache.invalidar_entidade(body.evento_id);
    Ok((StatusCode::CREATED, Json(atividade)))
}

pub async fn get_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<AtividadeRow>, AppError> {
    Ok(Json(atividade_service::get(&state.pool, id).await?))
}

/// Atualizacao permitida ao organizador ou ao responsavel atual.
pub async fn update_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(input): Json<atividade_service::AtividadeInput>,
) -> Result<Json<AtividadeRow>, AppError> {
    let atual = atividade_service::get(&state.pool, id).await?;
    policy::exigir_responsavel_ou_organizador(&user, atual.responsavel_id)?;
    let atividade = atividade_service::update(&state.pool, id, &input).await?;
    state.cache.invalidar_entidade(atividade.evento_id);
    Ok(Json(atividade))
}

pub async fn delete_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    policy::exigir_organizador(&user)?;
    let atual = atividade_service::get(&state.pool, id).await?;
    atividade_service::remove(&state.pool, id).await?;
    state.cache.invalidar_entidade(atual.evento_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_responsavel_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let atividade = atividade_service::get(&state.pool, id).await?;
    let Some(responsavel_id) = atividade.responsavel_id else {
        return Err(AppError::NaoEncontrado("responsavel"));
    };
    let responsavel = participante_service::get(&state.pool, responsavel_id).await?;
    Ok(Json(json!(responsavel)))
}

#[derive(Debug, Deserialize)]
pub struct ResponsavelBody {
    pub responsavel_id: Option<i64>,
}

pub async fn set_responsavel_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<ResponsavelBody>,
) -> Result<Json<AtividadeRow>, AppError> {
    let atual = atividade_service::get(&state.pool, id).await?;
    policy::exigir_responsavel_ou_organizador(&user, atual.responsavel_id)?;
    let atividade = atividade_service::set_responsavel(&state.pool, id, body.responsavel_id).await?;
    state.cache.invalidar_entidade(atividade.evento_id);
    Ok(Json(atividade))
}
