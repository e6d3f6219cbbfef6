use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::models::{EventoRow, ParticipanteRow};
use crate::services::inscricao_service::ResultadoInscricao;
use crate::services::{
    atividade_service, dashboard_service, evento_service, inscricao_service, relatorio_service,
};
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::{policy, AppState};

#[derive(Debug, Deserialize)]
pub struct EventosQuery {
    pub busca: Option<String>,
    pub local: Option<String>,
    pub ordenar: Option<String>,
}

pub async fn list_handler(
    Query(query): Query<EventosQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<EventoRow>>, AppError> {
    let eventos = evento_service::list(
        &state.pool,
        query.busca.as_deref(),
        query.local.as_deref(),
        query.ordenar.as_deref(),
    )
    .await?;
    Ok(Json(eventos))
}

pub async fn create_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(input): Json<evento_service::EventoInput>,
) -> Result<(StatusCode, Json<EventoRow>), AppError> {
    policy::exigir_organizador(&user)?;
    let evento = evento_service::create(&state.pool, &input).await?;
    tracing::info!(evento_id = evento.id, "evento criado");
    Ok((StatusCode::CREATED, Json(evento)))
}

pub async fn get_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<EventoRow>, AppError> {
    Ok(Json(evento_service::get(&state.pool, id).await?))
}

pub async fn update_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(input): Json<evento_service::EventoInput>,
) -> Result<Json<EventoRow>, AppError> {
    policy::exigir_organizador(&user)?;
    let evento = evento_service::update(&state.pool, id, &input).await?;
    state.cache.invalidar_entidade(id);
    Ok(Json(evento))
}

pub async fn delete_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    policy::exigir_organizador(&user)?;
    evento_service::remove(&state.pool, id).await?;
    state.cache.invalidar_entidade(id);
    tracing::info!(evento_id = id, "evento removido (soft delete em cascata)");
    Ok(StatusCode::NO_CONTENT)
}

/// GET lista os inscritos; POST inscreve o proprio chamador.
pub async fn list_inscritos_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipanteRow>>, AppError> {
    evento_service::get(&state.pool, id).await?;
    let inscritos =
        crate::database::inscricao_repo::participantes_inscritos(&state.pool, id).await?;
    Ok(Json(inscritos))
}

pub async fn inscrever_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resultado = inscricao_service::inscrever(&state.pool, user.id, id).await?;
    // Cada desfecho vira uma resposta distinta para o cliente.
    let resposta = match resultado {
        ResultadoInscricao::Criada(inscricao) => {
            state.cache.invalidar_entidade(id);
            (
                StatusCode::CREATED,
                Json(json!({ "status": "Inscricao realizada", "inscricao": inscricao })),
            )
        }
        ResultadoInscricao::JaInscrito => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "Ja inscrito" })),
        ),
        ResultadoInscricao::EventoEncerrado => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "Evento encerrado" })),
        ),
    };
    Ok(resposta.into_response())
}

pub async fn list_atividades_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::models::AtividadeRow>>, AppError> {
    evento_service::get(&state.pool, id).await?;
    let atividades = atividade_service::list(&state.pool, Some(id), None, None).await?;
    Ok(Json(atividades))
}

pub async fn create_atividade_handler(
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(input): Json<atividade_service::AtividadeInput>,
) -> Result<(StatusCode, Json<crate::models::AtividadeRow>), AppError> {
    policy::exigir_organizador(&user)?;
    let atividade = atividade_service::create(&state.pool, id, &input).await?;
    state.cache.invalidar_entidade(id);
    Ok((StatusCode::CREATED, Json(atividade)))
}

pub async fn dashboard_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let view = dashboard_service::computar(&state.pool, &state.cache, id).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct RelatorioQuery {
    pub formato: Option<String>,
}

/// Relatorio de participacao em JSON (padrao) ou CSV para download.
pub async fn relatorio_handler(
    Path(id): Path<i64>,
    Query(query): Query<RelatorioQuery>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let linhas = relatorio_service::gerar(&state.pool, id).await?;

    if query.formato.as_deref() == Some("csv") {
        let csv = relatorio_service::para_csv(&linhas);
        let disposition = format!(
            "attachment; filename=\"{}\"",
            relatorio_service::CSV_FILENAME
        );
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response());
    }

    Ok(Json(linhas).into_response())
}
