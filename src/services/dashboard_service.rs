use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{dashboard_repo, evento_repo};
use crate::errors::AppError;
use crate::services::cache::TtlCache;

const OP_DASHBOARD: &str = "dashboard";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub evento_id: i64,
    pub nome: String,
    pub total_inscritos: i64,
    pub total_atividades: i64,
    pub participantes_por_tipo: BTreeMap<String, i64>,
    pub atividades_por_tipo: BTreeMap<String, i64>,
    pub responsaveis_atividades: Vec<String>,
    pub participantes_sem_atividade: Vec<String>,
}

/// Monta os contadores do dashboard de um evento. Somente leitura; o
/// resultado fica no cache TTL ate expirar ou ate uma escrita invalidar
/// a entidade.
pub async fn computar(
    pool: &SqlitePool,
    cache: &TtlCache,
    evento_id: i64,
) -> Result<serde_json::Value, AppError> {
    if let Some(valor) = cache.get(OP_DASHBOARD, evento_id) {
        return Ok(valor);
    }

    let evento = evento_repo::get(pool, evento_id)
        .await?
        .ok_or(AppError::NaoEncontrado("evento"))?;

    let view = DashboardView {
        evento_id,
        nome: evento.nome,
        total_inscritos: dashboard_repo::count_inscritos(pool, evento_id).await?,
        total_atividades: dashboard_repo::count_atividades(pool, evento_id).await?,
        participantes_por_tipo: em_mapa(dashboard_repo::inscritos_por_tipo(pool, evento_id).await?),
        atividades_por_tipo: em_mapa(dashboard_repo::atividades_por_tipo(pool, evento_id).await?),
        responsaveis_atividades: dashboard_repo::responsaveis(pool, evento_id).await?,
        participantes_sem_atividade: dashboard_repo::inscritos_sem_atividade(pool, evento_id)
            .await?,
    };

    let valor = serde_json::to_value(&view).expect("dashboard view sempre serializa");
    cache.put(OP_DASHBOARD, evento_id, valor.clone());
    Ok(valor)
}

fn em_mapa(contagens: Vec<dashboard_repo::ContagemPorChave>) -> BTreeMap<String, i64> {
    contagens.into_iter().map(|c| (c.chave, c.total)).collect()
}
