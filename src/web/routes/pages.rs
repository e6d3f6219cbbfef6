use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::models::{AtividadeRow, EventoRow, TipoAtividade};
use crate::services::{atividade_service, evento_service};
use crate::web::AppState;

fn formatar_periodo(inicio: DateTime<Utc>, fim: DateTime<Utc>) -> String {
    format!(
        "{} — {}",
        inicio.format("%d/%m/%Y %H:%M"),
        fim.format("%d/%m/%Y %H:%M")
    )
}

pub struct EventoCardView {
    pub id: i64,
    pub nome: String,
    pub descricao: String,
    pub local: String,
    pub periodo: String,
}

impl From<EventoRow> for EventoCardView {
    fn from(row: EventoRow) -> Self {
        EventoCardView {
            id: row.id,
            nome: row.nome,
            descricao: row.descricao,
            local: row.local,
            periodo: formatar_periodo(row.data_inicio, row.data_fim),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub eventos: Vec<EventoCardView>,
    pub busca: String,
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub busca: Option<String>,
}

/// Pagina inicial: eventos ordenados por data de inicio, com busca.
pub async fn home_handler(
    Query(query): Query<HomeQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let eventos =
        match evento_service::list(&state.pool, query.busca.as_deref(), None, None).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("home: falha ao listar eventos: {}", e);
                vec![]
            }
        };

    let template = IndexTemplate {
        eventos: eventos.into_iter().map(EventoCardView::from).collect(),
        busca: query.busca.unwrap_or_default(),
    };
    Html(template.render().unwrap())
}

pub struct AtividadeItemView {
    pub titulo: String,
    pub tipo: String,
    pub periodo: String,
}

impl From<AtividadeRow> for AtividadeItemView {
    fn from(row: AtividadeRow) -> Self {
        let tipo = TipoAtividade::parse(&row.tipo)
            .map(|t| t.label().to_string())
            .unwrap_or(row.tipo);
        AtividadeItemView {
            titulo: row.titulo,
            tipo,
            periodo: formatar_periodo(row.horario_inicio, row.horario_fim),
        }
    }
}

#[derive(Template)]
#[template(path = "evento.html")]
pub struct EventoTemplate {
    pub evento: EventoCardView,
    pub atividades: Vec<AtividadeItemView>,
    pub total_atividades: usize,
}

pub async fn evento_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let evento = match evento_service::get(&state.pool, id).await {
        Ok(row) => row,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };
    let atividades = match atividade_service::list(&state.pool, Some(id), None, None).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!("evento {}: falha ao listar atividades: {}", id, e);
            vec![]
        }
    };

    let template = EventoTemplate {
        evento: evento.into(),
        total_atividades: atividades.len(),
        atividades: atividades.into_iter().map(AtividadeItemView::from).collect(),
    };
    Html(template.render().unwrap()).into_response()
}
