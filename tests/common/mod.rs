#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;

use gestao_eventos::models::{EventoRow, ParticipanteRow};
use gestao_eventos::services::{evento_service, participante_service};

/// Instante fixo bem no futuro, para eventos que ainda aceitam inscricao.
pub fn em(dia: u32, hora: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2099, 6, dia, hora, 0, 0).unwrap()
}

pub async fn criar_evento(pool: &SqlitePool, nome: &str) -> EventoRow {
    criar_evento_com_janela(pool, nome, em(1, 8), em(3, 18)).await
}

pub async fn criar_evento_com_janela(
    pool: &SqlitePool,
    nome: &str,
    inicio: DateTime<Utc>,
    fim: DateTime<Utc>,
) -> EventoRow {
    evento_service::create(
        pool,
        &evento_service::EventoInput {
            nome: nome.to_string(),
            descricao: "evento de teste".to_string(),
            banner_url: None,
            data_inicio: inicio,
            data_fim: fim,
            local: "Centro de Convencoes".to_string(),
        },
    )
    .await
    .expect("criar evento de teste")
}

pub async fn criar_evento_encerrado(pool: &SqlitePool, nome: &str) -> EventoRow {
    let fim = Utc::now() - Duration::days(1);
    let inicio = fim - Duration::days(2);
    criar_evento_com_janela(pool, nome, inicio, fim).await
}

pub async fn criar_participante(
    pool: &SqlitePool,
    username: &str,
    tipo: &str,
) -> ParticipanteRow {
    participante_service::create(
        pool,
        &participante_service::ParticipanteInput {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            celular: None,
            tipo: tipo.to_string(),
        },
    )
    .await
    .expect("criar participante de teste")
}
