use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::EventoRow;

const SQL_CAMPOS: &str = r#"
SELECT
    id,
    nome,
    descricao,
    banner_url,
    data_inicio,
    data_fim,
    local,
    deleted_at
FROM eventos
"#;

pub struct NewEvento<'a> {
    pub nome: &'a str,
    pub descricao: &'a str,
    pub banner_url: Option<&'a str>,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: DateTime<Utc>,
    pub local: &'a str,
}

pub async fn insert(pool: &SqlitePool, novo: NewEvento<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(
        r#"
INSERT INTO eventos (nome, descricao, banner_url, data_inicio, data_fim, local)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(novo.nome)
    .bind(novo.descricao)
    .bind(novo.banner_url)
    .bind(novo.data_inicio)
    .bind(novo.data_fim)
    .bind(novo.local)
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn update(pool: &SqlitePool, id: i64, novo: NewEvento<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
UPDATE eventos
SET nome = ?2,
    descricao = ?3,
    banner_url = ?4,
    data_inicio = ?5,
    data_fim = ?6,
    local = ?7
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(novo.nome)
    .bind(novo.descricao)
    .bind(novo.banner_url)
    .bind(novo.data_inicio)
    .bind(novo.data_fim)
    .bind(novo.local)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<EventoRow>> {
    let sql = format!("{SQL_CAMPOS} WHERE id = ?1 AND deleted_at IS NULL LIMIT 1");
    sqlx::query_as::<_, EventoRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Busca textual em nome/descricao/local, filtro exato por local e
/// ordenacao por data_inicio (padrao) ou nome.
pub async fn list(
    pool: &SqlitePool,
    busca: Option<&str>,
    local: Option<&str>,
    ordenar_por_nome: bool,
) -> sqlx::Result<Vec<EventoRow>> {
    let ordem = if ordenar_por_nome {
        "nome ASC"
    } else {
        "data_inicio ASC"
    };
    let sql = format!(
        r#"{SQL_CAMPOS}
WHERE deleted_at IS NULL
  AND (?1 IS NULL OR nome LIKE ?1 OR descricao LIKE ?1 OR local LIKE ?1)
  AND (?2 IS NULL OR local = ?2)
ORDER BY {ordem}
        "#
    );
    let padrao = busca.map(|b| format!("%{}%", b.trim()));
    sqlx::query_as::<_, EventoRow>(&sql)
        .bind(padrao)
        .bind(local)
        .fetch_all(pool)
        .await
}

/// Remocao logica em cascata: o marcador deleted_at e propagado para as
/// atividades e inscricoes do evento na mesma transacao.
pub async fn soft_delete_cascade(pool: &SqlitePool, id: i64, agora: &str) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
UPDATE atividades
SET deleted_at = ?2
WHERE evento_id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(agora)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
UPDATE inscricoes
SET deleted_at = ?2
WHERE evento_id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(agora)
    .execute(&mut *tx)
    .await?;

    let res = sqlx::query(
        r#"
UPDATE eventos
SET deleted_at = ?2
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(agora)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(res.rows_affected())
}
