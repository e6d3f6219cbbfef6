use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::AtividadeRow;

const SQL_CAMPOS: &str = r#"
SELECT
    id,
    evento_id,
    responsavel_id,
    titulo,
    descricao,
    horario_inicio,
    horario_fim,
    tipo,
    deleted_at
FROM atividades
"#;

pub struct NewAtividade<'a> {
    pub evento_id: i64,
    pub responsavel_id: Option<i64>,
    pub titulo: &'a str,
    pub descricao: &'a str,
    pub horario_inicio: DateTime<Utc>,
    pub horario_fim: DateTime<Utc>,
    pub tipo: &'a str,
}

pub async fn insert(pool: &SqlitePool, nova: NewAtividade<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(
        r#"
INSERT INTO atividades (evento_id, responsavel_id, titulo, descricao, horario_inicio, horario_fim, tipo)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(nova.evento_id)
    .bind(nova.responsavel_id)
    .bind(nova.titulo)
    .bind(nova.descricao)
    .bind(nova.horario_inicio)
    .bind(nova.horario_fim)
    .bind(nova.tipo)
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

/// O evento de uma atividade nao muda em updates; so os demais campos.
pub async fn update(pool: &SqlitePool, id: i64, nova: NewAtividade<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
UPDATE atividades
SET responsavel_id = ?2,
    titulo = ?3,
    descricao = ?4,
    horario_inicio = ?5,
    horario_fim = ?6,
    tipo = ?7
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(nova.responsavel_id)
    .bind(nova.titulo)
    .bind(nova.descricao)
    .bind(nova.horario_inicio)
    .bind(nova.horario_fim)
    .bind(nova.tipo)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn set_responsavel(
    pool: &SqlitePool,
    id: i64,
    responsavel_id: Option<i64>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
UPDATE atividades
SET responsavel_id = ?2
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(responsavel_id)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<AtividadeRow>> {
    let sql = format!("{SQL_CAMPOS} WHERE id = ?1 AND deleted_at IS NULL LIMIT 1");
    sqlx::query_as::<_, AtividadeRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(
    pool: &SqlitePool,
    evento_id: Option<i64>,
    tipo: Option<&str>,
    busca: Option<&str>,
) -> sqlx::Result<Vec<AtividadeRow>> {
    let sql = format!(
        r#"{SQL_CAMPOS}
WHERE deleted_at IS NULL
  AND (?1 IS NULL OR evento_id = ?1)
  AND (?2 IS NULL OR tipo = ?2)
  AND (?3 IS NULL OR titulo LIKE ?3)
ORDER BY horario_inicio ASC
        "#
    );
    let padrao = busca.map(|b| format!("%{}%", b.trim()));
    sqlx::query_as::<_, AtividadeRow>(&sql)
        .bind(evento_id)
        .bind(tipo)
        .bind(padrao)
        .fetch_all(pool)
        .await
}

pub async fn list_by_evento(pool: &SqlitePool, evento_id: i64) -> sqlx::Result<Vec<AtividadeRow>> {
    list(pool, Some(evento_id), None, None).await
}

/// Conta atividades do mesmo evento e mesmo responsavel cujo intervalo
/// meio-aberto cruza [inicio, fim). `exceto_id` exclui a propria
/// atividade em updates.
pub async fn count_conflitos_responsavel(
    pool: &SqlitePool,
    evento_id: i64,
    responsavel_id: i64,
    exceto_id: Option<i64>,
    inicio: DateTime<Utc>,
    fim: DateTime<Utc>,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
SELECT COUNT(*)
FROM atividades
WHERE evento_id = ?1
  AND responsavel_id = ?2
  AND deleted_at IS NULL
  AND (?3 IS NULL OR id != ?3)
  AND horario_inicio < ?5
  AND ?4 < horario_fim
        "#,
    )
    .bind(evento_id)
    .bind(responsavel_id)
    .bind(exceto_id)
    .bind(inicio)
    .bind(fim)
    .fetch_one(pool)
    .await
}

pub async fn soft_delete(pool: &SqlitePool, id: i64, agora: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
UPDATE atividades
SET deleted_at = ?2
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(agora)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}
