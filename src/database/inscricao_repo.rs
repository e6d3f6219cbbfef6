use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::{InscricaoRow, ParticipanteRow};

const SQL_CAMPOS: &str = r#"
SELECT
    id,
    participante_id,
    evento_id,
    data_inscricao,
    status,
    deleted_at
FROM inscricoes
"#;

/// Insere uma inscricao nova. A restricao UNIQUE(participante_id,
/// evento_id) e quem decide corridas entre escritores concorrentes; o
/// chamador trata a violacao como "ja inscrito".
pub async fn insert(
    pool: &SqlitePool,
    participante_id: i64,
    evento_id: i64,
    data_inscricao: DateTime<Utc>,
) -> sqlx::Result<i64> {
    let res = sqlx::query(
        r#"
INSERT INTO inscricoes (participante_id, evento_id, data_inscricao, status)
VALUES (?1, ?2, ?3, 'pendente')
        "#,
    )
    .bind(participante_id)
    .bind(evento_id)
    .bind(data_inscricao)
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<InscricaoRow>> {
    let sql = format!("{SQL_CAMPOS} WHERE id = ?1 AND deleted_at IS NULL LIMIT 1");
    sqlx::query_as::<_, InscricaoRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_por_par(
    pool: &SqlitePool,
    participante_id: i64,
    evento_id: i64,
) -> sqlx::Result<Option<InscricaoRow>> {
    let sql = format!(
        "{SQL_CAMPOS} WHERE participante_id = ?1 AND evento_id = ?2 AND deleted_at IS NULL LIMIT 1"
    );
    sqlx::query_as::<_, InscricaoRow>(&sql)
        .bind(participante_id)
        .bind(evento_id)
        .fetch_optional(pool)
        .await
}

/// Inscricoes visiveis para o chamador: todas, de um participante, ou
/// filtradas por status.
pub async fn list(
    pool: &SqlitePool,
    participante_id: Option<i64>,
    status: Option<&str>,
) -> sqlx::Result<Vec<InscricaoRow>> {
    let sql = format!(
        r#"{SQL_CAMPOS}
WHERE deleted_at IS NULL
  AND (?1 IS NULL OR participante_id = ?1)
  AND (?2 IS NULL OR status = ?2)
ORDER BY data_inscricao ASC
        "#
    );
    sqlx::query_as::<_, InscricaoRow>(&sql)
        .bind(participante_id)
        .bind(status)
        .fetch_all(pool)
        .await
}

/// data_inscricao nunca e alterada; apenas o status muda.
pub async fn update_status(pool: &SqlitePool, id: i64, status: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
UPDATE inscricoes
SET status = ?2
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(status)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

/// Participantes com inscricao ativa no evento.
pub async fn participantes_inscritos(
    pool: &SqlitePool,
    evento_id: i64,
) -> sqlx::Result<Vec<ParticipanteRow>> {
    sqlx::query_as::<_, ParticipanteRow>(
        r#"
SELECT
    p.id,
    p.username,
    p.email,
    p.celular,
    p.tipo,
    p.deleted_at
FROM participantes p
JOIN inscricoes i ON i.participante_id = p.id
WHERE i.evento_id = ?1
  AND i.deleted_at IS NULL
  AND p.deleted_at IS NULL
ORDER BY p.username ASC
        "#,
    )
    .bind(evento_id)
    .fetch_all(pool)
    .await
}
