use sqlx::SqlitePool;

use crate::models::ParticipanteRow;

const SQL_CAMPOS: &str = r#"
SELECT
    id,
    username,
    email,
    celular,
    tipo,
    deleted_at
FROM participantes
"#;

pub struct NewParticipante<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub celular: Option<&'a str>,
    pub tipo: &'a str,
}

pub async fn insert(pool: &SqlitePool, novo: NewParticipante<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(
        r#"
INSERT INTO participantes (username, email, celular, tipo)
VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(novo.username)
    .bind(novo.email)
    .bind(novo.celular)
    .bind(novo.tipo)
    .execute(pool)
    .await?;
    Ok(res.last_insert_rowid())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    email: &str,
    celular: Option<&str>,
    tipo: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
UPDATE participantes
SET email = ?2, celular = ?3, tipo = ?4
WHERE id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(celular)
    .bind(tipo)
    .execute(pool)
    .await?;
    Ok(res.rows_affected())
}

pub async fn get(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<ParticipanteRow>> {
    let sql = format!("{SQL_CAMPOS} WHERE id = ?1 AND deleted_at IS NULL LIMIT 1");
    sqlx::query_as::<_, ParticipanteRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Lista com filtro exato por tipo e busca textual em username/email.
pub async fn list(
    pool: &SqlitePool,
    tipo: Option<&str>,
    busca: Option<&str>,
) -> sqlx::Result<Vec<ParticipanteRow>> {
    let sql = format!(
        r#"{SQL_CAMPOS}
WHERE deleted_at IS NULL
  AND (?1 IS NULL OR tipo = ?1)
  AND (?2 IS NULL OR username LIKE ?2 OR email LIKE ?2)
ORDER BY username ASC
        "#
    );
    let padrao = busca.map(|b| format!("%{}%", b.trim()));
    sqlx::query_as::<_, ParticipanteRow>(&sql)
        .bind(tipo)
        .bind(padrao)
        .fetch_all(pool)
        .await
}

/// Remocao logica. Atividades das quais o participante era responsavel
/// ficam sem responsavel em vez de sumirem.
pub async fn soft_delete(pool: &SqlitePool, id: i64, agora: &str) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
UPDATE atividades
SET responsavel_id = NULL
WHERE responsavel_id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    let res = sqlx::query(
        r#"
UPDATE participantes
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
