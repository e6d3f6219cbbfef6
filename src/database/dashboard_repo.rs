use sqlx::SqlitePool;

/// Consultas de leitura usadas pelo dashboard e pelo relatorio de
/// participacao. Nenhuma escreve no banco.

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContagemPorChave {
    pub chave: String,
    pub total: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LinhaInscricaoRow {
    pub inscricao_id: i64,
    pub participante_id: i64,
    pub username: String,
    pub email: String,
    pub tipo: String,
    pub status: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AtividadeMinistradaRow {
    pub responsavel_id: i64,
    pub titulo: String,
}

pub async fn count_inscritos(pool: &SqlitePool, evento_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
SELECT COUNT(DISTINCT i.participante_id)
FROM inscricoes i
JOIN participantes p ON p.id = i.participante_id
WHERE i.evento_id = ?1
  AND i.deleted_at IS NULL
  AND p.deleted_at IS NULL
        "#,
    )
    .bind(evento_id)
    .fetch_one(pool)
    .await
}

pub async fn count_atividades(pool: &SqlitePool, evento_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
SELECT COUNT(*)
FROM atividades
WHERE evento_id = ?1 AND deleted_at IS NULL
        "#,
    )
    .bind(evento_id)
    .fetch_one(pool)
    .await
}

pub async fn inscritos_por_tipo(
    pool: &SqlitePool,
    evento_id: i64,
) -> sqlx::Result<Vec<ContagemPorChave>> {
    sqlx::query_as::<_, ContagemPorChave>(
        r#"
SELECT p.tipo AS chave, COUNT(*) AS total
FROM inscricoes i
JOIN participantes p ON p.id = i.participante_id
WHERE i.evento_id = ?1
  AND i.deleted_at IS NULL
  AND p.deleted_at IS NULL
GROUP BY p.tipo
ORDER BY p.tipo
        "#,
    )
    .bind(evento_id)
    .fetch_all(pool)
    .await
}

pub async fn atividades_por_tipo(
    pool: &SqlitePool,
    evento_id: i64,
) -> sqlx::Result<Vec<ContagemPorChave>> {
    sqlx::query_as::<_, ContagemPorChave>(
        r#"
SELECT tipo AS chave, COUNT(*) AS total
FROM atividades
WHERE evento_id = ?1 AND deleted_at IS NULL
GROUP BY tipo
ORDER BY tipo
        "#,
    )
    .bind(evento_id)
    .fetch_all(pool)
    .await
}

/// Usernames distintos dos responsaveis por ao menos uma atividade do
/// evento.
pub async fn responsaveis(pool: &SqlitePool, evento_id: i64) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
SELECT DISTINCT p.username
FROM atividades a
JOIN participantes p ON p.id = a.responsavel_id
WHERE a.evento_id = ?1
  AND a.deleted_at IS NULL
  AND p.deleted_at IS NULL
ORDER BY p.username
        "#,
    )
    .bind(evento_id)
    .fetch_all(pool)
    .await
}

/// Inscritos que nao sao responsaveis por nenhuma atividade do evento.
pub async fn inscritos_sem_atividade(
    pool: &SqlitePool,
    evento_id: i64,
) -> sqlx::Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
SELECT p.username
FROM inscricoes i
JOIN participantes p ON p.id = i.participante_id
WHERE i.evento_id = ?1
  AND i.deleted_at IS NULL
  AND p.deleted_at IS NULL
  AND p.id NOT IN (
      SELECT responsavel_id
      FROM atividades
      WHERE evento_id = ?1
        AND deleted_at IS NULL
        AND responsavel_id IS NOT NULL
  )
ORDER BY p.username
        "#,
    )
    .bind(evento_id)
    .fetch_all(pool)
    .await
}

/// Uma linha por inscricao ativa do evento, com a identidade do
/// participante.
pub async fn linhas_inscricao(
    pool: &SqlitePool,
    evento_id: i64,
) -> sqlx::Result<Vec<LinhaInscricaoRow>> {
    sqlx::query_as::<_, LinhaInscricaoRow>(
        r#"
SELECT
    i.id AS inscricao_id,
    p.id AS participante_id,
    p.username,
    p.email,
    p.tipo,
    i.status
FROM inscricoes i
JOIN participantes p ON p.id = i.participante_id
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

/// Titulos das atividades do evento que possuem responsavel, na ordem do
/// horario, para agrupamento por responsavel no relatorio.
pub async fn atividades_ministradas(
    pool: &SqlitePool,
    evento_id: i64,
) -> sqlx::Result<Vec<AtividadeMinistradaRow>> {
    sqlx::query_as::<_, AtividadeMinistradaRow>(
        r#"
SELECT responsavel_id, titulo
FROM atividades
WHERE evento_id = ?1
  AND deleted_at IS NULL
  AND responsavel_id IS NOT NULL
ORDER BY horario_inicio ASC
        "#,
    )
    .bind(evento_id)
    .fetch_all(pool)
    .await
}
