mod common;

use std::time::Duration;

use sqlx::SqlitePool;

use common::{criar_evento, criar_participante, em};
use gestao_eventos::services::atividade_service::{self, AtividadeInput};
use gestao_eventos::services::cache::TtlCache;
use gestao_eventos::services::{dashboard_service, inscricao_service, relatorio_service};

fn cache() -> TtlCache {
    TtlCache::new(Duration::from_secs(900))
}

fn atividade(titulo: &str, inicio: u32, fim: u32, responsavel_id: Option<i64>) -> AtividadeInput {
    AtividadeInput {
        titulo: titulo.to_string(),
        descricao: String::new(),
        horario_inicio: em(1, inicio),
        horario_fim: em(1, fim),
        tipo: "palestra".to_string(),
        responsavel_id,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_de_evento_com_uma_inscricao_e_sem_atividades(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;
    inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();

    let view = dashboard_service::computar(&pool, &cache(), evento.id)
        .await
        .unwrap();

    assert_eq!(view["total_inscritos"], 1);
    assert_eq!(view["total_atividades"], 0);
    assert_eq!(view["participantes_por_tipo"]["estudante"], 1);
    assert_eq!(view["atividades_por_tipo"], serde_json::json!({}));
    assert_eq!(view["responsaveis_atividades"], serde_json::json!([]));
    assert_eq!(
        view["participantes_sem_atividade"],
        serde_json::json!(["maria"])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_agrupa_por_tipo_e_separa_responsaveis(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let ana = criar_participante(&pool, "ana", "palestrante").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;
    let beto = criar_participante(&pool, "beto", "estudante").await;

    for p in [&ana, &maria, &beto] {
        inscricao_service::inscrever(&pool, p.id, evento.id)
            .await
            .unwrap();
    }

    atividade_service::create(&pool, evento.id, &atividade("Rust 101", 9, 10, Some(ana.id)))
        .await
        .unwrap();
    atividade_service::create(&pool, evento.id, &{
        let mut a = atividade("Oficina de APIs", 10, 12, Some(ana.id));
        a.tipo = "oficina".to_string();
        a
    })
    .await
    .unwrap();

    let view = dashboard_service::computar(&pool, &cache(), evento.id)
        .await
        .unwrap();

    assert_eq!(view["total_inscritos"], 3);
    assert_eq!(view["total_atividades"], 2);
    assert_eq!(view["participantes_por_tipo"]["estudante"], 2);
    assert_eq!(view["participantes_por_tipo"]["palestrante"], 1);
    assert_eq!(view["atividades_por_tipo"]["palestra"], 1);
    assert_eq!(view["atividades_por_tipo"]["oficina"], 1);
    assert_eq!(view["responsaveis_atividades"], serde_json::json!(["ana"]));
    assert_eq!(
        view["participantes_sem_atividade"],
        serde_json::json!(["beto", "maria"])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn dashboard_usa_o_cache_dentro_do_ttl(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;
    let cache = cache();

    let antes = dashboard_service::computar(&pool, &cache, evento.id)
        .await
        .unwrap();
    assert_eq!(antes["total_inscritos"], 0);

    inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();

    // dentro do TTL a leitura continua vendo o valor antigo
    let cacheado = dashboard_service::computar(&pool, &cache, evento.id)
        .await
        .unwrap();
    assert_eq!(cacheado["total_inscritos"], 0);

    // escrita invalida a entidade e a proxima leitura recomputa
    cache.invalidar_entidade(evento.id);
    let depois = dashboard_service::computar(&pool, &cache, evento.id)
        .await
        .unwrap();
    assert_eq!(depois["total_inscritos"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn relatorio_junta_atividades_ministradas_por_inscrito(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let ana = criar_participante(&pool, "ana", "palestrante").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;
    inscricao_service::inscrever(&pool, ana.id, evento.id)
        .await
        .unwrap();
    inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();

    atividade_service::create(&pool, evento.id, &atividade("Rust 101", 9, 10, Some(ana.id)))
        .await
        .unwrap();
    atividade_service::create(
        &pool,
        evento.id,
        &atividade("Async na pratica", 11, 12, Some(ana.id)),
    )
    .await
    .unwrap();

    let linhas = relatorio_service::gerar(&pool, evento.id).await.unwrap();
    assert_eq!(linhas.len(), 2);

    let de_ana = linhas.iter().find(|l| l.participante == "ana").unwrap();
    assert_eq!(de_ana.tipo, "Palestrante");
    assert_eq!(
        de_ana.atividades_ministradas,
        vec!["Rust 101".to_string(), "Async na pratica".to_string()]
    );

    // quem nao ministra nada aparece com lista vazia, nunca omitido
    let de_maria = linhas.iter().find(|l| l.participante == "maria").unwrap();
    assert!(de_maria.atividades_ministradas.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn csv_de_uma_inscricao_sem_atividades_tem_duas_linhas(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;
    inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();

    let linhas = relatorio_service::gerar(&pool, evento.id).await.unwrap();
    let csv = relatorio_service::para_csv(&linhas);

    let texto: Vec<&str> = csv.lines().collect();
    assert_eq!(texto.len(), 2);
    assert_eq!(texto[0], "Participante,Email,Tipo,Atividades Ministradas");
    assert_eq!(texto[1], "maria,maria@example.com,Estudante,");
}
