mod common;

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use common::{criar_evento, criar_evento_com_janela, criar_evento_encerrado, criar_participante};
use gestao_eventos::errors::AppError;
use gestao_eventos::services::inscricao_service::{self, ResultadoInscricao};

#[sqlx::test(migrations = "./migrations")]
async fn inscricao_nova_e_criada_como_pendente(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    let resultado = inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();
    let inscricao = match resultado {
        ResultadoInscricao::Criada(i) => i,
        outro => panic!("esperava Criada, veio {outro:?}"),
    };
    assert_eq!(inscricao.status, "pendente");
    assert_eq!(inscricao.participante_id, maria.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn segunda_inscricao_do_mesmo_par_e_recusada(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();
    let segunda = inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();
    assert!(matches!(segunda, ResultadoInscricao::JaInscrito));

    let todas = inscricao_service::list(&pool, Some(maria.id), None)
        .await
        .unwrap();
    assert_eq!(todas.len(), 1, "nunca pode haver linha duplicada");
}

#[sqlx::test(migrations = "./migrations")]
async fn tentativas_concorrentes_geram_exatamente_uma_inscricao(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    let (a, b) = tokio::join!(
        inscricao_service::inscrever(&pool, maria.id, evento.id),
        inscricao_service::inscrever(&pool, maria.id, evento.id),
    );
    let resultados = [a.unwrap(), b.unwrap()];
    let criadas = resultados
        .iter()
        .filter(|r| matches!(r, ResultadoInscricao::Criada(_)))
        .count();
    assert_eq!(criadas, 1);

    let todas = inscricao_service::list(&pool, Some(maria.id), None)
        .await
        .unwrap();
    assert_eq!(todas.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn evento_encerrado_nao_aceita_inscricao(pool: SqlitePool) {
    let encerrado = criar_evento_encerrado(&pool, "Encerrado").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    let resultado = inscricao_service::inscrever(&pool, maria.id, encerrado.id)
        .await
        .unwrap();
    assert!(matches!(resultado, ResultadoInscricao::EventoEncerrado));
}

#[sqlx::test(migrations = "./migrations")]
async fn evento_em_andamento_ainda_aceita_inscricao(pool: SqlitePool) {
    // comecou ontem, termina amanha
    let agora = Utc::now();
    let em_andamento = criar_evento_com_janela(
        &pool,
        "Em andamento",
        agora - Duration::days(1),
        agora + Duration::days(1),
    )
    .await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    let resultado = inscricao_service::inscrever(&pool, maria.id, em_andamento.id)
        .await
        .unwrap();
    assert!(matches!(resultado, ResultadoInscricao::Criada(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn mudanca_de_status_preserva_data_inscricao(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    let inscricao = match inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap()
    {
        ResultadoInscricao::Criada(i) => i,
        outro => panic!("esperava Criada, veio {outro:?}"),
    };

    let confirmada = inscricao_service::update_status(&pool, inscricao.id, "confirmado")
        .await
        .unwrap();
    assert_eq!(confirmada.status, "confirmado");
    assert_eq!(confirmada.data_inscricao, inscricao.data_inscricao);

    let err = inscricao_service::update_status(&pool, inscricao.id, "desistiu")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validacao(_)));
}

#[sqlx::test(migrations = "./migrations")]
async fn cancelar_mantem_a_linha_e_o_par_unico(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let maria = criar_participante(&pool, "maria", "estudante").await;

    let inscricao = match inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap()
    {
        ResultadoInscricao::Criada(i) => i,
        outro => panic!("esperava Criada, veio {outro:?}"),
    };

    let cancelada = inscricao_service::cancelar(&pool, inscricao.id).await.unwrap();
    assert_eq!(cancelada.status, "cancelado");

    // a linha continua existindo, entao reinscrever segue bloqueado
    let de_novo = inscricao_service::inscrever(&pool, maria.id, evento.id)
        .await
        .unwrap();
    assert!(matches!(de_novo, ResultadoInscricao::JaInscrito));
}

#[sqlx::test(migrations = "./migrations")]
async fn inscricao_em_evento_inexistente_da_nao_encontrado(pool: SqlitePool) {
    let maria = criar_participante(&pool, "maria", "estudante").await;
    let err = inscricao_service::inscrever(&pool, maria.id, 999)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NaoEncontrado("evento")));
}
