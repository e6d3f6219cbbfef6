mod common;

use sqlx::SqlitePool;

use common::{criar_evento, criar_participante, em};
use gestao_eventos::errors::{AppError, ErroValidacao};
use gestao_eventos::models::AtividadeRow;
use gestao_eventos::services::atividade_service::{self, AtividadeInput};

fn janela(inicio_hora: u32, fim_hora: u32, responsavel_id: Option<i64>) -> AtividadeInput {
    AtividadeInput {
        titulo: "Atividade".to_string(),
        descricao: String::new(),
        horario_inicio: em(1, inicio_hora),
        horario_fim: em(1, fim_hora),
        tipo: "palestra".to_string(),
        responsavel_id,
    }
}

async fn criar(
    pool: &SqlitePool,
    evento_id: i64,
    input: &AtividadeInput,
) -> Result<AtividadeRow, AppError> {
    atividade_service::create(pool, evento_id, input).await
}

#[sqlx::test(migrations = "./migrations")]
async fn rejeita_janela_invertida(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let err = criar(&pool, evento.id, &janela(10, 10, None))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validacao(ErroValidacao::PeriodoInvertido)
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn rejeita_janela_fora_do_evento(pool: SqlitePool) {
    // evento vai de 01/06 08:00 a 03/06 18:00
    let evento = criar_evento(&pool, "Evento").await;

    let mut cedo = janela(9, 10, None);
    cedo.horario_inicio = em(1, 7);
    let err = criar(&pool, evento.id, &cedo).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validacao(ErroValidacao::AtividadeForaDoEvento)
    ));

    let mut tarde = janela(9, 10, None);
    tarde.horario_fim = em(3, 19);
    let err = criar(&pool, evento.id, &tarde).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validacao(ErroValidacao::AtividadeForaDoEvento)
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn aceita_igualdade_nas_bordas_do_evento(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let mut exata = janela(8, 10, None);
    exata.horario_inicio = evento.data_inicio;
    assert!(criar(&pool, evento.id, &exata).await.is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn conflito_de_horario_do_mesmo_responsavel(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let palestrante = criar_participante(&pool, "ana", "palestrante").await;

    criar(&pool, evento.id, &janela(9, 11, Some(palestrante.id)))
        .await
        .unwrap();

    // sobreposicao estrita falha na segunda escrita
    let err = criar(&pool, evento.id, &janela(10, 12, Some(palestrante.id)))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validacao(ErroValidacao::ConflitoDeHorario)
    ));

    // intervalos que apenas se tocam passam
    assert!(criar(&pool, evento.id, &janela(11, 12, Some(palestrante.id)))
        .await
        .is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn responsaveis_diferentes_podem_sobrepor(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let ana = criar_participante(&pool, "ana", "palestrante").await;
    let beto = criar_participante(&pool, "beto", "palestrante").await;

    criar(&pool, evento.id, &janela(9, 11, Some(ana.id)))
        .await
        .unwrap();
    assert!(criar(&pool, evento.id, &janela(10, 12, Some(beto.id)))
        .await
        .is_ok());
    // e sem responsavel nunca ha conflito
    assert!(criar(&pool, evento.id, &janela(9, 11, None)).await.is_ok());
}

#[sqlx::test(migrations = "./migrations")]
async fn update_ignora_a_propria_janela_anterior(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let ana = criar_participante(&pool, "ana", "palestrante").await;

    let atividade = criar(&pool, evento.id, &janela(9, 11, Some(ana.id)))
        .await
        .unwrap();

    // deslocar a propria janela para um horario que cruza a versao
    // anterior nao pode ser um falso conflito
    let atualizada = atividade_service::update(&pool, atividade.id, &janela(10, 12, Some(ana.id)))
        .await
        .unwrap();
    assert_eq!(atualizada.horario_inicio, em(1, 10));
}

#[sqlx::test(migrations = "./migrations")]
async fn trocar_responsavel_revalida_conflito(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let ana = criar_participante(&pool, "ana", "palestrante").await;

    criar(&pool, evento.id, &janela(9, 11, Some(ana.id)))
        .await
        .unwrap();
    let livre = criar(&pool, evento.id, &janela(10, 12, None)).await.unwrap();

    let err = atividade_service::set_responsavel(&pool, livre.id, Some(ana.id))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validacao(ErroValidacao::ConflitoDeHorario)
    ));

    // remover o responsavel sempre passa
    let sem = atividade_service::set_responsavel(&pool, livre.id, None)
        .await
        .unwrap();
    assert_eq!(sem.responsavel_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn rejeita_tipo_desconhecido_e_responsavel_inexistente(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;

    let mut estranha = janela(9, 10, None);
    estranha.tipo = "hackathon".to_string();
    let err = criar(&pool, evento.id, &estranha).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validacao(ErroValidacao::TipoDesconhecido { .. })
    ));

    let err = criar(&pool, evento.id, &janela(9, 10, Some(999)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NaoEncontrado("participante")));
}

#[sqlx::test(migrations = "./migrations")]
async fn remover_participante_anula_o_responsavel(pool: SqlitePool) {
    let evento = criar_evento(&pool, "Evento").await;
    let ana = criar_participante(&pool, "ana", "palestrante").await;
    let atividade = criar(&pool, evento.id, &janela(9, 11, Some(ana.id)))
        .await
        .unwrap();

    gestao_eventos::services::participante_service::remove(&pool, ana.id)
        .await
        .unwrap();

    let recarregada = atividade_service::get(&pool, atividade.id).await.unwrap();
    assert_eq!(recarregada.responsavel_id, None);
}
