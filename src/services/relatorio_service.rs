use std::collections::HashMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::{dashboard_repo, evento_repo};
use crate::errors::AppError;
use crate::models::TipoParticipante;

pub const CSV_HEADER: &str = "Participante,Email,Tipo,Atividades Ministradas";
pub const CSV_FILENAME: &str = "relatorio_participacao.csv";

#[derive(Debug, Clone, Serialize)]
pub struct LinhaRelatorio {
    pub participante: String,
    pub email: String,
    pub tipo: String,
    pub status: String,
    /// Titulos das atividades que o participante ministra neste evento.
    /// Vazio (nunca omitido) quando nao ministra nenhuma.
    pub atividades_ministradas: Vec<String>,
}

/// Relatorio de participacao: uma linha por inscricao ativa do evento.
pub async fn gerar(pool: &SqlitePool, evento_id: i64) -> Result<Vec<LinhaRelatorio>, AppError> {
    if evento_repo::get(pool, evento_id).await?.is_none() {
        return Err(AppError::NaoEncontrado("evento"));
    }

    let mut ministradas: HashMap<i64, Vec<String>> = HashMap::new();
    for atividade in dashboard_repo::atividades_ministradas(pool, evento_id).await? {
        ministradas
            .entry(atividade.responsavel_id)
            .or_default()
            .push(atividade.titulo);
    }

    let linhas = dashboard_repo::linhas_inscricao(pool, evento_id)
        .await?
        .into_iter()
        .map(|linha| {
            let tipo = TipoParticipante::parse(&linha.tipo)
                .map(|t| t.label().to_string())
                .unwrap_or(linha.tipo);
            LinhaRelatorio {
                participante: linha.username,
                email: linha.email,
                tipo,
                status: linha.status,
                atividades_ministradas: ministradas
                    .get(&linha.participante_id)
                    .cloned()
                    .unwrap_or_default(),
            }
        })
        .collect();

    Ok(linhas)
}

/// Serializa as linhas como CSV com o cabecalho fixo. A celula de
/// atividades junta os titulos por virgula, entao e citada quando
/// preciso.
pub fn para_csv(linhas: &[LinhaRelatorio]) -> String {
    let mut saida = String::from(CSV_HEADER);
    saida.push('\n');
    for linha in linhas {
        saida.push_str(&campo_csv(&linha.participante));
        saida.push(',');
        saida.push_str(&campo_csv(&linha.email));
        saida.push(',');
        saida.push_str(&campo_csv(&linha.tipo));
        saida.push(',');
        saida.push_str(&campo_csv(&linha.atividades_ministradas.join(", ")));
        saida.push('\n');
    }
    saida
}

fn campo_csv(valor: &str) -> String {
    if valor.contains(',') || valor.contains('"') || valor.contains('\n') {
        format!("\"{}\"", valor.replace('"', "\"\""))
    } else {
        valor.to_string()
    }
}
