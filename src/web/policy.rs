use crate::errors::AppError;
use crate::web::middleware::auth::AuthenticatedUser;

/// Porta de autorizacao na frente de toda operacao de escrita. Leituras
/// nao passam por aqui.

pub fn exigir_organizador(user: &AuthenticatedUser) -> Result<(), AppError> {
    if user.tipo.gerencia_eventos() {
        Ok(())
    } else {
        Err(AppError::SemPermissao("apenas organizadores"))
    }
}

/// O proprio participante ou um organizador.
pub fn exigir_proprio_ou_organizador(
    user: &AuthenticatedUser,
    dono_id: i64,
) -> Result<(), AppError> {
    if user.id == dono_id || user.tipo.gerencia_eventos() {
        Ok(())
    } else {
        Err(AppError::SemPermissao("apenas o proprio participante ou organizadores"))
    }
}

/// O responsavel atual da atividade ou um organizador.
pub fn exigir_responsavel_ou_organizador(
    user: &AuthenticatedUser,
    responsavel_id: Option<i64>,
) -> Result<(), AppError> {
    if responsavel_id == Some(user.id) || user.tipo.gerencia_eventos() {
        Ok(())
    } else {
        Err(AppError::SemPermissao("apenas o responsavel da atividade ou organizadores"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TipoParticipante;

    fn user(id: i64, tipo: TipoParticipante) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: format!("user{id}"),
            tipo,
        }
    }

    #[test]
    fn organizador_passa_em_todas_as_portas() {
        let org = user(1, TipoParticipante::Organizador);
        assert!(exigir_organizador(&org).is_ok());
        assert!(exigir_proprio_ou_organizador(&org, 99).is_ok());
        assert!(exigir_responsavel_ou_organizador(&org, None).is_ok());
    }

    #[test]
    fn estudante_nao_gerencia_eventos() {
        let est = user(2, TipoParticipante::Estudante);
        assert!(matches!(
            exigir_organizador(&est),
            Err(AppError::SemPermissao(_))
        ));
    }

    #[test]
    fn proprio_participante_edita_o_proprio_perfil() {
        let est = user(2, TipoParticipante::Estudante);
        assert!(exigir_proprio_ou_organizador(&est, 2).is_ok());
        assert!(exigir_proprio_ou_organizador(&est, 3).is_err());
    }

    #[test]
    fn responsavel_edita_a_propria_atividade() {
        let pal = user(5, TipoParticipante::Palestrante);
        assert!(exigir_responsavel_ou_organizador(&pal, Some(5)).is_ok());
        assert!(exigir_responsavel_ou_organizador(&pal, Some(6)).is_err());
        assert!(exigir_responsavel_ou_organizador(&pal, None).is_err());
    }
}
