pub mod atividade_repo;
pub mod dashboard_repo;
pub mod evento_repo;
pub mod inscricao_repo;
pub mod participante_repo;
