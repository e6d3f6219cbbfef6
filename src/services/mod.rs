pub mod atividade_service;
pub mod cache;
pub mod dashboard_service;
pub mod evento_service;
pub mod inscricao_service;
pub mod participante_service;
pub mod relatorio_service;
