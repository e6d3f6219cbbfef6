pub mod atividades;
pub mod eventos;
pub mod inscricoes;
pub mod pages;
pub mod participantes;
