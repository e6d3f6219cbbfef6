pub mod atividades;
pub mod eventos;
pub mod inscricoes;
pub mod participantes;

pub use atividades::{AtividadeRow, TipoAtividade};
pub use eventos::EventoRow;
pub use inscricoes::{InscricaoRow, StatusInscricao};
pub use participantes::{ParticipanteRow, TipoParticipante};
