//! Localized (pt-BR) user-facing text

pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas. Use teste@medfiles.com / teste123";
pub const PRESCRIPTION_NOT_FOUND: &str = "Prescrição não encontrada";
pub const HISTORY_NOT_FOUND: &str = "Histórico não encontrado";
pub const UPLOAD_PROCESSED: &str = "Arquivo processado com sucesso! (simulação)";

pub const NO_NOTES: &str = "Nenhuma observação adicional.";
pub const NO_REASON: &str = "Motivo não informado";
pub const AS_PRESCRIBED: &str = "Conforme prescrição";

pub const STATUS_ACTIVE: &str = "Ativo";
pub const STATUS_INACTIVE: &str = "Inativo";

pub const CHANGE_NEW: &str = "Nova prescrição";
pub const CHANGE_DECREASE: &str = "Dose reduzida";
pub const CHANGE_INCREASE: &str = "Dose aumentada";
pub const CHANGE_GENERIC: &str = "Mudança registrada";

pub const DOSE_SERIES_LABEL: &str = "Dose (mg)";

pub const EMPTY_ACTIVE_TITLE: &str = "Nenhuma medicação ativa";
pub const EMPTY_ACTIVE_HINT: &str = "Adicione prescrições para ver suas medicações aqui.";
pub const EMPTY_RECENT_TITLE: &str = "Nenhuma prescrição encontrada";
pub const EMPTY_RECENT_HINT: &str = "Adicione sua primeira prescrição para começar.";
pub const EMPTY_TIMELINE_TITLE: &str = "Nenhuma mudança registrada";
pub const EMPTY_TIMELINE_HINT: &str = "Este medicamento não teve alterações de dose.";
pub const EMPTY_RELATED_TITLE: &str = "Nenhuma prescrição relacionada";
pub const EMPTY_RELATED_HINT: &str = "Não foram encontradas prescrições para este medicamento.";
pub const EMPTY_CONSOLIDATED_TITLE: &str = "Nenhuma medicação encontrada";
pub const EMPTY_CONSOLIDATED_HINT: &str = "Adicione prescrições para ver a visão consolidada.";

pub const CONSOLIDATED_TITLE: &str = "Prescrição Consolidada";
pub const CONSOLIDATED_SUBTITLE: &str = "Visão unificada de todas as suas medicações ativas.";
