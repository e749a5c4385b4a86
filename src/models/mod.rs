//! Records exchanged with the backend.
//!
//! Entities are passed through as the backend returns them; the client only
//! checks required fields before submitting.

pub mod auditoria;
pub mod cidade;
pub mod equipamento;
pub mod profissional;
pub mod usuario;

pub use auditoria::{AuditAction, AuditFilter, AuditStats, AuditoriaEntry};
pub use cidade::{Cidade, CidadePayload};
pub use equipamento::{Equipamento, EquipamentoPayload, EquipamentoProfissionais};
pub use profissional::{Profissional, ProfissionalFilter, ProfissionalPayload, StatusFilter};
pub use usuario::{Usuario, UsuarioPayload};

use serde::{Deserialize, Serialize};

/// Active/inactive flag shared by cities and equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Ativo,
    Inativo,
}

impl RecordStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::Ativo => "ativo",
            RecordStatus::Inativo => "inativo",
        }
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ativo" => Ok(RecordStatus::Ativo),
            "inativo" => Ok(RecordStatus::Inativo),
            other => Err(format!("status inválido: {} (use ativo ou inativo)", other)),
        }
    }
}

/// Body of the `{ "message": ... }` acknowledgements returned by deletes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Push `(key, value)` onto a query list when the value is present and non-blank.
pub(crate) fn push_param(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(v) = value {
        if !v.trim().is_empty() {
            params.push((key, v));
        }
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
