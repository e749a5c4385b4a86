use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{is_blank, Profissional, RecordStatus};
use crate::error::{ClientError, ClientResult};

/// A municipal social-service facility (CRAS, CREAS, CAPS, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipamento {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub data_cadastro: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipamentoPayload {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub status: RecordStatus,
}

impl EquipamentoPayload {
    pub fn validate(&self) -> ClientResult<()> {
        if is_blank(&self.nome) {
            return Err(ClientError::missing_fields(&["nome"]));
        }
        Ok(())
    }
}

/// Response of `GET /equipamentos/:id/profissionais`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipamentoProfissionais {
    pub equipamento: Equipamento,
    #[serde(default)]
    pub profissionais: Vec<Profissional>,
}
