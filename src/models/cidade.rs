use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{is_blank, RecordStatus};
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cidade {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub status: RecordStatus,
    #[serde(default)]
    pub data_cadastro: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CidadePayload {
    pub nome: String,
    pub status: RecordStatus,
}

impl CidadePayload {
    pub fn validate(&self) -> ClientResult<()> {
        if is_blank(&self.nome) {
            return Err(ClientError::missing_fields(&["nome"]));
        }
        Ok(())
    }
}
