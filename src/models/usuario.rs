use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::is_blank;
use crate::error::{ClientError, ClientResult};
use crate::session::AccessLevel;

/// A dashboard account as listed by `GET /usuarios`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub nome_completo: String,
    pub email: String,
    pub nivel_acesso: AccessLevel,
    #[serde(default)]
    pub cidade_id: Option<i64>,
    #[serde(default)]
    pub data_cadastro: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsuarioPayload {
    pub nome_completo: String,
    pub email: String,
    // Omitted on update when left empty so the stored password is kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub senha: Option<String>,
    pub nivel_acesso: AccessLevel,
    // Serialized as null when no city is assigned
    pub cidade_id: Option<i64>,
}

impl UsuarioPayload {
    /// Required-field check. `creating` additionally requires a password.
    pub fn validate(&self, creating: bool) -> ClientResult<()> {
        let mut missing = Vec::new();
        if is_blank(&self.nome_completo) {
            missing.push("nome_completo");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        if creating && self.senha.as_deref().map_or(true, is_blank) {
            missing.push("senha");
        }
        if !missing.is_empty() {
            return Err(ClientError::missing_fields(&missing));
        }
        Ok(())
    }

    /// Drop a blank password so an update leaves the current one untouched.
    pub fn normalized(mut self) -> Self {
        if self.senha.as_deref().is_some_and(is_blank) {
            self.senha = None;
        }
        self
    }
}
