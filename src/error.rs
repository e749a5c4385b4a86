// Client error taxonomy
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::session::AccessLevel;

/// Every failure a page or command can observe.
///
/// `AuthRejected` is handled globally by the gateway (credentials cleared,
/// session reset) and must never be shown as an inline page error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    // No response received
    #[error("{0}")]
    Network(String),

    // 401 from the backend: session invalid or expired
    #[error("{0}")]
    AuthRejected(String),

    // Any other non-2xx response
    #[error("{message}")]
    Backend {
        status: u16,
        message: String,
        body: Option<Value>,
    },

    // Client-side required field checks, raised before any network call
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: Option<HashMap<String, String>>,
    },

    // Action gated by an access level the session does not hold
    #[error("Permissão negada: requer nível {required}")]
    PermissionDenied { required: AccessLevel },

    #[error("Erro de armazenamento: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Get HTTP status code when the error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::AuthRejected(_) => Some(401),
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for inline display
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Get error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::AuthRejected(_) => "AUTH_REJECTED",
            ClientError::Backend { .. } => "BACKEND_ERROR",
            ClientError::Validation { .. } => "VALIDATION_ERROR",
            ClientError::PermissionDenied { .. } => "PERMISSION_DENIED",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// True for the one error class that must not reach page-level display
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, ClientError::AuthRejected(_))
    }

    /// Convert to JSON body for `--json` output
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": self.message(),
            "error_code": self.error_code(),
        });

        match self {
            ClientError::Backend { status, .. } => {
                response["status"] = json!(status);
            }
            ClientError::Validation { field_errors: Some(field_errors), .. } => {
                response["field_errors"] = json!(field_errors);
            }
            ClientError::PermissionDenied { required } => {
                response["required_level"] = json!(required.as_u8());
            }
            _ => {}
        }

        response
    }
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn auth_rejected(message: impl Into<String>) -> Self {
        ClientError::AuthRejected(message.into())
    }

    /// Build a backend error, lifting `{"error": "..."}` out of the body when present.
    pub fn backend(status: u16, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("error"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Erro na requisição (HTTP {})", status));

        ClientError::Backend { status, message, body }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation {
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn missing_fields(fields: &[&str]) -> Self {
        let field_errors = fields
            .iter()
            .map(|f| (f.to_string(), "Campo obrigatório".to_string()))
            .collect();
        ClientError::Validation {
            message: format!("Campos obrigatórios não preenchidos: {}", fields.join(", ")),
            field_errors: Some(field_errors),
        }
    }

    pub fn permission_denied(required: AccessLevel) -> Self {
        ClientError::PermissionDenied { required }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::network(format!("Resposta inválida do servidor: {}", err))
        } else {
            ClientError::network(format!("Falha de comunicação com o servidor: {}", err))
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
