//! Session data model and the authorization gate built on it.
//!
//! A [`Session`] always pairs a bearer token with the user profile it was
//! issued for; there is no way to hold one without the other.

pub mod context;
pub mod store;

pub use context::{LoginOutcome, SessionContext, SessionState};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered access levels. Level N implies every permission of the levels below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AccessLevel {
    Visualizacao = 1,
    Editor = 2,
    AdminCidade = 3,
    AdminGlobal = 4,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Visualizacao,
        AccessLevel::Editor,
        AccessLevel::AdminCidade,
        AccessLevel::AdminGlobal,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::Visualizacao => "Visualização",
            AccessLevel::Editor => "Editor",
            AccessLevel::AdminCidade => "Admin Cidade",
            AccessLevel::AdminGlobal => "Admin Global",
        }
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        AccessLevel::Visualizacao
    }
}

impl TryFrom<u8> for AccessLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(AccessLevel::Visualizacao),
            2 => Ok(AccessLevel::Editor),
            3 => Ok(AccessLevel::AdminCidade),
            4 => Ok(AccessLevel::AdminGlobal),
            other => Err(format!("invalid access level: {} (expected 1-4)", other)),
        }
    }
}

impl From<AccessLevel> for u8 {
    fn from(level: AccessLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_u8(), self.label())
    }
}

/// Profile of the authenticated user, as returned by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub nome_completo: String,
    pub email: String,
    pub nivel_acesso: AccessLevel,
    #[serde(default)]
    pub cidade_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_cadastro: Option<NaiveDateTime>,
}

/// The token/user pair held while authenticated.
#[derive(Clone, PartialEq)]
pub struct Session {
    token: String,
    user: SessionUser,
}

impl Session {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn level(&self) -> AccessLevel {
        self.user.nivel_acesso
    }

    /// Single permission predicate: "has at least level `required`".
    pub fn has_permission(&self, required: AccessLevel) -> bool {
        self.user.nivel_acesso >= required
    }
}

// Keep bearer tokens out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}
